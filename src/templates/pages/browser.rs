use crate::templates::components::{category_tabs, listing_grid, query_controls};
use crate::templates::desktop_layout;
use crate::view::ViewController;
use maud::{html, Markup};

pub const PAGE_TITLE: &str = "Property Listings";

pub fn browser_page(vc: &ViewController, currency: &str) -> Markup {
    desktop_layout(
        PAGE_TITLE,
        html! {
            main class="container" {
                (browser_fragment(vc, currency))
            }
        },
    )
}

/// Tabs, controls and grid together; swapped as a whole on a tab change
/// because the controls reset with it.
pub fn browser_fragment(vc: &ViewController, currency: &str) -> Markup {
    html! {
        section id="browser" {
            (category_tabs(vc))
            (query_controls(vc))
            (listing_grid(vc, currency, true))
        }
    }
}
