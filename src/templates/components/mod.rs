use crate::catalog::category_label;
use crate::domain::SORT_OPTIONS;
use crate::view::ViewController;
use maud::{html, Markup};

pub mod card;
pub mod error;

pub use card::listing_card;
pub use error::html_error_response;

/// `/category?key=...` with the key form-encoded.
pub fn category_url(key: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(key.as_bytes()).collect();
    format!("/category?key={encoded}")
}

pub fn category_tabs(vc: &ViewController) -> Markup {
    html! {
        nav class="tabs flex gap-2 mb-6" {
            @for key in vc.catalog().category_keys() {
                button
                    type="button"
                    class=(if key == vc.category() { "tab-btn tab-active" } else { "tab-btn tab-inactive" })
                    data-category=(key)
                    hx-get=(category_url(key))
                    hx-target="#browser"
                    hx-swap="outerHTML"
                { (category_label(key)) }
            }
        }
    }
}

/// Search box plus location and sort dropdowns. Any change re-queries the
/// grid without touching the other controls.
pub fn query_controls(vc: &ViewController) -> Markup {
    let controls = vc.controls();
    let current_sort = controls.sort.map(|k| k.to_string());

    html! {
        form
            id="controls"
            class="controls flex flex-wrap gap-3 mb-6"
            hx-get="/listings"
            hx-target="#grid"
            hx-swap="outerHTML"
            hx-trigger="input changed delay:250ms, change"
        {
            label class="sr-only" for="search" { "Search" }
            input
                type="search"
                id="search"
                name="q"
                value=(controls.search)
                placeholder="Search by name or description"
                autocomplete="off";

            label class="sr-only" for="location" { "Location" }
            select id="location" name="location" {
                option value="" selected[controls.location.is_none()] { "All locations" }
                @for loc in vc.locations() {
                    option value=(loc) selected[controls.location.as_deref() == Some(loc.as_str())] { (loc) }
                }
            }

            label class="sr-only" for="sort" { "Sort" }
            select id="sort" name="sort" {
                option value="" selected[current_sort.is_none()] { "Sort by" }
                @for (key, label) in SORT_OPTIONS {
                    @let value = key.to_string();
                    option value=(value) selected[current_sort.as_deref() == Some(value.as_str())] { (label) }
                }
            }
        }
    }
}

/// The card grid for the current result set, or the "no results" state.
/// `entering` adds the entry transition used after a re-query.
pub fn listing_grid(vc: &ViewController, currency: &str, entering: bool) -> Markup {
    let generation = vc.generation();

    html! {
        @if vc.results().is_empty() {
            div id="grid" class=(if entering { "no-results fade-in" } else { "no-results" }) data-generation=(generation) {
                p class="text-lg font-semibold" { "No properties found" }
                p class="muted" { "Try another search term or location." }
            }
        } @else {
            div
                id="grid"
                class=(if entering { "property-grid fade-in" } else { "property-grid" })
                data-generation=(generation)
            {
                @for (index, listing, phase) in vc.cards() {
                    (listing_card(index, generation, listing, phase, currency))
                }
            }
        }
    }
}
