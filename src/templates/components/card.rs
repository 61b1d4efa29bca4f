use crate::domain::{Listing, SENTINEL};
use crate::view::CardPhase;
use maud::{html, Markup};

/// Delay before an expanding card reports it has laid out and may open its
/// panel.
pub const EXPAND_SETTLE_MS: u32 = 28;
/// Delay before a collapsing card reports its panel animation has finished.
pub const COLLAPSE_SETTLE_MS: u32 = 380;

/// `"₱ 25,000"` for a present figure, the missing-value marker otherwise.
pub fn money(amount: Option<&str>, currency: &str) -> String {
    match amount {
        Some(a) => format!("{currency} {a}"),
        None => SENTINEL.to_string(),
    }
}

fn card_classes(phase: CardPhase) -> &'static str {
    if phase.is_wide() {
        "property-card col-span-full expanded"
    } else {
        "property-card"
    }
}

fn details_classes(phase: CardPhase) -> &'static str {
    if phase.is_open() {
        "expanded-details rounded-lg is-open"
    } else {
        "expanded-details rounded-lg"
    }
}

fn fact(label: &str, value: &str) -> Markup {
    html! {
        div { span class="font-semibold" { (label) ":" } " " (value) }
    }
}

/// One listing card. `generation` scopes element ids to the current result
/// set so htmx only carries CSS state across swaps of the same card.
pub fn listing_card(
    index: usize,
    generation: u64,
    listing: &Listing,
    phase: CardPhase,
    currency: &str,
) -> Markup {
    let card_id = format!("card-{generation}-{index}");

    html! {
        div
            class=(card_classes(phase))
            id=(card_id)
            data-index=(index)
        {
            div class="card-image" {
                img src=(listing.image) alt=(listing.title) class="w-full h-full";
            }

            div class="card-content flex-1 p-5 flex flex-col" {
                h3 class="font-bold text-lg mb-2" { (listing.title) }
                p class="text-sm mb-4 leading-relaxed line-clamp-3" { (listing.description) }

                div class="card-facts text-sm muted mb-3" {
                    (fact("Location", &listing.location))
                    (fact("Area", &listing.area))
                }

                div class="mt-auto border-t pt-4" {
                    p class="text-xs muted" { "Reservation Fee" }
                    p class="font-extrabold text-xl tracking-tight mb-4" {
                        (money(listing.reservation_fee.as_deref(), currency))
                    }
                    @if phase.shows_details_button() {
                        button
                            type="button"
                            class="see-details-btn w-full py-2.5 px-4 rounded-lg text-sm font-semibold transition"
                            hx-post=(format!("/cards/{index}/open"))
                            hx-target="#grid"
                            hx-swap=(format!("outerHTML show:#{card_id}:top"))
                        { "See Details" }
                    }
                }

                div
                    class=(details_classes(phase))
                    id=(format!("details-{generation}-{index}"))
                    aria-hidden=(if phase.is_open() { "false" } else { "true" })
                {
                    button
                        type="button"
                        class="expanded-close"
                        aria-label="Close details"
                        hx-post=(format!("/cards/{index}/close"))
                        hx-target="#grid"
                        hx-swap="outerHTML"
                    { "X" }

                    div class="mb-3" {
                        p class="text-sm muted" { span class="font-semibold" { "Location:" } " " (listing.location) }
                        p class="text-sm muted" { span class="font-semibold" { "Accessible to:" } " " (listing.accessible_to) }
                    }

                    div class="grid grid-cols-2 gap-3 text-sm mt-2" {
                        (fact("Area", &listing.area))
                        (fact("Floor Area", &listing.floor_area))
                        (fact("Reservation Fee", &money(listing.reservation_fee.as_deref(), currency)))
                        (fact("Down Payment", &money(listing.down_payment.as_deref(), currency)))
                        div class="col-span-2" {
                            span class="font-semibold" { "TCP:" }
                            " " (money(listing.total_contract_price.as_deref(), currency))
                        }
                    }
                }
            }

            @if let Some(ticket) = phase.pending_ticket() {
                (settle_signal(index, ticket, phase))
            }
        }
    }
}

/// Hidden element that reports the end of a card transition back to the
/// server once its delay has elapsed.
fn settle_signal(index: usize, ticket: u64, phase: CardPhase) -> Markup {
    let delay = match phase {
        CardPhase::Expanding(_) => EXPAND_SETTLE_MS,
        _ => COLLAPSE_SETTLE_MS,
    };

    html! {
        div
            class="settle-signal"
            hidden
            hx-post=(format!("/cards/{index}/settle?ticket={ticket}"))
            hx-trigger=(format!("load delay:{delay}ms"))
            hx-target="#grid"
            hx-swap="outerHTML"
        {}
    }
}
