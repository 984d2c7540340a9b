use crate::templates::{card, desktop_layout};
use chrono::{DateTime, Local};
use maud::{html, Markup};

/// Everything the status page shows, precomputed by the router.
pub struct StatusView {
    pub snapshot_file: String,
    pub listing_count: Option<usize>,
    pub load_error: Option<String>,
    pub modified: Option<DateTime<Local>>,
    pub hidden_count: usize,
}

pub fn home_page(status: &StatusView) -> Markup {
    desktop_layout(
        "Wohnungsfinder",
        html! {
            h1 { "Wohnungsfinder" }

            (card("Snapshot", html! {
                p { "File: " code { (status.snapshot_file) } }
                @if let Some(count) = status.listing_count {
                    p { (count) " listings loaded" }
                }
                @if let Some(err) = &status.load_error {
                    p class="error" { "Load failed: " (err) }
                }
                @if let Some(modified) = &status.modified {
                    p { "Last scrape: " (modified.format("%d.%m.%Y %H:%M")) }
                }
            }))

            (card("Hidden listings", html! {
                p { (status.hidden_count) " listings hidden" }
            }))

            (card("Endpoints", html! {
                ul {
                    li { code { "GET /api/listings" } }
                    li { code { "GET /api/listings.xlsx" } }
                    li { code { "GET /api/view" } }
                    li { code { "POST /api/view/hide?id=<listing id>" } }
                    li { code { "POST /api/view/unhide?id=<listing id>" } }
                }
            }))
        },
    )
}
