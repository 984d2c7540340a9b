use crate::catalog::EnrichedListing;
use serde::Serialize;

/// A catalog split along the hidden-id list. Every input record lands in
/// exactly one half and relative order is kept on both sides.
#[derive(Debug, Serialize)]
pub struct Partition {
    pub visible: Vec<EnrichedListing>,
    pub hidden: Vec<EnrichedListing>,
}

pub fn partition(listings: Vec<EnrichedListing>, hidden_ids: &[String]) -> Partition {
    let mut visible = Vec::new();
    let mut hidden = Vec::new();

    for listing in listings {
        if hidden_ids.iter().any(|id| id == &listing.id) {
            hidden.push(listing);
        } else {
            visible.push(listing);
        }
    }

    Partition { visible, hidden }
}
