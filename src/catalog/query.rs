use crate::catalog::enrich::enrich;
use crate::catalog::models::{EnrichedListing, Listing, Provider};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// The filter parameters of one query, already parsed.
///
/// Parsing is deliberately lenient: a parameter that is missing, not a
/// number, not finite, or not strictly positive is an inactive filter, never
/// an error. Same for provider names nobody has heard of.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingQuery {
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub rooms: Option<f64>,
    pub area: Option<f64>,
    /// `None` = no provider filter. `Some(empty)` is a real state: a
    /// providers list that named only unknown providers matches nothing.
    pub providers: Option<HashSet<Provider>>,
}

/// A numeric filter value is active iff it is finite and strictly positive.
pub(crate) fn positive(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

/// "Parses as a number and is strictly greater than zero", otherwise the
/// parameter counts as absent. ("inf" parses as a number; it is not a price.)
pub(crate) fn positive_number(raw: Option<&String>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok()).and_then(positive)
}

fn provider_set(raw: Option<&String>) -> Option<HashSet<Provider>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    Some(raw.split(',').filter_map(Provider::parse).collect())
}

impl ListingQuery {
    /// Build the active predicates from raw query-string parameters.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            price_min: positive_number(params.get("priceMin")),
            price_max: positive_number(params.get("priceMax")),
            rooms: positive_number(params.get("rooms")),
            area: positive_number(params.get("area")),
            providers: provider_set(params.get("providers")),
        }
    }

    /// Conjunction of every active predicate; vacuously true when none are.
    pub fn matches(&self, record: &Listing) -> bool {
        if let Some(min) = self.price_min {
            if record.price < min {
                return false;
            }
        }
        if let Some(max) = self.price_max {
            if record.price > max {
                return false;
            }
        }
        if let Some(rooms) = self.rooms {
            if record.rooms < rooms {
                return false;
            }
        }
        if let Some(area) = self.area {
            if record.size < area {
                return false;
            }
        }
        if let Some(providers) = &self.providers {
            if !providers.contains(&record.provider) {
                return false;
            }
        }
        true
    }
}

/// Ascending by square-meter price; records with the unknown sentinel go
/// last. `sort_by` is stable, so equal keys keep their snapshot order --
/// providers emit newest-first and the client relies on that tiebreak.
pub fn sort_by_square_meter_price(listings: &mut [EnrichedListing]) {
    listings.sort_by(|a, b| match (a.square_meter_price, b.square_meter_price) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// The whole request-time pipeline: enrich, filter, stable sort.
pub fn run_query(records: &[Listing], query: &ListingQuery) -> Vec<EnrichedListing> {
    let mut result: Vec<EnrichedListing> = records
        .iter()
        .filter(|record| query.matches(record))
        .map(enrich)
        .collect();

    sort_by_square_meter_price(&mut result);
    result
}
