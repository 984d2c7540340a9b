use crate::catalog::query::{positive, positive_number};
use crate::catalog::{EnrichedListing, ListingQuery, Provider};
use crate::prefs::{JsonCodec, NumberCodec, PrefCell, PrefStore};
use crate::visibility::{self, Partition};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Durable shape of the `settings` cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub hidden: Vec<String>,
}

/// The client half of the tool: the hidden-listing list and the last-used
/// filters, held in preference cells so they survive restarts.
pub struct ViewSession {
    settings: PrefCell<JsonCodec<Settings>>,
    price_min: PrefCell<NumberCodec>,
    price_max: PrefCell<NumberCodec>,
    rooms: PrefCell<NumberCodec>,
    area: PrefCell<NumberCodec>,
    providers: PrefCell<JsonCodec<Vec<String>>>,
    hidden: Arc<Mutex<Vec<String>>>,
}

impl ViewSession {
    pub fn new(store: &PrefStore) -> Self {
        let settings = store.cell("settings", JsonCodec::new(), Settings::default());
        let hidden = Arc::new(Mutex::new(settings.get().hidden));

        // Every settings write refreshes the partitioning mirror.
        let mirror = Arc::clone(&hidden);
        settings.subscribe(move |s: &Settings| {
            let mut guard = mirror.lock().unwrap_or_else(|p| p.into_inner());
            *guard = s.hidden.clone();
        });

        Self {
            settings,
            price_min: store.cell("priceMin", NumberCodec, 0.0),
            price_max: store.cell("priceMax", NumberCodec, 0.0),
            rooms: store.cell("rooms", NumberCodec, 0.0),
            area: store.cell("area", NumberCodec, 0.0),
            providers: store.cell("providers", JsonCodec::new(), Vec::new()),
            hidden,
        }
    }

    /// Adds `id` to the hidden list. Present ids are left alone, so the
    /// list never accumulates duplicates. The whole read-modify-write runs
    /// under the cell lock; hides from parallel workers cannot overwrite
    /// each other.
    pub fn hide_entry(&self, id: &str) {
        self.settings.update(|settings| {
            if settings.hidden.iter().any(|h| h == id) {
                return false;
            }
            settings.hidden.push(id.to_string());
            true
        });
    }

    /// Removes every occurrence of `id`, draining duplicates written by
    /// older versions of the settings data.
    pub fn unhide_entry(&self, id: &str) {
        self.settings.update(|settings| {
            if !settings.hidden.iter().any(|h| h == id) {
                return false;
            }
            settings.hidden.retain(|h| h != id);
            true
        });
    }

    /// Builds the query for one request. Parameters present in the request
    /// are saved to their cells and used as given; a blank or unusable value
    /// turns the saved filter off. Parameters left out fall back to the
    /// saved values, so the last-used filters outlive the process.
    pub fn effective_query(&self, params: &HashMap<String, String>) -> ListingQuery {
        ListingQuery {
            price_min: numeric_filter(params, "priceMin", &self.price_min),
            price_max: numeric_filter(params, "priceMax", &self.price_max),
            rooms: numeric_filter(params, "rooms", &self.rooms),
            area: numeric_filter(params, "area", &self.area),
            providers: provider_filter(params, &self.providers),
        }
    }

    /// Splits an already filtered and sorted catalog along the current
    /// hidden list.
    pub fn partition(&self, catalog: Vec<EnrichedListing>) -> Partition {
        let hidden = self.hidden.lock().unwrap_or_else(|p| p.into_inner());
        visibility::partition(catalog, &hidden)
    }

    pub fn hidden_count(&self) -> usize {
        self.hidden.lock().unwrap_or_else(|p| p.into_inner()).len()
    }
}

fn numeric_filter(
    params: &HashMap<String, String>,
    name: &str,
    cell: &PrefCell<NumberCodec>,
) -> Option<f64> {
    if !params.contains_key(name) {
        return positive(cell.get());
    }
    match positive_number(params.get(name)) {
        Some(value) => {
            cell.set(value);
            Some(value)
        }
        None => {
            cell.clear();
            None
        }
    }
}

fn provider_filter(
    params: &HashMap<String, String>,
    cell: &PrefCell<JsonCodec<Vec<String>>>,
) -> Option<HashSet<Provider>> {
    let names = match params.get("providers") {
        Some(raw) => {
            let names: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            if names.is_empty() {
                cell.clear();
            } else {
                cell.set(names.clone());
            }
            names
        }
        None => cell.get(),
    };

    if names.is_empty() {
        return None;
    }
    Some(names.iter().filter_map(|name| Provider::parse(name)).collect())
}
