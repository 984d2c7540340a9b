use crate::catalog::models::{EnrichedListing, Listing};

/// Price per square meter, rounded to two decimal places
/// (multiply-round-divide). A size of zero or less means the metric is
/// meaningless; we return the "unknown" sentinel instead of letting a
/// NaN or infinity leak into the sort.
pub fn square_meter_price(price: f64, size: f64) -> Option<f64> {
    if size <= 0.0 {
        return None;
    }
    Some((price / size * 100.0).round() / 100.0)
}

/// Total and side-effect-free: every record enriches to exactly one output.
pub fn enrich(record: &Listing) -> EnrichedListing {
    EnrichedListing {
        provider: record.provider,
        id: record.id.clone(),
        title: record.title.clone(),
        url: record.url.clone(),
        price: record.price,
        size: record.size,
        rooms: record.rooms,
        address: record.address.clone(),
        image: record.image.clone(),
        square_meter_price: square_meter_price(record.price, record.size),
    }
}
