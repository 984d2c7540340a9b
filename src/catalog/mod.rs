pub mod enrich;
pub mod models;
pub mod query;
pub mod snapshot;

pub use enrich::enrich;
pub use models::{EnrichedListing, Listing, Provider};
pub use query::{run_query, ListingQuery};
pub use snapshot::SnapshotFile;
