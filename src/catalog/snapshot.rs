use crate::catalog::models::Listing;
use crate::errors::ServerError;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

/// Handle on the snapshot file the upstream scraper writes (a JSON array of
/// listing records). Cheap to clone; the parsed snapshot is shared behind an
/// `Arc` and re-read only when the file's mtime moves.
#[derive(Clone)]
pub struct SnapshotFile {
    path: PathBuf,
    cache: Arc<Mutex<Option<CachedSnapshot>>>,
}

struct CachedSnapshot {
    modified: SystemTime,
    listings: Arc<Vec<Listing>>,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Arc::new(Mutex::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// When the scraper last wrote the file, if it exists at all.
    pub fn modified(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).and_then(|m| m.modified()).ok()
    }

    /// The point-in-time record array for one query.
    ///
    /// Every deviation from the record contract (unreadable file, invalid
    /// JSON, wrong fields, unknown provider, negative price, bad link) fails
    /// the whole load. We never drop or repair individual records; a partial
    /// snapshot would corrupt the filtered/sorted guarantees downstream.
    pub fn load(&self) -> Result<Arc<Vec<Listing>>, ServerError> {
        let modified = fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .map_err(|e| {
                ServerError::Snapshot(format!("cannot stat {}: {e}", self.path.display()))
            })?;

        let mut cache = self
            .cache
            .lock()
            .map_err(|_| ServerError::Snapshot("snapshot cache poisoned".to_string()))?;

        if let Some(cached) = cache.as_ref() {
            if cached.modified == modified {
                return Ok(cached.listings.clone());
            }
        }

        let text = fs::read_to_string(&self.path).map_err(|e| {
            ServerError::Snapshot(format!("cannot read {}: {e}", self.path.display()))
        })?;

        let listings: Vec<Listing> = serde_json::from_str(&text)
            .map_err(|e| ServerError::Snapshot(format!("invalid snapshot JSON: {e}")))?;

        for (idx, listing) in listings.iter().enumerate() {
            listing.validate().map_err(|msg| {
                ServerError::Snapshot(format!("record {idx} (id {:?}): {msg}", listing.id))
            })?;
        }

        let listings = Arc::new(listings);
        *cache = Some(CachedSnapshot {
            modified,
            listings: listings.clone(),
        });

        Ok(listings)
    }
}
