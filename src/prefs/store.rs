use crate::errors::ServerError;
use crate::prefs::cell::PrefCell;
use crate::prefs::codec::Codec;
use crate::prefs::db::PrefDb;
use std::path::Path;

/// Hands out [`PrefCell`]s that all share one SQLite file.
///
/// Cells created here share the connection but not in-memory state, so the
/// caller keeps exactly one cell per preference name for the session.
pub struct PrefStore {
    db: PrefDb,
}

impl PrefStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ServerError> {
        Ok(Self {
            db: PrefDb::open(path)?,
        })
    }

    pub fn open_in_memory() -> Result<Self, ServerError> {
        Ok(Self {
            db: PrefDb::open_in_memory()?,
        })
    }

    pub fn cell<C: Codec + 'static>(&self, name: &str, codec: C, default: C::Value) -> PrefCell<C> {
        PrefCell::new(self.db.clone(), name, codec, default)
    }
}
