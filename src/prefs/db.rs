use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// The durable side of the preference store: one SQLite file with a single
/// name/value table. This plays the role the browser's localStorage played
/// for the reference client.
#[derive(Clone)]
pub struct PrefDb {
    conn: Arc<Mutex<Connection>>,
}

impl PrefDb {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ServerError> {
        let conn = Connection::open(path)
            .map_err(|e| ServerError::Store(format!("open prefs DB failed: {e}")))?;
        Self::init(conn)
    }

    /// Throwaway database for tests and ephemeral sessions.
    pub fn open_in_memory() -> Result<Self, ServerError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| ServerError::Store(format!("open in-memory prefs DB failed: {e}")))?;
        Self::init(conn)
    }

    /// Opens an existing file without write access. Lets tests exercise the
    /// "durable write failed" path against a real connection.
    #[cfg(test)]
    pub(crate) fn open_read_only(path: impl AsRef<Path>) -> Result<Self, ServerError> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        )
        .map_err(|e| ServerError::Store(format!("open read-only prefs DB failed: {e}")))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn init(conn: Connection) -> Result<Self, ServerError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS prefs (name TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )
        .map_err(|e| ServerError::Store(format!("init prefs table failed: {e}")))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `f` against the shared connection. All store traffic serializes
    /// here, which keeps the set/persist/notify sequence well ordered.
    fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&Connection) -> Result<T, ServerError>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|_| ServerError::Store("prefs connection poisoned".to_string()))?;
        f(&conn)
    }

    pub fn read(&self, name: &str) -> Result<Option<String>, ServerError> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM prefs WHERE name = ?1",
                params![name],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|e| ServerError::Store(format!("read pref '{name}' failed: {e}")))
        })
    }

    pub fn write(&self, name: &str, value: &str) -> Result<(), ServerError> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO prefs (name, value)
                VALUES (?1, ?2)
                ON CONFLICT(name) DO UPDATE SET value = excluded.value
                "#,
                params![name, value],
            )
            .map_err(|e| ServerError::Store(format!("write pref '{name}' failed: {e}")))?;
            Ok(())
        })
    }

    pub fn delete(&self, name: &str) -> Result<(), ServerError> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM prefs WHERE name = ?1", params![name])
                .map_err(|e| ServerError::Store(format!("delete pref '{name}' failed: {e}")))?;
            Ok(())
        })
    }
}
