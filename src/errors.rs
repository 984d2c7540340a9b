// errors.rs
use astra::Response;
use std::fmt;

/// Errors originating from the server logic (routing, bad requests),
/// the snapshot contract, or downstream layers (preference DB, export).
#[derive(Debug)]
pub enum ServerError {
    NotFound,
    BadRequest(String),
    /// The snapshot file violated the upstream contract. Fatal to the
    /// current query, never partially repaired.
    Snapshot(String),
    Store(String),
    Xlsx(String),
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound => write!(f, "Not Found"),
            ServerError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            ServerError::Snapshot(msg) => write!(f, "Snapshot error: {msg}"),
            ServerError::Store(msg) => write!(f, "Preference store error: {msg}"),
            ServerError::Xlsx(msg) => write!(f, "Spreadsheet error: {msg}"),
            ServerError::InternalError => write!(f, "Internal Server Error"),
        }
    }
}

impl std::error::Error for ServerError {}
