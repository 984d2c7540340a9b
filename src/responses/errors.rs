use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use serde::Serialize;

/// Wire shape of one API error.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

/// Convert a ServerError into the response the caller can digest: JSON for
/// the API routes, a plain HTML page for everything else.
pub fn error_to_response(err: ServerError, api: bool) -> Response {
    let (status, code, message) = match err {
        ServerError::NotFound => (404, "not_found", "Not Found".to_string()),
        ServerError::BadRequest(msg) => (400, "bad_request", msg),
        ServerError::Snapshot(msg) => (500, "snapshot_error", msg),
        ServerError::Store(msg) => (500, "store_error", msg),
        ServerError::Xlsx(msg) => (500, "export_error", msg),
        ServerError::InternalError => {
            (500, "internal_error", "Internal Server Error".to_string())
        }
    };

    if api {
        json_error_response(status, code, message)
    } else {
        html_error_response(status, &message)
    }
}

fn json_error_response(status: u16, code: &'static str, message: String) -> Response {
    let payload = ErrorEnvelope {
        error: ErrorBody { code, message },
    };
    let body = serde_json::to_string(&payload).unwrap();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body))
        .unwrap()
}

/// Build an HTML error page
pub fn html_error_response(status: u16, message: &str) -> Response {
    let html = format!(
        "<!DOCTYPE html>
        <html lang=\"en\">
        <head><meta charset=\"utf-8\"><title>Error {status}</title></head>
        <body>
            <h1>Error {status}</h1>
            <p>{message}</p>
        </body>
        </html>"
    );

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(html))
        .unwrap()
}
