use crate::errors::{ResultResp, ServerError};
use astra::{Body, ResponseBuilder};
use serde::Serialize;

/// Success envelope of every JSON endpoint: the payload sits under `data`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

pub fn json_response<T: Serialize>(data: T) -> ResultResp {
    let payload = ApiResponse { data };
    let body = serde_json::to_string(&payload).map_err(|_| ServerError::InternalError)?;

    let resp = ResponseBuilder::new()
        .status(200)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)?;

    Ok(resp)
}
