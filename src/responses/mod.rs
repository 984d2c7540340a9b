pub mod errors;
pub mod html;
pub mod json;
pub mod xlsx;

pub use errors::{error_to_response, html_error_response};
pub use html::html_response;
pub use json::{json_response, ApiResponse};
pub use xlsx::xlsx_response;
