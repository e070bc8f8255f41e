//! REST-side capability boundary

pub mod ports;

pub use ports::{HttpRequest, HttpResponse, HttpTransport, RequestBody};

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
pub const APPLICATION_JSON: &str = "application/json";
