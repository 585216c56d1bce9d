//! HTTP-level helpers: CORS, security headers and request media type checks.

pub mod content_type;
pub mod cors;
pub mod security;

pub use content_type::{APPLICATION_JSON, UnsupportedMediaType, require_json_content_type};
pub use cors::{create_cors_layer, parse_allowed_origins};
pub use security::security_headers;
