use axum::http::{HeaderValue, Method, header};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Parse a comma-separated origin list such as `CORS_ALLOWED_ORIGIN`.
///
/// Blank entries are skipped. Returns `Ok(None)` when nothing remains.
pub fn parse_allowed_origins(raw: &str) -> Result<Option<Vec<HeaderValue>>, String> {
    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<HeaderValue>()
                .map_err(|e| format!("invalid origin '{}': {}", s, e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((!origins.is_empty()).then_some(origins))
}

/// CORS layer for the catalog API.
///
/// - Methods: GET, POST, PUT, DELETE, OPTIONS
/// - Headers: Content-Type, Accept
/// - 1 hour max age
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}
