//! API routes module

pub mod health;
pub mod products;

use axum::Router;
use tower_http::services::ServeFile;

use crate::state::AppState;

/// Create all API routes
///
/// `/` serves the administration page from the configured static directory.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .route_service("/", ServeFile::new(state.config.index_file()))
        .merge(products::router(state))
        .merge(health::router(state))
}
