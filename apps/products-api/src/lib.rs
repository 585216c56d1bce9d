//! Products API
//!
//! REST service for the product catalog.
//!
//! ## Architecture
//!
//! ```text
//! Client
//!   ↓ (HTTP/JSON)
//! axum router (api/) + OpenAPI viewers + health probes
//!   ↓
//! ProductService (domain layer)
//!   ↓
//! PgProductRepository (sea-orm)
//!   ↓
//! PostgreSQL
//! ```
//!
//! ## Modules
//!
//! - `server`: startup, migrations and graceful shutdown
//! - `api`: route assembly for products, health and the admin page

pub mod api;
pub mod config;
pub mod openapi;
pub mod server;
pub mod state;

use axum::Router;
use std::io;

pub use config::Config;
pub use server::run;
pub use state::AppState;

/// Full application router: API routes wrapped with docs and middleware
pub fn app(state: &AppState) -> io::Result<Router> {
    axum_helpers::create_router::<openapi::ApiDoc>(api::routes(state))
}
