//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! - **[`server`]**: router assembly with OpenAPI docs, health checks, graceful shutdown
//! - **[`http`]**: CORS, security headers, JSON media type guard
//! - **[`errors`]**: `AppError` and the standard JSON error body
//! - **[`extractors`]**: integer id path extractor
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! let router = create_router::<ApiDoc>(Router::new())?;
//! create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, OPENAPI_JSON_PATH, ShutdownCoordinator,
    create_production_app, create_router, health_router, run_health_checks,
};

pub use http::{
    UnsupportedMediaType, create_cors_layer, require_json_content_type, security_headers,
};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::IdPath;
