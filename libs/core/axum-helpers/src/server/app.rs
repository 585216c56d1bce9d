use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::{method_not_allowed, not_found};
use crate::http::{create_cors_layer, parse_allowed_origins, security_headers};
use axum::{Json, Router, middleware, routing::get};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable as RedocServable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};

/// Path of the generated OpenAPI document
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Wrap the API routes with documentation and cross-cutting middleware.
///
/// - OpenAPI JSON at [`OPENAPI_JSON_PATH`] with Scalar (`/scalar`),
///   ReDoc (`/redoc`) and RapiDoc (`/rapidoc`) viewers
/// - `apis` merged at the root, so `/products` stays `/products`
/// - JSON 404 and 405 fallbacks
/// - tracing, security headers, optional CORS, compression
///
/// CORS is installed only when `CORS_ALLOWED_ORIGIN` holds at least one
/// origin (comma-separated).
///
/// # Errors
/// Returns `InvalidInput` if `CORS_ALLOWED_ORIGIN` contains an invalid origin.
pub fn create_router<T>(apis: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let openapi = T::openapi();

    let mut router = Router::new()
        .route(OPENAPI_JSON_PATH, get(move || async move { Json(T::openapi()) }))
        .merge(Scalar::with_url("/scalar", openapi.clone()))
        .merge(Redoc::with_url("/redoc", openapi))
        .merge(RapiDoc::new(OPENAPI_JSON_PATH).path("/rapidoc"))
        .merge(apis)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers));

    match cors_origins_from_env()? {
        Some(origins) => {
            info!(origins = origins.len(), "CORS enabled");
            router = router.layer(create_cors_layer(origins));
        }
        None => info!("CORS_ALLOWED_ORIGIN not set, CORS layer disabled"),
    }

    Ok(router.layer(CompressionLayer::new()))
}

fn cors_origins_from_env() -> io::Result<Option<Vec<axum::http::HeaderValue>>> {
    match std::env::var("CORS_ALLOWED_ORIGIN") {
        Ok(raw) => parse_allowed_origins(&raw).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        }),
        Err(_) => Ok(None),
    }
}

/// Serve `router` until SIGINT/SIGTERM, then run `cleanup`.
///
/// In-flight requests are drained first. `cleanup` (closing the pool, for
/// instance) is bounded by `shutdown_timeout`.
///
/// ```ignore
/// let cleanup = async move {
///     db.close().await.ok();
/// };
/// create_production_app(router, &config, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, mut shutdown_rx) = ShutdownCoordinator::new();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let signal_handle = {
        let coordinator = coordinator.clone();
        tokio::spawn(async move { coordinator.wait_for_signal().await })
    };

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
        })
        .await
        .inspect_err(|e| tracing::error!("Server encountered an error: {:?}", e));

    signal_handle.abort();

    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}
