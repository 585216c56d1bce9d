//! Health check endpoints

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, health_router, run_health_checks};
use sea_orm::DatabaseConnection;

use crate::state::AppState;

/// Readiness: the database answers a trivial query
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Database reachable", body = serde_json::Value,
            example = json!({"status": "ready", "database": "connected"})),
        (status = 503, description = "Database unreachable", body = serde_json::Value,
            example = json!({"status": "not ready", "database": "disconnected"}))
    )
)]
pub async fn ready(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    let database: HealthCheckFuture<'_> = Box::pin(async {
        database::postgres::check_health(&db)
            .await
            .map_err(|e| e.to_string())
    });

    run_health_checks(vec![("database", database)]).await
}

/// `/health` (liveness) and `/ready` (readiness)
pub fn router(state: &AppState) -> Router {
    health_router(state.config.app).merge(
        Router::new()
            .route("/ready", get(ready))
            .with_state(state.db.clone()),
    )
}
