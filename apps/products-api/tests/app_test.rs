//! Routing tests for the assembled Products API
//!
//! The database is a sea-orm `MockDatabase`, so these run without Docker and
//! check only that every surface is mounted where clients expect it.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use core_config::server::ServerConfig;
use core_config::{Environment, app_info};
use database::postgres::PostgresConfig;
use domain_products::entity;
use http_body_util::BodyExt;
use products_api::config::DEFAULT_STATIC_DIR;
use products_api::{AppState, Config, app};
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tower::ServiceExt; // For oneshot()

fn router(db: DatabaseConnection) -> Router {
    let state = AppState {
        config: Config {
            app: app_info!(),
            database: PostgresConfig::new("postgres://localhost/products"),
            server: ServerConfig::default(),
            environment: Environment::Development,
            run_migrations: false,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        },
        db,
    };
    app(&state).unwrap()
}

fn idle_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

async fn call(router: Router, method: &str, uri: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    router.oneshot(request).await.unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

async fn json_body(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn test_health_reports_name_and_version() {
    let response = call(router(idle_db()), "GET", "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], 200);
    assert_eq!(body["message"], "OK");
    assert_eq!(body["name"], "products_api");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_ready_when_database_answers() {
    let row: BTreeMap<&str, sea_orm::Value> = BTreeMap::from([("?column?", 1i32.into())]);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row]])
        .into_connection();

    let response = call(router(db), "GET", "/ready").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_not_ready_when_database_fails() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("connection refused".to_string())])
        .into_connection();

    let response = call(router(db), "GET", "/ready").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = json_body(response).await;
    assert_eq!(body["status"], "not ready");
    assert_eq!(body["database"], "disconnected");
}

#[tokio::test]
async fn test_root_serves_admin_page() {
    let response = call(router(idle_db()), "GET", "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(page.contains("Product Catalog Administration"));
}

#[tokio::test]
async fn test_products_are_mounted_at_root() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<entity::Model>::new()])
        .into_connection();

    let response = call(router(db), "GET", "/products").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn test_database_errors_are_not_leaked() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("password authentication failed".to_string())])
        .into_connection();

    let response = call(router(db), "GET", "/products/1").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response).await;
    assert_eq!(body["error"], "DATABASE_ERROR");
    assert!(!body["message"].as_str().unwrap().contains("password"));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let response = call(router(idle_db()), "GET", "/api-docs/openapi.json").await;
    assert_eq!(response.status(), StatusCode::OK);

    let doc = json_body(response).await;
    assert!(doc["paths"]["/products/{id}"].is_object());
}

#[tokio::test]
async fn test_unknown_route_and_method() {
    let response = call(router(idle_db()), "GET", "/nothing-here").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"], "NOT_FOUND");

    let response = call(router(idle_db()), "PATCH", "/products").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json_body(response).await["error"], "METHOD_NOT_ALLOWED");
}
