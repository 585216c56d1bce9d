//! Server initialization and lifecycle management

use axum_helpers::create_production_app;
use core_config::tracing::init_tracing;
use eyre::{Result, WrapErr};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::Config;
use crate::state::AppState;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Run the HTTP server
///
/// 1. Loads configuration and sets up structured logging
/// 2. Connects to the database with retry logic
/// 3. Applies migrations unless `RUN_MIGRATIONS=false`
/// 4. Serves until SIGINT/SIGTERM, then closes the pool
pub async fn run() -> Result<()> {
    let config = Config::from_env().wrap_err("Failed to load configuration")?;
    init_tracing(&config.environment);

    info!(
        max_connections = config.database.max_connections,
        "Connecting to database"
    );
    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .wrap_err("Failed to connect to database")?;
    info!("Connected to database successfully");

    if config.run_migrations {
        database::postgres::run_migrations::<migration::Migrator>(&db, config.app.name)
            .await
            .wrap_err("Failed to apply migrations")?;
    }

    let state = AppState {
        config: config.clone(),
        db: db.clone(),
    };
    let app = crate::app(&state).wrap_err("Failed to build router")?;

    info!(
        name = config.app.name,
        version = config.app.version,
        "Starting Products API on {}",
        config.server.address()
    );

    create_production_app(app, &config.server, SHUTDOWN_TIMEOUT, async move {
        info!("Shutting down: closing database connections");
        match db.close().await {
            Ok(()) => info!("Database connection closed"),
            Err(e) => warn!(error = %e, "Failed to close database connection"),
        }
    })
    .await
    .wrap_err("Server error")?;

    info!("Products API shutdown complete");
    Ok(())
}
