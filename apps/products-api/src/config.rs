//! Configuration for Products API

use core_config::{AppInfo, FromEnv, app_info, env_flag, env_or_default, server::ServerConfig};
use database::postgres::PostgresConfig;
use std::path::PathBuf;

pub use core_config::Environment;

/// Directory holding `index.html` when `STATIC_DIR` is unset
pub const DEFAULT_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Apply pending migrations before serving
    pub run_migrations: bool,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            run_migrations: env_flag("RUN_MIGRATIONS", true)?,
            static_dir: PathBuf::from(env_or_default("STATIC_DIR", DEFAULT_STATIC_DIR)),
        })
    }

    pub fn index_file(&self) -> PathBuf {
        self.static_dir.join("index.html")
    }
}
