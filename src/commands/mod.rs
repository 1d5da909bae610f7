//! Command implementations for the club-manager binary

use crate::api::{self, AppState};
use crate::config::AppConfig;
use crate::error::{ClubError, Result};
use crate::mediator::Mediator;
use crate::storage::ClubDatabase;
use std::path::PathBuf;
use tokio::net::TcpListener;

/// Open the database named by `database` or the configuration.
pub fn open_database(config: &AppConfig, database: Option<PathBuf>) -> Result<(ClubDatabase, PathBuf)> {
    let path = match database {
        Some(path) => path,
        None => config.database_path()?,
    };
    let db = ClubDatabase::open(&path)?;
    tracing::info!(path = %path.display(), "database ready");
    Ok((db, path))
}

/// Serve the API until ctrl-c.
pub async fn handle_serve(config: AppConfig, bind: Option<String>) -> Result<()> {
    let mut config = config;
    if let Some(bind) = bind {
        config.server.bind_address = bind;
        config.validate()?;
    }

    let (db, _) = open_database(&config, None)?;
    let state = AppState::new(Mediator::new(db));
    let app = api::router(state, &config.server);

    let listener = TcpListener::bind(config.bind_address()?).await?;
    api::serve(listener, app).await?;
    tracing::info!("server stopped");
    Ok(())
}

/// Create the schema and report where the database lives.
pub fn handle_init_db(config: &AppConfig, database: Option<PathBuf>) -> Result<PathBuf> {
    let (_, path) = open_database(config, database)?;
    println!("Database initialized at {}", path.display());
    Ok(path)
}

/// Print the effective configuration as TOML.
pub fn handle_check_config(config: &AppConfig) -> Result<String> {
    let rendered = toml::to_string_pretty(config).map_err(|e| ClubError::Config {
        message: e.to_string(),
    })?;
    println!("{}", rendered);
    Ok(rendered)
}
