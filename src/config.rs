//! Service configuration loaded from a TOML file.
//!
//! Every section is optional; missing keys take the built-in defaults, so an
//! empty file (or no file at all) yields a usable configuration.

use crate::error::{ClubError, Result};
use crate::storage::ClubDatabase;
use crate::CLUB_MANAGER_DATABASE;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_address: String,
    /// Requests running longer than this are answered with 408
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` takes precedence
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "club_manager=info,tower_http=info".to_string(),
        }
    }
}

impl AppConfig {
    /// Parse and validate configuration text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check semantic constraints, reporting every problem found.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        if self.server.bind_address.parse::<SocketAddr>().is_err() {
            problems.push(format!(
                "server.bind_address '{}' is not a socket address",
                self.server.bind_address
            ));
        }
        if self.server.request_timeout_secs == 0 {
            problems.push("server.request_timeout_secs must be greater than zero".to_string());
        }
        if self.logging.filter.trim().is_empty() {
            problems.push("logging.filter must not be empty".to_string());
        }
        if let Some(path) = &self.database.path {
            if path.as_os_str().is_empty() {
                problems.push("database.path must not be empty".to_string());
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ClubError::Config {
                message: problems.join("; "),
            })
        }
    }

    pub fn bind_address(&self) -> Result<SocketAddr> {
        self.server
            .bind_address
            .parse()
            .map_err(|_| ClubError::Config {
                message: format!("invalid bind address '{}'", self.server.bind_address),
            })
    }

    /// Database file to open: `CLUB_MANAGER_DATABASE`, then the configured
    /// path, then the platform default.
    pub fn database_path(&self) -> Result<PathBuf> {
        resolve_database_path(
            std::env::var_os(CLUB_MANAGER_DATABASE).map(PathBuf::from),
            self.database.path.clone(),
        )
    }
}

fn resolve_database_path(env: Option<PathBuf>, configured: Option<PathBuf>) -> Result<PathBuf> {
    match env.filter(|p| !p.as_os_str().is_empty()).or(configured) {
        Some(path) => Ok(path),
        None => ClubDatabase::default_path(),
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = AppConfig::from_toml(&content)?;
    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}
