//! CLI argument definitions and parsing.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[clap(
    name = "club-manager",
    version,
    about = "Sports club management backend"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API.
    Serve {
        /// TOML configuration file; built-in defaults when omitted.
        #[clap(long, short)]
        config: Option<PathBuf>,

        /// Listen address, overriding `server.bind_address`.
        #[clap(long, short)]
        bind: Option<String>,
    },

    /// Create the database file and schema, then exit.
    InitDb {
        /// TOML configuration file.
        #[clap(long, short)]
        config: Option<PathBuf>,

        /// Database file (or set `CLUB_MANAGER_DATABASE`).
        #[clap(long, short)]
        database: Option<PathBuf>,
    },

    /// Load and validate a configuration file, then print the result.
    CheckConfig {
        #[clap(long, short)]
        config: PathBuf,
    },
}

impl Commands {
    /// Configuration file named on the command line, if any.
    pub fn config_path(&self) -> Option<&Path> {
        match self {
            Commands::Serve { config, .. } | Commands::InitDb { config, .. } => config.as_deref(),
            Commands::CheckConfig { config } => Some(config.as_path()),
        }
    }
}
