//! Entry point: parse CLI, load configuration and dispatch to commands.

use anyhow::Context;
use clap::Parser;
use club_manager::{
    cli::{Cli, Commands},
    commands::{handle_check_config, handle_init_db, handle_serve},
    config::{load_config, AppConfig, LoggingConfig},
};
use tracing_subscriber::EnvFilter;

fn init_tracing(logging: &LoggingConfig) {
    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = Cli::parse();

    let config = match app.command.config_path() {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => AppConfig::default(),
    };
    init_tracing(&config.logging);

    match app.command {
        Commands::Serve { bind, .. } => handle_serve(config, bind)
            .await
            .context("server exited with an error")?,
        Commands::InitDb { database, .. } => {
            handle_init_db(&config, database).context("failed to initialize database")?;
        }
        Commands::CheckConfig { .. } => {
            handle_check_config(&config)?;
        }
    }

    Ok(())
}
