//! PORTICO Server — application entry point.
//!
//! Initializes tracing, connects to the backend (fatal on failure),
//! runs schema migrations, and waits for shutdown. Transport layers
//! mount on top of the directory services; none is wired here.

use tracing_subscriber::EnvFilter;

use portico_db::{DbConfig, DbManager, run_migrations};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("portico=info".parse().unwrap()),
        )
        .json()
        .init();

    tracing::info!("Starting PORTICO directory server...");

    let config = DbConfig::from_env();
    let manager = match DbManager::connect(&config).await {
        Ok(manager) => manager,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to the backend store");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(manager.client()).await {
        tracing::error!(error = %e, "Schema migration failed");
        std::process::exit(1);
    }

    tracing::info!("Directory ready");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }

    tracing::info!("PORTICO directory server stopped.");
}
