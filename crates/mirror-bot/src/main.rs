//! Channel mirror bot entry point
//!
//! Run with:
//! ```bash
//! cargo run -p mirror-bot
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use anyhow::Context;
use mirror_common::{try_init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load configuration first so the log format can follow APP_ENV
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing
    if let Err(e) = try_init_tracing(&TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run(config).await {
        error!(error = ?e, "Bot stopped with an error");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    info!(
        app = %config.app.name,
        env = ?config.app.env,
        admins = config.bot.admin_ids.len(),
        "Starting channel mirror..."
    );

    mirror_bot::run(config, shutdown_signal())
        .await
        .context("bot runtime failed")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
