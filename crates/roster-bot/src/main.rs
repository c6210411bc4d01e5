//! Roster bot entry point
//!
//! Run with:
//! ```bash
//! cargo run -p roster-bot
//! ```
//!
//! Configuration is loaded from environment variables (a `.env` file is
//! honored when present).

use roster_common::{try_init_tracing, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize tracing
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    // Run the bot
    if let Err(e) = run().await {
        error!(error = %e, "Bot failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting roster bot...");

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        database = %config.database.url,
        "Configuration loaded"
    );

    // Run the bot
    roster_bot::run(config).await?;

    Ok(())
}
