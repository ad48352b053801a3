//! Referee - Brave Rats match runner
//!
//! A batch process that:
//! 1. Builds a brain for each side (UCT search or uniform random)
//! 2. Plays matches concurrently, honouring the Spy's reveal order
//! 3. Appends every finished match to `<data_dir>/matches.jsonl`
//! 4. Keeps `<data_dir>/referee_stats.json` up to date

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

mod brain;
mod config;
mod referee;
mod replay;
mod stats;

use crate::config::Config;
use crate::referee::Referee;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse().with_central_fallbacks();

    // Validate configuration
    config.validate()?;

    // Initialize tracing
    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    info!(
        "Starting referee: {} matches, {} vs {}",
        config.matches, config.red_brain, config.blue_brain
    );

    let referee = Arc::new(Referee::new(config)?);

    // Setup graceful shutdown: matches in flight finish, no new ones start
    let shutdown_referee = Arc::clone(&referee);
    let shutdown_handle = tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received, finishing matches in progress...");
                shutdown_referee.shutdown();
            }
            Err(e) => warn!("Failed to listen for ctrl+c: {}", e),
        }
    });

    let run_result = referee.run().await;
    shutdown_handle.abort();

    match run_result {
        Ok(()) => {
            info!("Referee completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Referee failed: {:#}", e);
            Err(e)
        }
    }
}
