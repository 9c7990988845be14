//! Serve command implementation

use super::shared::CommandStats;
use crate::cli::args::ServeArgs;
use crate::config::ServeConfig;
use crate::server;
use anyhow::{Context, Result};
use std::time::Instant;
use tracing::info;

/// Serve command runner; returns once the service has shut down
pub async fn run_serve(args: ServeArgs) -> Result<CommandStats> {
    let start_time = Instant::now();
    let config = ServeConfig::from(args);

    info!("Starting upload service on {}", config.bind);
    server::run(config)
        .await
        .context("Upload service failed")?;

    Ok(CommandStats {
        elapsed: start_time.elapsed(),
        ..Default::default()
    })
}
