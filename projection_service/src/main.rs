use std::sync::Arc;

use anyhow::{Context, Result};
use projection_service::{api, config::LocalConfig, utils};
use tracing::{error, info, warn};

/// Main entry point for the Projection Service
///
/// This function performs the following steps:
/// 1. Initializes the pre-run environment
/// 2. Loads the configuration
/// 3. Starts the HTTP server
/// 4. Handles if the server fails or panics
#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    init_pre_run()?;

    info!("Starting the Projection Service");

    let local_config = Arc::new(LocalConfig::load_from_env()?);

    let server_handle = tokio::spawn(api::start_server(local_config));

    match server_handle.await {
        Ok(Ok(())) => {
            info!("Projection server stopped");
            Ok(())
        }
        Ok(Err(e)) => {
            let error_message = e
                .chain()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join(" -> ");
            error!("Projection server failed with error: {}", error_message);
            Err(anyhow::anyhow!("Projection server failed: {}", error_message))
        }
        Err(e) => {
            error!("Projection server task panicked: {}", e);
            Err(anyhow::anyhow!("Projection server task panicked: {}", e))
        }
    }
}

/// Initializes the pre-run environment
///
/// This function performs the following steps:
/// 1. Loads environment variables from the `.env` file, if present
/// 2. Sets up the logger
///
/// # Returns
/// * `Result<()>` - Success or error if the logger cannot be installed
fn init_pre_run() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    utils::logger::setup_logger().context("Failed to setup logger")?;

    if let Err(e) = dotenv {
        warn!("No .env file loaded: {}", e);
    }

    Ok(())
}
