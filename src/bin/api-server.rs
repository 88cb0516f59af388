//! StockPulse API Server
//!
//! Serves the signal dashboard (stats strip and per-symbol cards) as JSON,
//! backed by the signal backend configured in the environment.

use dotenvy::dotenv;
use stockpulse::config::Config;
use stockpulse::core::http::start_server;
use stockpulse::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let config = Config::from_env();
    logging::init_logging_for(&config.environment);

    info!("Starting StockPulse API Server");
    info!(environment = %config.environment, "Environment");
    info!(backend = %config.backend_url, "Signal backend");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(&config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
