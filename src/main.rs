//! Main entry point for the catalog server.
//!
//! This module loads environment variables and configuration, initializes
//! logging and serves the authors/books HTTP API until interrupted.

mod api;
mod cli;
mod config;
mod db;
mod errors;
mod schema;
mod utils;

use clap::Parser;
use tracing::{error, info, warn};

/// Main entry point that initializes and runs the application.
///
/// # Initialization steps:
/// 1. Load environment variables from `.env`
/// 2. Parse CLI arguments and resolve configuration
/// 3. Initialize logging system
/// 4. Open the database and serve the API
#[tokio::main]
async fn main() {
    let dotenv_result = dotenvy::dotenv();
    let cli = cli::Cli::parse();

    let config = match config::load_server_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let _log_guard = utils::init_logging(&config.logging_level, config.log_to_file);
    if let Err(e) = dotenv_result {
        warn!("Failed to load .env file: {}", e);
    }

    info!(
        database = %config.database_path,
        pool_size = config.pool_size,
        "Starting catalog API"
    );
    if let Err(e) = api::server::launch_server(&config).await {
        error!("Server failed: {}", e);
        std::process::exit(1);
    }
}
