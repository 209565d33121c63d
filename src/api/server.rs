use crate::api::routes;
use crate::config::ServerConfig;
use crate::db::Database;
use tracing::{info, warn};

/// Opens the database and serves the catalog API until Ctrl-C is received
///
/// # Arguments
/// * `config` - Resolved server settings
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Ok after a graceful shutdown, Error if startup or serving fails
pub async fn launch_server(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let database = Database::new(&config.database_path, config.pool_size)?;

    let app = routes::app(database);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Catalog API listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
