mod parser;
use serde::{Deserialize, Serialize};

pub use parser::load_server_config;

/// Runtime settings of the catalog server
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub host: String,
    /// Port the HTTP listener binds to
    pub port: u16,
    /// Path of the SQLite database file
    pub database_path: String,
    /// Maximum number of pooled database connections
    pub pool_size: u32,
    /// Log filter, e.g. "info" or "catalog=debug,tower_http=info"
    pub logging_level: String,
    /// Whether to also write logs to a daily rotating file under `logs/`
    pub log_to_file: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
            database_path: "catalog.db".to_string(),
            pool_size: 8,
            logging_level: "info".to_string(),
            log_to_file: false,
        }
    }
}
