use clap::Parser;

/// Command line interface for the catalog server
#[derive(Parser, Debug)]
#[command(name = "catalog", about = "HTTP API for a library catalog of authors and books")]
pub struct Cli {
    /// Path to a YAML file with server settings
    #[arg(short, long)]
    pub config: Option<String>,

    /// Address to bind the HTTP listener to
    #[arg(long, env = "CATALOG_HOST")]
    pub host: Option<String>,

    /// Port to bind the HTTP listener to
    #[arg(short, long, env = "CATALOG_PORT")]
    pub port: Option<u16>,

    /// Path of the SQLite database file
    #[arg(long, env = "DATABASE_PATH")]
    pub database_path: Option<String>,

    /// Maximum number of pooled database connections
    #[arg(long)]
    pub pool_size: Option<u32>,

    /// Sets the logging verbosity level for the application
    /// Possible values: "error", "warn", "info", "debug", "trace"
    #[arg(long)]
    pub logging_level: Option<String>,

    /// Also write logs to a daily rotating file under `logs/`
    #[arg(long)]
    pub log_to_file: bool,
}
