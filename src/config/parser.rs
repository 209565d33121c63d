use super::ServerConfig;
use crate::cli::Cli;
use std::fs;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Resolves the server configuration from defaults, an optional YAML file and
/// the command line, in increasing order of precedence
///
/// # Arguments
///
/// * `cli` - Parsed command line; its `config` field names the YAML file, if any
///
/// # Errors
///
/// Returns an error if:
/// * The file cannot be read
/// * The YAML content cannot be parsed into a ServerConfig
/// * The resulting settings are unusable (port 0, empty pool)
pub fn load_server_config(cli: &Cli) -> Result<ServerConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => {
            let yaml_str = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            parse_server_config(&yaml_str).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?
        }
        None => ServerConfig::default(),
    };

    if let Some(host) = &cli.host {
        config.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(database_path) = &cli.database_path {
        config.database_path = database_path.clone();
    }
    if let Some(pool_size) = cli.pool_size {
        config.pool_size = pool_size;
    }
    if let Some(level) = &cli.logging_level {
        config.logging_level = level.clone();
    }
    if cli.log_to_file {
        config.log_to_file = true;
    }

    if config.port == 0 {
        return Err(ConfigError::Invalid("port must be non-zero".to_string()));
    }
    if config.pool_size == 0 {
        return Err(ConfigError::Invalid(
            "pool_size must be at least 1".to_string(),
        ));
    }

    Ok(config)
}

fn parse_server_config(yaml_str: &str) -> Result<ServerConfig, serde_yaml::Error> {
    if yaml_str.trim().is_empty() {
        return Ok(ServerConfig::default());
    }
    serde_yaml::from_str(yaml_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = parse_server_config("port: 9090\ndatabase_path: /tmp/lib.db\n").unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.database_path, "/tmp/lib.db");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.pool_size, 8);
    }

    #[test]
    fn empty_file_is_defaults() {
        assert_eq!(parse_server_config("\n").unwrap(), ServerConfig::default());
    }

    #[test]
    fn cli_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port: 9090\nlogging_level: warn\npool_size: 2").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = Cli::try_parse_from(["catalog", "--config", &path, "--port", "7070"]).unwrap();
        let config = load_server_config(&cli).unwrap();

        assert_eq!(config.port, 7070);
        assert_eq!(config.logging_level, "warn");
        assert_eq!(config.pool_size, 2);
    }

    #[test]
    fn missing_file_is_reported() {
        let cli = Cli::try_parse_from(["catalog", "--config", "/nonexistent/catalog.yaml"]).unwrap();
        assert!(matches!(
            load_server_config(&cli),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn zero_pool_is_rejected() {
        let cli = Cli::try_parse_from(["catalog", "--pool-size", "0"]).unwrap();
        assert!(matches!(
            load_server_config(&cli),
            Err(ConfigError::Invalid(_))
        ));
    }
}
