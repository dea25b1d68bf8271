//! Configuration loading from disk and environment.

use std::env;
use std::fs;
use std::path::Path;

use crate::config::schema::AppConfig;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration from a TOML file. Semantic validation runs later,
/// after environment and CLI overrides are applied.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AppConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;
    Ok(config)
}

/// Map a database name to a connection path: ":memory:" passes through,
/// anything else becomes "<name>.db".
pub fn database_path(name: &str) -> String {
    if name == ":memory:" {
        name.to_string()
    } else {
        format!("{name}.db")
    }
}

/// Apply environment overrides on top of a loaded configuration.
///
/// `APP_DB_NAME` names the database (mapped through [`database_path`]);
/// `APP_BIND_ADDRESS` overrides the listener address.
pub fn apply_env(config: &mut AppConfig) {
    if let Ok(name) = env::var("APP_DB_NAME") {
        config.database.path = database_path(&name);
    }
    if let Ok(addr) = env::var("APP_BIND_ADDRESS") {
        config.listener.bind_address = addr;
    }
}
