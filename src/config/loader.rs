//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Default config file location: `~/.config/command-gateway/config.toml`.
pub fn default_config_path() -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_default();
    home.join(".config").join("command-gateway").join("config.toml")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

/// Semantic checks; serde has already handled the syntactic ones.
fn validate(config: &GatewayConfig) -> Result<(), ConfigError> {
    if config.backend.port == 0 {
        return Err(ConfigError::Invalid("backend.port must be non-zero".into()));
    }
    if config.backend.port == u16::MAX {
        return Err(ConfigError::Invalid(
            "backend.port + 1 must fit in a port number".into(),
        ));
    }
    if config.deadlines.default_ms == 0 || config.deadlines.extended_ms == 0 {
        return Err(ConfigError::Invalid("deadlines must be non-zero".into()));
    }
    if config.deadlines.extended_ms < config.deadlines.default_ms {
        return Err(ConfigError::Invalid(
            "deadlines.extended_ms must be >= deadlines.default_ms".into(),
        ));
    }
    Ok(())
}
