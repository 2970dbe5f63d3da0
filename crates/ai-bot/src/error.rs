use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a [`BotConfig`](crate::BotConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
