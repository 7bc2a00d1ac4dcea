use std::path::PathBuf;

use looprail_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid duration for {key}: '{value}'")]
    InvalidDuration {
        key: String,
        value: String,
        #[source]
        source: humantime::DurationError,
    },
    #[error("invalid number for {key}: '{value}'")]
    InvalidNumber { key: String, value: String },
    #[error("invalid boolean for {key}: '{value}'")]
    InvalidBool { key: String, value: String },
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
    #[error("configuration rejected")]
    Invalid(#[from] ConfigError),
}
