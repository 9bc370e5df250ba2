//! Error types for rotalog

use std::path::PathBuf;

use rotalog_rotate::RotateError;

/// rotalog error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to create rotation writer: {0}")]
    RotationWriter(#[source] RotateError),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Result type alias for rotalog
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::ConfigError(msg.into())
    }
}

impl From<RotateError> for Error {
    fn from(err: RotateError) -> Self {
        Error::RotationWriter(err)
    }
}
