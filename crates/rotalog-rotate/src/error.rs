//! Error types for the rotating writers

use tracing_appender::rolling::InitError;

/// Errors raised while building a rotating writer
#[derive(Debug, thiserror::Error)]
pub enum RotateError {
    #[error("Filename must not be empty")]
    EmptyFilename,

    #[error("Invalid log filename: {0}")]
    InvalidFilename(String),

    #[error("Failed to create time-rotated writer: {0}")]
    TimeWriter(#[from] InitError),

    #[error("Failed to create size-rotated writer: {0}")]
    SizeWriter(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RotateError>;
