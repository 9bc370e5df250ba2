//! Severity levels and the process-wide level floor

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI8, Ordering};

/// Severity of a log event, ordered from least to most severe.
///
/// `NoLevel` marks events started without a level; they pass every filter
/// except `Disabled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum Level {
    Trace = -1,
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
    Panic = 5,
    NoLevel = 6,
    Disabled = 7,
}

impl Level {
    /// Value of the `level` field in serialized records
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
            Level::Panic => "panic",
            Level::NoLevel => "",
            Level::Disabled => "disabled",
        }
    }

    fn from_i8(value: i8) -> Self {
        match value {
            -1 => Level::Trace,
            0 => Level::Debug,
            1 => Level::Info,
            2 => Level::Warn,
            3 => Level::Error,
            4 => Level::Fatal,
            5 => Level::Panic,
            6 => Level::NoLevel,
            _ => Level::Disabled,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown level: {0}")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            "panic" => Ok(Level::Panic),
            "" => Ok(Level::NoLevel),
            "disabled" => Ok(Level::Disabled),
            other => Err(ParseLevelError(other.to_string())),
        }
    }
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => Level::Trace,
            tracing::Level::DEBUG => Level::Debug,
            tracing::Level::INFO => Level::Info,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::ERROR => Level::Error,
        }
    }
}

static GLOBAL_LEVEL: AtomicI8 = AtomicI8::new(Level::Trace as i8);

/// Set the minimum level every logger in the process honours
pub fn set_global_level(level: Level) {
    GLOBAL_LEVEL.store(level as i8, Ordering::SeqCst);
}

/// The process-wide level floor
pub fn global_level() -> Level {
    Level::from_i8(GLOBAL_LEVEL.load(Ordering::SeqCst))
}
