//! Sink configuration parsing
//!
//! The configuration is usually a JSON document, but TOML and YAML files
//! are accepted as well:
//! - TOML (.toml)
//! - YAML (.yaml, .yml)
//! - JSON (.json)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use rotalog_rotate::TimeWindow;

use crate::constants::{DEFAULT_MAX_SIZE_MB, SIZE_DIR_SUFFIX};
use crate::error::{Error, Result};

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(ConfigFormat::Toml),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }

    /// Detect format from file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Rotation policy for the file destinations.
///
/// Keys are serialized in PascalCase (`Filename`, `MaxSize`, ...) and every
/// field is required. Values are passed to the rotation writers unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    /// Base path for the rotated log files
    pub filename: PathBuf,
    /// Size threshold in megabytes that triggers size-based rotation
    pub max_size: u64,
    /// Days of time-rotated files to retain
    pub max_age: u64,
    /// Maximum number of size-rotated backups to keep
    pub max_backups: usize,
    /// Gzip-compress size-rotated backups
    pub compress: bool,
    /// Hours between time-based rotations
    pub rotation_time: u64,
}

impl Config {
    /// Load config from file, automatically detecting format from extension
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            Error::ConfigError(format!(
                "Unsupported config file extension: {}. Expected .toml, .yaml, .yml, or .json",
                path.display()
            ))
        })?;

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    /// Parse config content with specified format
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        match format {
            ConfigFormat::Toml => Self::from_toml(content),
            ConfigFormat::Yaml => Self::from_yaml(content),
            ConfigFormat::Json => Self::from_json(content),
        }
    }

    /// Parse TOML config content
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parse YAML config content
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse JSON config content
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Reject values no writer can work with.
    ///
    /// Zero sizes, ages and intervals are legal and keep their writer-level
    /// meaning, so only the filename is checked here.
    pub fn validate(&self) -> Result<()> {
        if self.filename.as_os_str().is_empty() {
            return Err(Error::config("Filename must not be empty"));
        }
        Ok(())
    }

    /// Size threshold in megabytes (`MaxSize` of 0 selects the default)
    pub fn max_size_mb(&self) -> u64 {
        if self.max_size == 0 {
            DEFAULT_MAX_SIZE_MB
        } else {
            self.max_size
        }
    }

    /// Active file of the size-rotated family: `<Filename>.size/<name>`.
    ///
    /// `Filename` itself is the link to the current time-rotated file.
    pub fn size_path(&self) -> PathBuf {
        let Some(name) = self.filename.file_name() else {
            return self.filename.clone();
        };
        let mut dir = self.filename.as_os_str().to_os_string();
        dir.push(SIZE_DIR_SUFFIX);
        PathBuf::from(dir).join(name)
    }

    /// Window of the time-rotated files
    pub fn time_window(&self) -> TimeWindow {
        TimeWindow::from_interval(self.rotation_interval())
    }

    /// Naming of the time-rotated files, e.g. `/var/log/app.log.%Y-%m-%d`
    pub fn time_files(&self) -> String {
        format!(
            "{}.{}",
            self.filename.display(),
            self.time_window().date_format()
        )
    }

    /// Retention window shared by both writers
    pub fn max_age(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.max_age.saturating_mul(24 * 60 * 60))
    }

    /// Interval between time-based rotations
    pub fn rotation_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.rotation_time.saturating_mul(60 * 60))
    }
}
