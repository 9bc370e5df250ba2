//! Command implementations

pub mod check;
pub mod emit;

use anyhow::{Context, Result};
use rotalog::Config;
use rotalog_core::constants::{find_config, CONFIG_FILES};
use std::path::{Path, PathBuf};

/// Config path given on the command line, or the first default file in the
/// current directory
pub fn resolve_config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    find_config(&cwd).with_context(|| {
        format!(
            "No config given and none of {} found in {}",
            CONFIG_FILES.join(", "),
            cwd.display()
        )
    })
}

/// Load and validate the config at `path`
pub fn load_config(path: &Path) -> Result<Config> {
    let config = Config::load(path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;
    config.validate()?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}
