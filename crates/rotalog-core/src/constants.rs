//! Constants and default values for rotalog

/// Size threshold used when `MaxSize` is 0 (100MB)
pub use rotalog_rotate::DEFAULT_MAX_SIZE_MB;

/// Suffix of the directory holding the size-rotated family, next to `Filename`
pub const SIZE_DIR_SUFFIX: &str = ".size";

/// Message of the confirmation event emitted by a successful init
pub const INIT_SUCCESS_MESSAGE: &str = "log init success";

/// Message of the fatal diagnostic emitted when the time writer cannot be built
pub const TIME_WRITER_FAILED_MESSAGE: &str = "Failed to create rotatelogs handler";

/// Default config file names to search for (in priority order)
pub const CONFIG_FILES: &[&str] = &["rotalog.json", "rotalog.toml", "rotalog.yaml", "rotalog.yml"];

/// Find the first default config file present in `dir`
pub fn find_config(dir: &std::path::Path) -> Option<std::path::PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}
