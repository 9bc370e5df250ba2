//! rotalog - Process-wide structured logging to console and rotated files
//!
//! [`init`] builds three destinations from a [`Config`]:
//! - a size-rotated family in `<Filename>.size/`
//! - a time-rotated family (`<Filename>.YYYY-MM-DD`, or `-HH` for hourly
//!   windows), with `Filename` kept as a link to the current file
//! - human-readable console output on stdout
//!
//! and installs their fan-out as the global logger. The [`log`] module starts
//! events against whatever logger is installed at call time:
//!
//! ```rust,ignore
//! use rotalog::{log, Config};
//!
//! rotalog::init(&Config::load("rotalog.json".as_ref())?)?;
//! log::info().str("component", "api").msg("listening");
//! ```

mod bridge;
mod console;
mod event;
mod global;
mod hook;
mod init;
mod level;
mod logger;
mod record;
mod sampler;
mod scope;
mod writer;

pub mod log;

pub use bridge::RotalogLayer;
pub use console::{ConsoleWriter, DEFAULT_TIME_FORMAT};
pub use event::Event;
pub use global::{global, LoggerHandle};
pub use hook::{Hook, HookFn, LevelNameHook};
pub use init::{build_sink, init, init_with};
pub use level::{global_level, set_global_level, Level, ParseLevelError};
pub use logger::{Context, Logger};
pub use record::Record;
pub use sampler::{BasicSampler, BurstSampler, Sampler};
pub use scope::Scope;
pub use writer::{DiscardWriter, FilteredLevelWriter, LevelWriter, MultiLevelWriter, SyncWriter};

pub use rotalog_core::{Config, ConfigFormat, Error, Result};
pub use rotalog_rotate::RotateError;
