//! Free functions over the global logger.
//!
//! Each call reads the logger installed at that moment, so events started
//! after [`crate::init`] go to the configured sink.
//!
//! ```rust,ignore
//! use rotalog::log;
//!
//! log::info().str("user", "ada").msg("logged in");
//! log::err(result.err().as_ref().map(|e| e as _)).msg("sync finished");
//! ```

use std::fmt;

use crate::event::Event;
use crate::global::global;
use crate::hook::Hook;
use crate::level::Level;
use crate::logger::{Context, Logger};
use crate::sampler::Sampler;
use crate::scope::Scope;
use crate::writer::LevelWriter;

/// Copy of the global logger writing to `writer`
pub fn output(writer: impl LevelWriter + 'static) -> Logger {
    global().output(writer)
}

/// Child of the global logger with extra context fields
pub fn with() -> Context {
    global().with()
}

/// Child of the global logger with minimum level `level`
pub fn level(level: Level) -> Logger {
    global().level(level)
}

/// Child of the global logger using `sampler`
pub fn sample(sampler: impl Sampler + 'static) -> Logger {
    global().sample(sampler)
}

/// Child of the global logger running `hook`
pub fn hook(hook: impl Hook + 'static) -> Logger {
    global().hook(hook)
}

/// Error event with `err` attached, or an info event when `err` is `None`.
///
/// You must call `msg` on the returned event in order to send it.
pub fn err(err: Option<&dyn std::error::Error>) -> Event {
    global().err(err)
}

/// Trace event. You must call `msg` on the returned event in order to send it.
pub fn trace() -> Event {
    global().trace()
}

/// Debug event. You must call `msg` on the returned event in order to send it.
pub fn debug() -> Event {
    global().debug()
}

/// Info event. You must call `msg` on the returned event in order to send it.
pub fn info() -> Event {
    global().info()
}

/// Warn event. You must call `msg` on the returned event in order to send it.
pub fn warn() -> Event {
    global().warn()
}

/// Error event. You must call `msg` on the returned event in order to send it.
pub fn error() -> Event {
    global().error()
}

/// Fatal event. The process exits with status 1 once `msg` has written it.
pub fn fatal() -> Event {
    global().fatal()
}

/// Panic event. `msg` panics with the message once the record is written.
pub fn panic() -> Event {
    global().panic()
}

/// Event at `level`. Never exits or panics, even for fatal and panic levels.
pub fn with_level(level: Level) -> Event {
    global().with_level(level)
}

/// Event without a level; a global level of `Disabled` still drops it.
pub fn log() -> Event {
    global().log()
}

/// Debug record with `value` as message, sent immediately
pub fn print(value: impl fmt::Display) {
    global().print(value)
}

/// Debug record with a formatted message, sent immediately
pub fn printf(args: fmt::Arguments<'_>) {
    global().printf(args)
}

/// Logger carried by `scope`; a disabled logger if it carries none
pub fn ctx(scope: &Scope) -> Logger {
    global().ctx(scope)
}
