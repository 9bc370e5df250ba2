//! Loggers and child-logger contexts

use serde::Serialize;
use serde_json::{Map, Value};
use std::cell::Cell;
use std::fmt;
use std::io;
use std::sync::Arc;

use crate::event::{Done, Event, ERROR_FIELD, TIME_FIELD};
use crate::hook::Hook;
use crate::level::{global_level, Level};
use crate::record::Record;
use crate::sampler::Sampler;
use crate::scope::Scope;
use crate::writer::{DiscardWriter, LevelWriter, SyncWriter};

thread_local! {
    static WRITING: Cell<bool> = const { Cell::new(false) };
}

/// Whether the current thread is inside a record write
pub(crate) fn writing_record() -> bool {
    WRITING.with(Cell::get)
}

struct WriteGuard;

impl WriteGuard {
    fn enter() -> Self {
        WRITING.with(|w| w.set(true));
        WriteGuard
    }
}

impl Drop for WriteGuard {
    fn drop(&mut self) {
        WRITING.with(|w| w.set(false));
    }
}

/// Report a record that could not be written
pub(crate) fn report_write_error(err: &dyn fmt::Display) {
    eprintln!("rotalog: write failed: {}", err);
}

/// An immutable logger. Every derivation returns a new logger sharing the
/// same destination.
#[derive(Clone)]
pub struct Logger {
    writer: Arc<dyn LevelWriter>,
    level: Level,
    sampler: Option<Arc<dyn Sampler>>,
    context: Map<String, Value>,
    timestamp: bool,
    hooks: Vec<Arc<dyn Hook>>,
}

impl Logger {
    /// A logger writing every level to `writer`
    pub fn new(writer: impl LevelWriter + 'static) -> Self {
        Self::from_writer(Arc::new(writer))
    }

    pub fn from_writer(writer: Arc<dyn LevelWriter>) -> Self {
        Self {
            writer,
            level: Level::Trace,
            sampler: None,
            context: Map::new(),
            timestamp: false,
            hooks: Vec::new(),
        }
    }

    /// A logger that never writes
    pub fn disabled() -> Self {
        Self {
            level: Level::Disabled,
            ..Self::new(DiscardWriter)
        }
    }

    /// JSON to stderr with timestamps; what the global logger starts as
    pub(crate) fn stderr() -> Self {
        let mut logger = Self::new(SyncWriter::new(io::stderr()));
        logger.timestamp = true;
        logger
    }

    /// Same logger, different destination
    pub fn output(&self, writer: impl LevelWriter + 'static) -> Logger {
        Logger {
            writer: Arc::new(writer),
            ..self.clone()
        }
    }

    /// Start a child logger with extra context fields
    pub fn with(&self) -> Context {
        Context {
            logger: self.clone(),
        }
    }

    /// Child logger accepting only `level` and above
    pub fn level(&self, level: Level) -> Logger {
        Logger {
            level,
            ..self.clone()
        }
    }

    pub fn get_level(&self) -> Level {
        self.level
    }

    /// Child logger keeping only the events `sampler` lets through
    pub fn sample(&self, sampler: impl Sampler + 'static) -> Logger {
        Logger {
            sampler: Some(Arc::new(sampler)),
            ..self.clone()
        }
    }

    /// Child logger running `hook` on every event
    pub fn hook(&self, hook: impl Hook + 'static) -> Logger {
        let mut logger = self.clone();
        logger.hooks.push(Arc::new(hook));
        logger
    }

    /// Attach this logger to `scope`
    pub fn with_scope(&self, scope: Scope) -> Scope {
        scope.with_logger(self.clone())
    }

    pub fn trace(&self) -> Event {
        self.new_event(Level::Trace, None)
    }

    pub fn debug(&self) -> Event {
        self.new_event(Level::Debug, None)
    }

    pub fn info(&self) -> Event {
        self.new_event(Level::Info, None)
    }

    pub fn warn(&self) -> Event {
        self.new_event(Level::Warn, None)
    }

    pub fn error(&self) -> Event {
        self.new_event(Level::Error, None)
    }

    /// Fatal event; committing it exits the process with status 1
    pub fn fatal(&self) -> Event {
        self.new_event(Level::Fatal, Some(Done::Exit))
    }

    /// Panic event; committing it panics with the message
    pub fn panic(&self) -> Event {
        self.new_event(Level::Panic, Some(Done::Panic))
    }

    /// Event at `level` that never exits or panics, whatever the level
    pub fn with_level(&self, level: Level) -> Event {
        self.new_event(level, None)
    }

    /// Event without a level
    pub fn log(&self) -> Event {
        self.new_event(Level::NoLevel, None)
    }

    /// Error event carrying `err`, or an info event when there is none
    pub fn err(&self, err: Option<&dyn std::error::Error>) -> Event {
        match err {
            Some(err) => self.error().err(err),
            None => self.info(),
        }
    }

    /// Debug record with `value` as the message, written immediately
    pub fn print(&self, value: impl fmt::Display) {
        self.debug().msg(&value.to_string());
    }

    /// Debug record with a formatted message, written immediately
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        self.debug().msgf(args);
    }

    fn should(&self, level: Level) -> bool {
        if level == Level::Disabled || self.level == Level::Disabled {
            return false;
        }
        if level < self.level || level < global_level() {
            return false;
        }
        match &self.sampler {
            Some(sampler) => sampler.sample(level),
            None => true,
        }
    }

    fn new_event(&self, level: Level, done: Option<Done>) -> Event {
        if self.should(level) {
            Event::new(self, level, done)
        } else {
            Event::disabled(level, done)
        }
    }

    pub(crate) fn write(&self, record: &Record) {
        let _guard = WriteGuard::enter();
        if let Err(e) = self.writer.write_record(record) {
            report_write_error(&e);
        }
    }

    pub(crate) fn has_timestamp(&self) -> bool {
        self.timestamp
    }

    pub(crate) fn context(&self) -> &Map<String, Value> {
        &self.context
    }

    pub(crate) fn hooks(&self) -> &[Arc<dyn Hook>] {
        &self.hooks
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("context", &self.context)
            .field("timestamp", &self.timestamp)
            .field("hooks", &self.hooks.len())
            .finish_non_exhaustive()
    }
}

/// Builder for a child logger with fixed context fields
#[must_use = "call .logger() to obtain the child logger"]
pub struct Context {
    logger: Logger,
}

impl Context {
    /// Finish the child logger
    pub fn logger(self) -> Logger {
        self.logger
    }

    fn add(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.logger.context.insert(key.to_string(), value.into());
        self
    }

    pub fn str(self, key: &str, value: &str) -> Self {
        self.add(key, value)
    }

    pub fn int(self, key: &str, value: i64) -> Self {
        self.add(key, value)
    }

    pub fn uint(self, key: &str, value: u64) -> Self {
        self.add(key, value)
    }

    pub fn float(self, key: &str, value: f64) -> Self {
        self.add(key, value)
    }

    pub fn bool(self, key: &str, value: bool) -> Self {
        self.add(key, value)
    }

    pub fn err(self, err: &dyn std::error::Error) -> Self {
        self.add(ERROR_FIELD, err.to_string())
    }

    pub fn any<T: Serialize + ?Sized>(self, key: &str, value: &T) -> Self {
        let value = serde_json::to_value(value)
            .unwrap_or_else(|e| Value::from(format!("marshaling error: {}", e)));
        self.add(key, value)
    }

    /// Stamp every event of the child logger with the current time
    pub fn timestamp(mut self) -> Self {
        self.logger.context.remove(TIME_FIELD);
        self.logger.timestamp = true;
        self
    }
}
