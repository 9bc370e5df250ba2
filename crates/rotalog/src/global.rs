//! The process-wide logger slot

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::event::Event;
use crate::hook::Hook;
use crate::level::Level;
use crate::logger::{Context, Logger};
use crate::sampler::Sampler;
use crate::scope::Scope;
use crate::writer::LevelWriter;

static GLOBAL: Lazy<LoggerHandle> = Lazy::new(|| LoggerHandle::new(Logger::stderr()));

/// The handle behind the free functions in [`crate::log`]
pub fn global() -> &'static LoggerHandle {
    &GLOBAL
}

/// A replaceable logger slot.
///
/// Every event reads the logger installed at the time it is started.
/// [`LoggerHandle::replace`] swaps the whole logger; nothing is merged.
pub struct LoggerHandle {
    current: RwLock<Arc<Logger>>,
    initialized: AtomicBool,
}

impl LoggerHandle {
    pub fn new(logger: Logger) -> Self {
        Self {
            current: RwLock::new(Arc::new(logger)),
            initialized: AtomicBool::new(false),
        }
    }

    /// The logger installed right now
    pub fn current(&self) -> Arc<Logger> {
        self.current.read().clone()
    }

    /// Install `logger`, returning the one it replaces
    pub fn replace(&self, logger: Logger) -> Arc<Logger> {
        let previous = std::mem::replace(&mut *self.current.write(), Arc::new(logger));
        self.initialized.store(true, Ordering::SeqCst);
        previous
    }

    /// Whether a logger has been installed since the handle was created
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    pub fn output(&self, writer: impl LevelWriter + 'static) -> Logger {
        self.current().output(writer)
    }

    pub fn with(&self) -> Context {
        self.current().with()
    }

    pub fn level(&self, level: Level) -> Logger {
        self.current().level(level)
    }

    pub fn sample(&self, sampler: impl Sampler + 'static) -> Logger {
        self.current().sample(sampler)
    }

    pub fn hook(&self, hook: impl Hook + 'static) -> Logger {
        self.current().hook(hook)
    }

    pub fn err(&self, err: Option<&dyn std::error::Error>) -> Event {
        self.current().err(err)
    }

    pub fn trace(&self) -> Event {
        self.current().trace()
    }

    pub fn debug(&self) -> Event {
        self.current().debug()
    }

    pub fn info(&self) -> Event {
        self.current().info()
    }

    pub fn warn(&self) -> Event {
        self.current().warn()
    }

    pub fn error(&self) -> Event {
        self.current().error()
    }

    pub fn fatal(&self) -> Event {
        self.current().fatal()
    }

    pub fn panic(&self) -> Event {
        self.current().panic()
    }

    pub fn with_level(&self, level: Level) -> Event {
        self.current().with_level(level)
    }

    pub fn log(&self) -> Event {
        self.current().log()
    }

    pub fn print(&self, value: impl fmt::Display) {
        self.current().print(value)
    }

    pub fn printf(&self, args: fmt::Arguments<'_>) {
        self.current().printf(args)
    }

    /// Logger carried by `scope`, or a disabled logger
    pub fn ctx(&self, scope: &Scope) -> Logger {
        scope.logger_or_disabled()
    }
}

impl fmt::Debug for LoggerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerHandle")
            .field("current", &*self.current())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::mock::MemoryWriter;
    use crate::writer::SyncWriter;

    #[test]
    fn test_replace_swaps_destination() {
        let first = MemoryWriter::new();
        let second = MemoryWriter::new();
        let handle = LoggerHandle::new(Logger::new(SyncWriter::new(first.clone())));
        assert!(!handle.is_initialized());

        handle.info().msg("one");
        handle.replace(Logger::new(SyncWriter::new(second.clone())));
        handle.info().msg("two");

        assert!(handle.is_initialized());
        assert_eq!(first.lines().len(), 1);
        assert_eq!(second.lines().len(), 1);
        assert!(second.contents().contains("two"));
    }

    #[test]
    fn test_derived_logger_does_not_change_handle() {
        let out = MemoryWriter::new();
        let handle = LoggerHandle::new(Logger::new(SyncWriter::new(out.clone())));

        handle.level(Level::Error).warn().msg("suppressed");
        handle.warn().msg("kept");

        assert_eq!(out.lines().len(), 1);
        assert_eq!(handle.current().get_level(), Level::Trace);
    }

    #[test]
    fn test_ctx_without_logger() {
        let handle = LoggerHandle::new(Logger::disabled());
        assert!(!handle.ctx(&Scope::new()).info().enabled());
    }
}
