//! Per-event hooks

use crate::event::Event;
use crate::level::Level;

/// Runs on every event of a logger right before it is written.
///
/// A hook may add fields with [`Event::add`] or drop the record with
/// [`Event::discard`].
pub trait Hook: Send + Sync {
    fn run(&self, event: &mut Event, level: Level, message: &str);
}

/// Adapts a closure into a [`Hook`]
pub struct HookFn<F>(pub F);

impl<F> Hook for HookFn<F>
where
    F: Fn(&mut Event, Level, &str) + Send + Sync,
{
    fn run(&self, event: &mut Event, level: Level, message: &str) {
        (self.0)(event, level, message)
    }
}

/// Tags every event with the severity name as an upper-case field
pub struct LevelNameHook {
    key: String,
}

impl LevelNameHook {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Hook for LevelNameHook {
    fn run(&self, event: &mut Event, level: Level, _message: &str) {
        if level != Level::NoLevel {
            event.add(&self.key, level.as_str().to_uppercase());
        }
    }
}
