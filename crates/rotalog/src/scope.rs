//! Key/value carrier that can hold a logger

use std::collections::HashMap;

use crate::logger::Logger;

/// A request- or task-scoped bag of values, optionally carrying a logger.
///
/// Cloning is cheap enough to hand one to every task spawned for a request.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    logger: Option<Logger>,
    values: HashMap<String, String>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn logger(&self) -> Option<&Logger> {
        self.logger.as_ref()
    }

    /// The carried logger, or a disabled one
    pub fn logger_or_disabled(&self) -> Logger {
        self.logger.clone().unwrap_or_else(Logger::disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::mock::MemoryWriter;
    use crate::writer::SyncWriter;

    #[test]
    fn test_scope_values() {
        let scope = Scope::new().with_value("request_id", "r-42");
        assert_eq!(scope.value("request_id"), Some("r-42"));
        assert_eq!(scope.value("missing"), None);
        assert!(scope.logger().is_none());
    }

    #[test]
    fn test_scope_without_logger_is_disabled() {
        let logger = Scope::new().logger_or_disabled();
        assert!(!logger.error().enabled());
    }

    #[test]
    fn test_scope_carries_logger() {
        let out = MemoryWriter::new();
        let logger = Logger::new(SyncWriter::new(out.clone()))
            .with()
            .str("request_id", "r-42")
            .logger();
        let scope = logger.with_scope(Scope::new());

        scope.logger_or_disabled().info().msg("from scope");
        assert!(out.contents().contains("\"request_id\":\"r-42\""));
    }
}
