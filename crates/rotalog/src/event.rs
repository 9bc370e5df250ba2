//! Single-use event builder

use chrono::{Local, SecondsFormat};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::level::Level;
use crate::logger::Logger;
use crate::record::Record;

pub const LEVEL_FIELD: &str = "level";
pub const TIME_FIELD: &str = "time";
pub const MESSAGE_FIELD: &str = "message";
pub const ERROR_FIELD: &str = "error";

/// What happens after the record has been written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Done {
    /// Terminate the process with status 1
    Exit,
    /// Panic with the event message
    Panic,
}

/// A log event under construction.
///
/// Fields are attached with the builder methods and the event is written by
/// one of [`Event::msg`], [`Event::msgf`] or [`Event::send`], which consume
/// it. Events from a disabled logger (or filtered out by level or sampling)
/// accept fields and write nothing.
#[must_use = "an event is only written once msg, msgf or send is called"]
pub struct Event {
    logger: Option<Logger>,
    level: Level,
    fields: Map<String, Value>,
    done: Option<Done>,
}

impl Event {
    pub(crate) fn new(logger: &Logger, level: Level, done: Option<Done>) -> Self {
        let mut fields = Map::new();
        if level != Level::NoLevel {
            fields.insert(LEVEL_FIELD.to_string(), Value::from(level.as_str()));
        }
        if logger.has_timestamp() {
            fields.insert(
                TIME_FIELD.to_string(),
                Value::from(Local::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
            );
        }
        for (key, value) in logger.context() {
            if is_reserved(key, logger) {
                continue;
            }
            fields.insert(key.clone(), value.clone());
        }

        Self {
            logger: Some(logger.clone()),
            level,
            fields,
            done,
        }
    }

    pub(crate) fn disabled(level: Level, done: Option<Done>) -> Self {
        Self {
            logger: None,
            level,
            fields: Map::new(),
            done,
        }
    }

    /// Whether committing this event will write anything
    pub fn enabled(&self) -> bool {
        self.logger.is_some()
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Drop the record; committing becomes a no-op apart from exit/panic
    pub fn discard(&mut self) {
        self.logger = None;
    }

    /// Set a field in place (used by hooks). The `level` field is owned by
    /// the event and cannot be replaced.
    pub fn add(&mut self, key: &str, value: impl Into<Value>) {
        if self.logger.is_some() && key != LEVEL_FIELD {
            self.fields.insert(key.to_string(), value.into());
        }
    }

    /// Read back a field already on the event
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn str(mut self, key: &str, value: &str) -> Self {
        self.add(key, value);
        self
    }

    pub fn strs(mut self, key: &str, values: &[&str]) -> Self {
        self.add(key, values.to_vec());
        self
    }

    pub fn int(mut self, key: &str, value: i64) -> Self {
        self.add(key, value);
        self
    }

    pub fn uint(mut self, key: &str, value: u64) -> Self {
        self.add(key, value);
        self
    }

    pub fn float(mut self, key: &str, value: f64) -> Self {
        self.add(key, value);
        self
    }

    pub fn bool(mut self, key: &str, value: bool) -> Self {
        self.add(key, value);
        self
    }

    /// Attach `err` under the `error` key
    pub fn err(mut self, err: &dyn std::error::Error) -> Self {
        self.add(ERROR_FIELD, err.to_string());
        self
    }

    /// Attach any serializable value; serialization failures are recorded as text
    pub fn any<T: Serialize + ?Sized>(mut self, key: &str, value: &T) -> Self {
        if self.logger.is_some() {
            let value = serde_json::to_value(value)
                .unwrap_or_else(|e| Value::from(format!("marshaling error: {}", e)));
            self.add(key, value);
        }
        self
    }

    /// Add the current local time under `time`
    pub fn timestamp(mut self) -> Self {
        self.add(
            TIME_FIELD,
            Local::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        );
        self
    }

    /// Write the event with `message`.
    ///
    /// Fatal events exit the process and panic events panic after writing,
    /// even if the record itself was filtered out.
    pub fn msg(mut self, message: &str) {
        let level = self.level;
        if let Some(hooks) = self.logger.as_ref().map(|l| l.hooks().to_vec()) {
            for hook in hooks {
                hook.run(&mut self, level, message);
            }
        }

        if let Some(logger) = self.logger.take() {
            let mut fields = std::mem::take(&mut self.fields);
            if !message.is_empty() {
                fields.insert(MESSAGE_FIELD.to_string(), Value::from(message));
            }
            logger.write(&Record::new(self.level, fields));
        }

        match self.done {
            Some(Done::Exit) => std::process::exit(1),
            Some(Done::Panic) => panic!("{}", message),
            None => {}
        }
    }

    /// Write the event with a formatted message
    pub fn msgf(self, args: fmt::Arguments<'_>) {
        match args.as_str() {
            Some(s) => self.msg(s),
            None => self.msg(&args.to_string()),
        }
    }

    /// Write the event without a message
    pub fn send(self) {
        self.msg("");
    }
}

/// Keys a logger's context may not override
fn is_reserved(key: &str, logger: &Logger) -> bool {
    key == LEVEL_FIELD || (key == TIME_FIELD && logger.has_timestamp())
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("enabled", &self.enabled())
            .field("level", &self.level)
            .field("fields", &self.fields)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::mock::MemoryWriter;
    use crate::writer::SyncWriter;

    fn logger() -> (Logger, MemoryWriter) {
        let out = MemoryWriter::new();
        (Logger::new(SyncWriter::new(out.clone())), out)
    }

    fn record(out: &MemoryWriter) -> Value {
        serde_json::from_str(out.lines().last().unwrap()).unwrap()
    }

    #[test]
    fn test_event_fields_and_message() {
        let (logger, out) = logger();
        logger
            .info()
            .str("user", "ada")
            .int("attempt", -2)
            .uint("bytes", 42)
            .bool("ok", true)
            .msg("login");

        assert_eq!(
            out.lines(),
            vec![r#"{"level":"info","user":"ada","attempt":-2,"bytes":42,"ok":true,"message":"login"}"#]
        );
    }

    #[test]
    fn test_event_any_and_strs() {
        #[derive(Serialize)]
        struct Peer {
            host: &'static str,
            port: u16,
        }

        let (logger, out) = logger();
        logger
            .debug()
            .any("peer", &Peer {
                host: "db",
                port: 5432,
            })
            .strs("tags", &["a", "b"])
            .float("ratio", 0.5)
            .send();

        let rec = record(&out);
        assert_eq!(rec["peer"]["port"], 5432);
        assert_eq!(rec["tags"], serde_json::json!(["a", "b"]));
        assert_eq!(rec["ratio"], 0.5);
        assert!(rec.get("message").is_none());
    }

    #[test]
    fn test_event_err_field() {
        let (logger, out) = logger();
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        logger.error().err(&err).msg("write failed");

        let rec = record(&out);
        assert_eq!(rec["level"], "error");
        assert_eq!(rec["error"], "disk full");
    }

    #[test]
    fn test_msgf() {
        let (logger, out) = logger();
        logger.warn().msgf(format_args!("{} of {}", 3, 5));
        assert_eq!(record(&out)["message"], "3 of 5");
    }

    #[test]
    fn test_disabled_event_writes_nothing() {
        let (logger, out) = logger();
        let event = logger.level(Level::Error).info().str("k", "v");
        assert!(!event.enabled());
        event.msg("hidden");
        assert!(out.contents().is_empty());
    }

    #[test]
    fn test_no_level_event_has_no_level_field() {
        let (logger, out) = logger();
        logger.log().msg("bare");
        assert_eq!(out.contents(), "{\"message\":\"bare\"}\n");
    }

    #[test]
    fn test_context_cannot_replace_level() {
        let (logger, out) = logger();
        let child = logger
            .with()
            .str("level", "debug")
            .str("component", "sync")
            .logger();

        child.error().msg("failed");
        let rec = record(&out);
        assert_eq!(rec["level"], "error");
        assert_eq!(rec["component"], "sync");

        child.log().msg("bare");
        assert!(record(&out).get("level").is_none());
    }

    #[test]
    fn test_stamped_time_wins_over_context() {
        let (logger, out) = logger();
        let child = logger
            .with()
            .timestamp()
            .str("time", "yesterday")
            .logger();

        child.info().msg("now");
        let rec = record(&out);
        assert_ne!(rec["time"], "yesterday");
        assert!(rec["time"].is_string());
    }

    #[test]
    fn test_add_keeps_event_level() {
        let (logger, out) = logger();
        let mut event = logger.warn();
        event.add("level", "info");
        event.add("disk", "sda1");
        event.msg("almost full");

        let rec = record(&out);
        assert_eq!(rec["level"], "warn");
        assert_eq!(rec["disk"], "sda1");
    }

    #[test]
    #[should_panic(expected = "boom")]
    fn test_panic_event_panics_after_write() {
        let (logger, _out) = logger();
        logger.panic().msg("boom");
    }

    #[test]
    fn test_panic_event_written_before_panic() {
        let (logger, out) = logger();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.panic().str("stage", "shutdown").msg("cannot continue");
        }));
        assert!(result.is_err());
        let rec = record(&out);
        assert_eq!(rec["level"], "panic");
        assert_eq!(rec["stage"], "shutdown");
    }
}
