//! Human-readable console output
//!
//! Records are rendered from their fields as
//! `<time> <LVL> <message> key=value ...`, with the remaining fields sorted
//! by key.

use chrono::DateTime;
use colored::Colorize;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::io::{self, Write};

use crate::event::{LEVEL_FIELD, MESSAGE_FIELD, TIME_FIELD};
use crate::level::Level;
use crate::record::Record;
use crate::writer::LevelWriter;

/// Default time format ("3:04PM")
pub const DEFAULT_TIME_FORMAT: &str = "%-I:%M%p";

/// Writes records to a terminal-like output in human-readable form
pub struct ConsoleWriter<W> {
    out: Mutex<W>,
    no_color: bool,
    time_format: String,
}

impl ConsoleWriter<io::Stdout> {
    /// Console writer on stdout, coloured when stdout is a terminal
    pub fn stdout() -> Self {
        Self::new(io::stdout()).no_color(!atty::is(atty::Stream::Stdout))
    }
}

impl<W: Write + Send> ConsoleWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            no_color: false,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }

    pub fn no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    /// Render one record as a single line, without the trailing newline
    pub fn format_record(&self, record: &Record) -> String {
        let mut parts = Vec::new();

        if let Some(time) = record.fields().get(TIME_FIELD) {
            parts.push(self.format_time(time));
        }

        parts.push(self.format_level(record.level()));

        match record.fields().get(MESSAGE_FIELD) {
            Some(Value::String(s)) if s.is_empty() => {}
            Some(Value::String(s)) => parts.push(s.clone()),
            Some(other) => parts.push(other.to_string()),
            None => {}
        }

        parts.extend(self.format_fields(record.fields()));
        parts.join(" ")
    }

    fn format_time(&self, time: &Value) -> String {
        let formatted = time
            .as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|t| t.format(&self.time_format).to_string())
            .unwrap_or_else(|| value_to_string(time));
        self.paint(formatted, |s| s.dimmed().to_string())
    }

    fn format_level(&self, level: Level) -> String {
        let label = match level {
            Level::Trace => "TRC",
            Level::Debug => "DBG",
            Level::Info => "INF",
            Level::Warn => "WRN",
            Level::Error => "ERR",
            Level::Fatal => "FTL",
            Level::Panic => "PNC",
            Level::NoLevel | Level::Disabled => "???",
        };

        if self.no_color {
            return label.to_string();
        }
        match level {
            Level::Trace => label.magenta().to_string(),
            Level::Debug => label.yellow().to_string(),
            Level::Info => label.green().to_string(),
            Level::Warn => label.red().to_string(),
            Level::Error | Level::Fatal | Level::Panic => label.red().bold().to_string(),
            Level::NoLevel | Level::Disabled => label.bold().to_string(),
        }
    }

    fn format_fields(&self, fields: &Map<String, Value>) -> Vec<String> {
        let mut fields: Vec<_> = fields
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), LEVEL_FIELD | TIME_FIELD | MESSAGE_FIELD))
            .collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));

        fields
            .into_iter()
            .map(|(key, value)| {
                let key = self.paint(format!("{}=", key), |s| s.cyan().to_string());
                let value = quote_if_needed(&value_to_string(value));
                format!("{}{}", key, value)
            })
            .collect()
    }

    fn paint(&self, text: String, color: impl Fn(&str) -> String) -> String {
        if self.no_color {
            text
        } else {
            color(&text)
        }
    }
}

impl<W: Write + Send> LevelWriter for ConsoleWriter<W> {
    fn write_record(&self, record: &Record) -> io::Result<()> {
        let line = self.format_record(record);
        let mut out = self.out.lock();
        writeln!(out, "{}", line)?;
        out.flush()
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn quote_if_needed(s: &str) -> String {
    if s.is_empty() || s.chars().any(|c| c.is_whitespace() || c == '"' || c == '=') {
        format!("{:?}", s)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::mock::MemoryWriter;

    fn console() -> ConsoleWriter<MemoryWriter> {
        ConsoleWriter::new(MemoryWriter::new()).no_color(true)
    }

    fn record(level: Level, fields: serde_json::Value) -> Record {
        match fields {
            Value::Object(fields) => Record::new(level, fields),
            _ => Record::new(level, Map::new()),
        }
    }

    #[test]
    fn test_format_basic_record() {
        let line = console().format_record(&record(
            Level::Info,
            serde_json::json!({"level": "info", "message": "log init success"}),
        ));
        assert_eq!(line, "INF log init success");
    }

    #[test]
    fn test_format_fields_sorted_and_quoted() {
        let line = console().format_record(&record(
            Level::Warn,
            serde_json::json!({"level": "warn", "zone": "eu west", "attempt": 3, "message": "retry"}),
        ));
        assert_eq!(line, "WRN retry attempt=3 zone=\"eu west\"");
    }

    #[test]
    fn test_format_time() {
        let line = console().time_format("%H:%M:%S").format_record(&record(
            Level::Debug,
            serde_json::json!({"level": "debug", "time": "2024-05-07T13:04:05Z", "message": "tick"}),
        ));
        assert_eq!(line, "13:04:05 DBG tick");
    }

    #[test]
    fn test_missing_level_marked_unknown() {
        let line = console().format_record(&record(
            Level::NoLevel,
            serde_json::json!({"message": "plain"}),
        ));
        assert_eq!(line, "??? plain");
    }

    #[test]
    fn test_level_comes_from_record_not_fields() {
        let line = console().format_record(&record(
            Level::Error,
            serde_json::json!({"level": "debug", "message": "disk"}),
        ));
        assert_eq!(line, "ERR disk");
    }

    #[test]
    fn test_write_record_appends_newline() {
        let out = MemoryWriter::new();
        let writer = ConsoleWriter::new(out.clone()).no_color(true);
        writer
            .write_record(&record(
                Level::Error,
                serde_json::json!({"level": "error", "error": "boom", "message": "failed"}),
            ))
            .unwrap();
        assert_eq!(out.contents(), "ERR failed error=boom\n");
    }
}
