//! A committed event as handed to every destination

use once_cell::unsync::OnceCell;
use serde_json::{Map, Value};
use std::io;

use crate::event::MESSAGE_FIELD;
use crate::level::Level;

/// One committed event.
///
/// Destinations read either the structured fields or the JSON line; the JSON
/// line is produced on first use and shared by every byte-oriented
/// destination of the same fan-out.
pub struct Record {
    level: Level,
    fields: Map<String, Value>,
    json: OnceCell<Vec<u8>>,
}

impl Record {
    pub fn new(level: Level, fields: Map<String, Value>) -> Self {
        Self {
            level,
            fields,
            json: OnceCell::new(),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// All fields in write order, including `level`, `time` and `message`
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn message(&self) -> Option<&str> {
        self.fields.get(MESSAGE_FIELD).and_then(Value::as_str)
    }

    /// The record as one newline-terminated JSON object
    pub fn to_json(&self) -> io::Result<&[u8]> {
        self.json
            .get_or_try_init(|| -> io::Result<Vec<u8>> {
                let mut line = serde_json::to_vec(&self.fields)?;
                line.push(b'\n');
                Ok(line)
            })
            .map(Vec::as_slice)
    }
}

impl std::fmt::Debug for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Record")
            .field("level", &self.level)
            .field("fields", &self.fields)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_line_keeps_field_order() {
        let mut fields = Map::new();
        fields.insert("level".to_string(), Value::from("info"));
        fields.insert("zone".to_string(), Value::from("eu"));
        fields.insert("message".to_string(), Value::from("ready"));
        let record = Record::new(Level::Info, fields);

        assert_eq!(
            record.to_json().unwrap(),
            b"{\"level\":\"info\",\"zone\":\"eu\",\"message\":\"ready\"}\n"
        );
        assert_eq!(record.message(), Some("ready"));
    }

    #[test]
    fn test_json_line_is_built_once() {
        let record = Record::new(Level::Debug, Map::new());
        let first = record.to_json().unwrap().as_ptr();
        let second = record.to_json().unwrap().as_ptr();
        assert_eq!(first, second);
    }
}
