//! Destinations for committed records

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

use crate::level::Level;
use crate::record::Record;

/// A destination that receives one committed record per call
pub trait LevelWriter: Send + Sync {
    /// Write one complete record
    fn write_record(&self, record: &Record) -> io::Result<()>;

    /// Whether records at `level` should reach this destination at all
    fn enabled(&self, _level: Level) -> bool {
        true
    }
}

impl<T: LevelWriter + ?Sized> LevelWriter for Arc<T> {
    fn write_record(&self, record: &Record) -> io::Result<()> {
        (**self).write_record(record)
    }

    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }
}

impl<T: LevelWriter + ?Sized> LevelWriter for Box<T> {
    fn write_record(&self, record: &Record) -> io::Result<()> {
        (**self).write_record(record)
    }

    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }
}

/// Writes the JSON line of each record to an [`io::Write`] behind a mutex,
/// so concurrent records never interleave inside the wrapped writer.
pub struct SyncWriter<W> {
    inner: Mutex<W>,
}

impl<W: Write + Send> SyncWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner: Mutex::new(inner),
        }
    }

    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }
}

impl<W: Write + Send> LevelWriter for SyncWriter<W> {
    fn write_record(&self, record: &Record) -> io::Result<()> {
        let line = record.to_json()?;
        let mut inner = self.inner.lock();
        inner.write_all(line)?;
        inner.flush()
    }
}

/// Gives one destination its own minimum level
pub struct FilteredLevelWriter<W> {
    writer: W,
    min_level: Level,
}

impl<W: LevelWriter> FilteredLevelWriter<W> {
    pub fn new(writer: W, min_level: Level) -> Self {
        Self { writer, min_level }
    }
}

impl<W: LevelWriter> LevelWriter for FilteredLevelWriter<W> {
    fn write_record(&self, record: &Record) -> io::Result<()> {
        if !self.enabled(record.level()) {
            return Ok(());
        }
        self.writer.write_record(record)
    }

    fn enabled(&self, level: Level) -> bool {
        level >= self.min_level && self.writer.enabled(level)
    }
}

/// Fans every record out to all destinations, in order.
///
/// A destination that does not accept the record's level is skipped. A
/// failing destination does not stop the others; the first error is returned.
pub struct MultiLevelWriter {
    writers: Vec<Box<dyn LevelWriter>>,
}

impl MultiLevelWriter {
    pub fn new(writers: Vec<Box<dyn LevelWriter>>) -> Self {
        Self { writers }
    }

    pub fn len(&self) -> usize {
        self.writers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }
}

impl LevelWriter for MultiLevelWriter {
    fn write_record(&self, record: &Record) -> io::Result<()> {
        let mut first_err = None;
        for writer in &self.writers {
            if !writer.enabled(record.level()) {
                continue;
            }
            if let Err(e) = writer.write_record(record) {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn enabled(&self, level: Level) -> bool {
        self.writers.iter().any(|w| w.enabled(level))
    }
}

/// Accepts and drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardWriter;

impl LevelWriter for DiscardWriter {
    fn write_record(&self, _record: &Record) -> io::Result<()> {
        Ok(())
    }

    fn enabled(&self, _level: Level) -> bool {
        false
    }
}


#[cfg(test)]
mod tests {
    use super::mock::{record, FailingWriter, MemoryWriter};
    use super::*;

    #[test]
    fn test_sync_writer_writes_json_line() {
        let out = MemoryWriter::new();
        let writer = SyncWriter::new(out.clone());
        writer.write_record(&record(Level::Info, "a")).unwrap();
        assert_eq!(out.contents(), "{\"level\":\"info\",\"message\":\"a\"}\n");
    }

    #[test]
    fn test_multi_writer_reaches_every_destination() {
        let a = MemoryWriter::new();
        let b = MemoryWriter::new();
        let multi = MultiLevelWriter::new(vec![
            Box::new(SyncWriter::new(a.clone())),
            Box::new(SyncWriter::new(b.clone())),
        ]);

        multi.write_record(&record(Level::Info, "fanned")).unwrap();
        assert_eq!(a.lines().len(), 1);
        assert_eq!(a.contents(), b.contents());
    }

    #[test]
    fn test_multi_writer_skips_filtered_destination() {
        let all = MemoryWriter::new();
        let errors_only = MemoryWriter::new();
        let multi = MultiLevelWriter::new(vec![
            Box::new(SyncWriter::new(all.clone())),
            Box::new(FilteredLevelWriter::new(
                SyncWriter::new(errors_only.clone()),
                Level::Error,
            )),
        ]);

        multi.write_record(&record(Level::Info, "info")).unwrap();
        multi.write_record(&record(Level::Error, "error")).unwrap();

        assert_eq!(all.lines().len(), 2);
        assert_eq!(errors_only.lines().len(), 1);
        assert!(errors_only.contents().contains("\"message\":\"error\""));
    }

    #[test]
    fn test_multi_writer_continues_after_failure() {
        let out = MemoryWriter::new();
        let multi = MultiLevelWriter::new(vec![
            Box::new(FailingWriter),
            Box::new(SyncWriter::new(out.clone())),
        ]);

        let err = multi
            .write_record(&record(Level::Warn, "still here"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(out.contents().contains("still here"));
    }

    #[test]
    fn test_discard_writer_disabled() {
        assert!(!DiscardWriter.enabled(Level::Panic));
        assert!(!MultiLevelWriter::new(vec![Box::new(DiscardWriter)]).enabled(Level::Info));
    }
}
