//! Sink initialization
//!
//! Builds the three destinations described by a [`Config`] and installs the
//! fan-out of them as the output of a logger handle:
//! - a size-rotated family under `<Filename>.size/`
//! - a time-rotated family `<Filename>.<date>`, with `Filename` itself kept
//!   as a link to the current file
//! - human-readable console output

use std::io::Write;

use rotalog_core::constants::{INIT_SUCCESS_MESSAGE, TIME_WRITER_FAILED_MESSAGE};
use rotalog_core::{Config, Result};
use rotalog_rotate::{SizeRotatingWriter, SizeRotation, TimeRotatingWriter};

use crate::console::ConsoleWriter;
use crate::global::{global, LoggerHandle};
use crate::level::Level;
use crate::writer::{LevelWriter, MultiLevelWriter, SyncWriter};

/// Configure the global logger from `cfg`, with console output on stdout
pub fn init(cfg: &Config) -> Result<()> {
    let console = ConsoleWriter::stdout();
    init_with_console(global(), cfg, console)
}

/// Configure `handle` from `cfg`, rendering console output into `console`
pub fn init_with<W>(handle: &LoggerHandle, cfg: &Config, console: W) -> Result<()>
where
    W: Write + Send + 'static,
{
    init_with_console(handle, cfg, ConsoleWriter::new(console).no_color(true))
}

fn init_with_console<W>(handle: &LoggerHandle, cfg: &Config, console: ConsoleWriter<W>) -> Result<()>
where
    W: Write + Send + 'static,
{
    let writer = match build_sink(cfg, console) {
        Ok(writer) => writer,
        Err(e) => {
            handle
                .with_level(Level::Fatal)
                .err(&e)
                .msg(TIME_WRITER_FAILED_MESSAGE);
            return Err(e.into());
        }
    };

    let logger = handle.output(writer);
    handle.replace(logger);

    handle.info().msg(INIT_SUCCESS_MESSAGE);
    Ok(())
}

/// Assemble the fan-out writer without installing it
pub fn build_sink<W>(
    cfg: &Config,
    console: ConsoleWriter<W>,
) -> std::result::Result<MultiLevelWriter, rotalog_rotate::RotateError>
where
    W: Write + Send + 'static,
{
    let time_writer = TimeRotatingWriter::builder(&cfg.filename)
        .link_name(&cfg.filename)
        .max_age(cfg.max_age())
        .rotation_time(cfg.rotation_interval())
        .build()?;

    let size_policy = SizeRotation::new(cfg.max_size_mb(), cfg.max_backups).with_compress(cfg.compress);
    let size_writer = SizeRotatingWriter::open(cfg.size_path(), &size_policy)?;

    let writers: Vec<Box<dyn LevelWriter>> = vec![
        Box::new(SyncWriter::new(size_writer)),
        Box::new(SyncWriter::new(time_writer)),
        Box::new(console),
    ];
    Ok(MultiLevelWriter::new(writers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::Logger;
    use crate::writer::mock::MemoryWriter;
    use crate::writer::DiscardWriter;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> Config {
        Config {
            filename: dir.path().join("app.log"),
            max_size: 1,
            max_age: 7,
            max_backups: 3,
            compress: false,
            rotation_time: 24,
        }
    }

    fn read_dir_contents(dir: &std::path::Path) -> String {
        fs::read_dir(dir)
            .unwrap()
            .flatten()
            .filter_map(|entry| fs::read_to_string(entry.path()).ok())
            .collect()
    }

    #[test]
    fn test_build_sink_has_three_destinations() {
        let dir = TempDir::new().unwrap();
        let sink = build_sink(&config(&dir), ConsoleWriter::new(MemoryWriter::new())).unwrap();
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn test_init_with_reports_success() {
        let dir = TempDir::new().unwrap();
        let console = MemoryWriter::new();
        let handle = LoggerHandle::new(Logger::new(DiscardWriter));

        init_with(&handle, &config(&dir), console.clone()).unwrap();

        assert!(handle.is_initialized());
        assert!(console.contents().contains("INF log init success"));
        let size_files = read_dir_contents(&dir.path().join("app.log.size"));
        assert!(size_files.contains("\"message\":\"log init success\""));
        #[cfg(unix)]
        {
            let linked = fs::read_to_string(dir.path().join("app.log")).unwrap();
            assert!(linked.contains("\"message\":\"log init success\""));
        }
    }

    #[test]
    fn test_init_with_offset_specifiers_in_filename() {
        let dir = TempDir::new().unwrap();
        let handle = LoggerHandle::new(Logger::new(DiscardWriter));
        let cfg = Config {
            filename: dir.path().join("app%z%Z.log"),
            ..config(&dir)
        };

        init_with(&handle, &cfg, MemoryWriter::new()).unwrap();

        assert!(handle.is_initialized());
        let size_files = read_dir_contents(&dir.path().join("app%z%Z.log.size"));
        assert!(size_files.contains("log init success"));
    }

    #[test]
    fn test_init_with_empty_filename_fails() {
        let previous = MemoryWriter::new();
        let handle = LoggerHandle::new(Logger::new(SyncWriter::new(previous.clone())));
        let cfg = Config {
            filename: PathBuf::new(),
            max_size: 1,
            max_age: 1,
            max_backups: 1,
            compress: false,
            rotation_time: 1,
        };

        let result = init_with(&handle, &cfg, MemoryWriter::new());

        assert!(matches!(result, Err(rotalog_core::Error::RotationWriter(_))));
        assert!(!handle.is_initialized());
        let report = previous.contents();
        assert!(report.contains("\"level\":\"fatal\""));
        assert!(report.contains("Failed to create rotatelogs handler"));
    }
}
