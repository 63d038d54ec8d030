//! Debug log written to a file.
//!
//! Nothing is logged unless [`init`] is called, which happens only with
//! `--debug`. The terminal belongs to the animation, so log lines never go
//! to stdout or stderr.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::{Local, NaiveDateTime};
use log::{LevelFilter, Log, Metadata, Record};

/// Appends one line per record to a file.
struct FileLogger {
    file: Mutex<File>,
    level: LevelFilter,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(
            Local::now().naive_local(),
            record.level(),
            record.target(),
            &record.args().to_string(),
        );
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{line}");
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

fn format_line(at: NaiveDateTime, level: log::Level, target: &str, message: &str) -> String {
    format!(
        "[{}] {:<5} {}: {}",
        at.format("%Y-%m-%d %H:%M:%S"),
        level,
        target,
        message
    )
}

/// Install the file logger for the rest of the process.
pub fn init(path: &Path) -> color_eyre::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let level = LevelFilter::Debug;
    log::set_boxed_logger(Box::new(FileLogger {
        file: Mutex::new(file),
        level,
    }))?;
    log::set_max_level(level);
    log::info!("logging to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_line() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 0)
            .unwrap();
        assert_eq!(
            format_line(at, log::Level::Warn, "glyphrain::app", "grid reset"),
            "[2024-03-09 07:05:00] WARN  glyphrain::app: grid reset"
        );
    }

    #[test]
    fn test_logger_writes_enabled_levels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rain.log");
        let logger = FileLogger {
            file: Mutex::new(File::create(&path).unwrap()),
            level: LevelFilter::Info,
        };
        logger.log(
            &Record::builder()
                .args(format_args!("kept"))
                .level(log::Level::Info)
                .target("test")
                .build(),
        );
        logger.log(
            &Record::builder()
                .args(format_args!("dropped"))
                .level(log::Level::Trace)
                .target("test")
                .build(),
        );
        logger.flush();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("INFO  test: kept"));
        assert!(!content.contains("dropped"));
    }
}
