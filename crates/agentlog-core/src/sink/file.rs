//! Append-only text log files.
//!
//! The file is opened once in append mode and kept for the sink's lifetime.
//! Each event is written as a single line and flushed while holding the
//! writer lock, so concurrent callers never split a line.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::error::{LogError, LogResult};
use crate::event::LogEvent;
use crate::formatter::RecordFormatter;
use crate::level::LogLevel;

use super::Sink;

/// File name of the activity log inside the log directory.
pub const ACTIVITY_FILE: &str = "activity.log";

/// File name of the error log inside the log directory.
pub const ERROR_FILE: &str = "error.log";

/// Sink that appends formatted lines to a text file.
pub struct FileSink {
    name: String,

    /// Buffered file writer (wrapped in Mutex for thread safety)
    writer: Mutex<BufWriter<File>>,

    path: PathBuf,
    formatter: RecordFormatter,
    threshold: LogLevel,
}

impl FileSink {
    /// Open `path` for appending, creating it if needed.
    pub fn open(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        formatter: RecordFormatter,
        threshold: LogLevel,
    ) -> LogResult<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LogError::init(&path, e))?;

        Ok(Self {
            name: name.into(),
            writer: Mutex::new(BufWriter::new(file)),
            path,
            formatter,
            threshold,
        })
    }

    /// `activity.log`: every event at DEBUG or above, colors stripped.
    pub fn activity(log_dir: impl AsRef<Path>) -> LogResult<Self> {
        Self::open(
            "activity-file",
            log_dir.as_ref().join(ACTIVITY_FILE),
            RecordFormatter::activity(),
            LogLevel::Debug,
        )
    }

    /// `error.log`: ERROR events only, with source location.
    pub fn error(log_dir: impl AsRef<Path>) -> LogResult<Self> {
        Self::open(
            "error-file",
            log_dir.as_ref().join(ERROR_FILE),
            RecordFormatter::error(),
            LogLevel::Error,
        )
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush any buffered data to disk.
    pub fn flush(&self) -> std::io::Result<()> {
        self.writer.lock().flush()
    }
}

impl Sink for FileSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn threshold(&self) -> LogLevel {
        self.threshold
    }

    fn emit(&self, event: &LogEvent) -> LogResult<()> {
        let line = self.formatter.format(event);

        let mut writer = self.writer.lock();
        writeln!(writer, "{}", line)?;
        writer.flush()?;

        Ok(())
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
