//! Configuration for building a [`Logger`].

use std::path::{Path, PathBuf};

use crate::error::LogResult;
use crate::level::LogLevel;
use crate::logger::Logger;
use crate::sink::{ConsoleWriter, TypingSpeed};

/// Environment variable overriding the log directory.
pub const LOG_DIR_ENV: &str = "AGENTLOG_DIR";

/// Environment variable overriding the initial level (`debug`, `info`, ...).
pub const LOG_LEVEL_ENV: &str = "AGENTLOG_LEVEL";

/// Default log directory: `../logs` next to this crate.
pub fn default_log_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("logs")
}

/// Builder for a [`Logger`].
#[derive(Debug, Clone)]
pub struct LoggerBuilder {
    log_dir: PathBuf,
    level: LogLevel,
    console: Option<ConsoleWriter>,
    typing_speed: TypingSpeed,
}

impl LoggerBuilder {
    /// Create a builder with the default directory, DEBUG level and stdout.
    pub fn new() -> Self {
        Self {
            log_dir: default_log_dir(),
            level: LogLevel::Debug,
            console: None,
            typing_speed: TypingSpeed::default(),
        }
    }

    /// Builder seeded from `AGENTLOG_DIR` / `AGENTLOG_LEVEL`.
    ///
    /// An unparsable level is ignored with a warning.
    pub fn from_env() -> Self {
        let mut builder = Self::new();
        if let Ok(dir) = std::env::var(LOG_DIR_ENV) {
            if !dir.trim().is_empty() {
                builder.log_dir = PathBuf::from(dir);
            }
        }
        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            match level.parse() {
                Ok(level) => builder.level = level,
                Err(e) => tracing::warn!(error = %e, "ignoring {}", LOG_LEVEL_ENV),
            }
        }
        builder
    }

    /// Directory holding `activity.log`, `error.log` and JSON snapshots.
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    /// Initial threshold for the LOGGER and TYPER channels.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Send console output to `writer` instead of stdout.
    pub fn with_console(mut self, writer: ConsoleWriter) -> Self {
        self.console = Some(writer);
        self
    }

    /// Disable console output (only write to files).
    pub fn no_console(self) -> Self {
        self.with_console(ConsoleWriter::discard())
    }

    pub fn with_typing_speed(mut self, speed: TypingSpeed) -> Self {
        self.typing_speed = speed;
        self
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn typing_speed(&self) -> TypingSpeed {
        self.typing_speed
    }

    pub(crate) fn console(&self) -> ConsoleWriter {
        self.console.clone().unwrap_or_default()
    }

    /// Build a standalone logger (not the process-wide one).
    pub fn build(self) -> LogResult<Logger> {
        Logger::from_builder(self)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
