//! The logging facade.
//!
//! [`Logger`] owns every sink and routes events through three channels:
//!
//! ```text
//! TYPER        typing console (INFO+)  ─┐
//! LOGGER       instant console (DEBUG+) ├─ activity.log (DEBUG+), error.log (ERROR+)
//! JSON_LOGGER  per-request snapshot    ─┘
//! ```
//!
//! One logger is normally shared by the whole process through
//! [`Logger::init`] / [`Logger::global`]. The first call sets up the log
//! directory and files; later calls hand back the same `Arc` and do nothing
//! else. Standalone instances can be built with [`LoggerBuilder::build`] and
//! passed around explicitly.

use std::cell::Cell;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use serde_json::Value;

use crate::builder::LoggerBuilder;
use crate::channel::{self, Channel, SinkFailure};
use crate::color;
use crate::error::{LogError, LogResult};
use crate::event::{LogEvent, Message, SourceLocation};
use crate::level::LogLevel;
use crate::observer::{self, ChatObserver};
use crate::sink::{FileSink, InstantConsoleSink, JsonSnapshotSink, Sink, TypingConsoleSink};

/// Text shown by [`Logger::double_check`] when no text is given.
pub const DOUBLE_CHECK_TEXT: &str = "Please ensure you've setup and configured everything \
correctly. Read the project README to double check. You can also open an issue and ask there!";

static GLOBAL: Mutex<Option<Arc<Logger>>> = parking_lot::const_mutex(None);

thread_local! {
    // set while a sink failure is being reported, to stop recursion
    static REPORTING: Cell<bool> = const { Cell::new(false) };
}

/// Thresholds of the two user-facing channels, updated together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelLevels {
    pub logger: LogLevel,
    pub typer: LogLevel,
}

pub struct Logger {
    log_dir: PathBuf,
    typer: Channel,
    logger: Channel,
    json: Channel,
    levels: RwLock<ChannelLevels>,
    observers: RwLock<Vec<Arc<dyn ChatObserver>>>,

    /// Held for the whole of an animated call
    typing_lock: Mutex<()>,
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Create the log directory, open the log files and wire the channels.
    pub(crate) fn from_builder(builder: LoggerBuilder) -> LogResult<Self> {
        let requested = builder.log_dir().to_path_buf();
        fs::create_dir_all(&requested).map_err(|e| LogError::init(&requested, e))?;
        let log_dir = requested
            .canonicalize()
            .map_err(|e| LogError::init(&requested, e))?;

        let console = builder.console();
        let activity: Arc<dyn Sink> = Arc::new(FileSink::activity(&log_dir)?);
        let errors: Arc<dyn Sink> = Arc::new(FileSink::error(&log_dir)?);
        let typing: Arc<dyn Sink> =
            Arc::new(TypingConsoleSink::new(console.clone(), builder.typing_speed()));
        let instant: Arc<dyn Sink> = Arc::new(InstantConsoleSink::new(console));

        let typer = Channel::new(channel::TYPER, vec![typing, activity.clone(), errors.clone()]);
        let logger = Channel::new(channel::LOGGER, vec![instant, activity.clone(), errors.clone()]);
        let json = Channel::new(channel::JSON_LOGGER, vec![activity, errors]);

        tracing::debug!(log_dir = %log_dir.display(), level = %builder.level(), "logger initialized");

        Ok(Self {
            log_dir,
            typer,
            logger,
            json,
            levels: RwLock::new(ChannelLevels {
                logger: builder.level(),
                typer: builder.level(),
            }),
            observers: RwLock::new(Vec::new()),
            typing_lock: Mutex::new(()),
        })
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Process-wide instance
    // ═══════════════════════════════════════════════════════════════════════

    /// Initialize the process-wide logger, or return it if it already exists.
    ///
    /// Only the first successful call uses `builder`; it creates the log
    /// directory and opens the files. Every later call returns the same
    /// instance untouched. A failed first call leaves nothing installed.
    pub fn init(builder: LoggerBuilder) -> LogResult<Arc<Logger>> {
        let mut global = GLOBAL.lock();
        if let Some(existing) = global.as_ref() {
            return Ok(existing.clone());
        }
        let logger = Arc::new(builder.build()?);
        *global = Some(logger.clone());
        Ok(logger)
    }

    /// The process-wide logger, built from the environment on first access.
    pub fn global() -> LogResult<Arc<Logger>> {
        if let Some(existing) = Self::try_global() {
            return Ok(existing);
        }
        Self::init(LoggerBuilder::from_env())
    }

    /// The process-wide logger if it has been initialized.
    pub fn try_global() -> Option<Arc<Logger>> {
        GLOBAL.lock().clone()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Plain logging (LOGGER channel)
    // ═══════════════════════════════════════════════════════════════════════

    #[track_caller]
    pub fn debug(&self, message: impl Into<Message>, title: &str, title_color: &str) {
        self.log(LogLevel::Debug, title, title_color, message);
    }

    #[track_caller]
    pub fn info(&self, message: impl Into<Message>, title: &str, title_color: &str) {
        self.log(LogLevel::Info, title, title_color, message);
    }

    #[track_caller]
    pub fn warn(&self, message: impl Into<Message>, title: &str, title_color: &str) {
        self.log(LogLevel::Warn, title, title_color, message);
    }

    /// Log an error. The title is always shown in red.
    #[track_caller]
    pub fn error(&self, title: &str, message: impl Into<Message>) {
        let location = SourceLocation::from_caller(Location::caller());
        self.error_at(title, message, location);
    }

    pub fn error_at(&self, title: &str, message: impl Into<Message>, location: SourceLocation) {
        self.log_at(LogLevel::Error, title, color::RED.as_str(), message, location);
    }

    /// Log at `level` on the LOGGER channel, recording the caller's location.
    #[track_caller]
    pub fn log(&self, level: LogLevel, title: &str, title_color: &str, message: impl Into<Message>) {
        let location = SourceLocation::from_caller(Location::caller());
        self.log_at(level, title, title_color, message, location);
    }

    pub fn log_at(
        &self,
        level: LogLevel,
        title: &str,
        title_color: &str,
        message: impl Into<Message>,
        location: SourceLocation,
    ) {
        let event = LogEvent::new(level, message)
            .with_title(title)
            .with_color(title_color)
            .with_location(location);
        self.log_event(&event);
    }

    /// Route a prepared event through the LOGGER channel.
    pub fn log_event(&self, event: &LogEvent) {
        if event.level < self.levels.read().logger {
            return;
        }
        let failures = self.logger.dispatch(event);
        self.report_failures(failures);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Animated logging (TYPER channel)
    // ═══════════════════════════════════════════════════════════════════════

    /// Type `content` onto the console and record it in the log files.
    ///
    /// Observers receive `"{title}. {content}"` first. Animated calls are
    /// serialized process-wide, so two calls never mix their words.
    #[track_caller]
    pub fn typewriter_log(
        &self,
        title: &str,
        title_color: &str,
        content: impl Into<Message>,
        level: LogLevel,
    ) {
        let location = SourceLocation::from_caller(Location::caller());
        self.typewriter_log_at(title, title_color, content, level, location);
    }

    pub fn typewriter_log_at(
        &self,
        title: &str,
        title_color: &str,
        content: impl Into<Message>,
        level: LogLevel,
        location: SourceLocation,
    ) {
        let content = content.into();

        let observers = self.observers.read().clone();
        if !observers.is_empty() {
            observer::notify_all(&observers, &format!("{}. {}", title, content.as_str()));
        }

        let event = LogEvent::new(level, content)
            .with_title(title)
            .with_color(title_color)
            .with_location(location);

        let _guard = self.typing_lock.lock();
        if event.level < self.levels.read().typer {
            return;
        }
        let failures = self.typer.dispatch(&event);
        self.report_failures(failures);
    }

    /// Remind the user to check their configuration.
    #[track_caller]
    pub fn double_check(&self, additional_text: Option<&str>) {
        let text = additional_text
            .filter(|t| !t.is_empty())
            .unwrap_or(DOUBLE_CHECK_TEXT);
        self.typewriter_log(
            "DOUBLE CHECK CONFIGURATION",
            color::YELLOW.as_str(),
            text,
            LogLevel::Info,
        );
    }

    // ═══════════════════════════════════════════════════════════════════════
    // JSON snapshots (JSON_LOGGER channel)
    // ═══════════════════════════════════════════════════════════════════════

    /// Overwrite `file_name` in the log directory with `data` as pretty JSON.
    ///
    /// The document is also recorded as one line in `activity.log`. Returns
    /// the snapshot path. If `data` cannot be serialized nothing is written.
    pub fn log_json<T: Serialize + ?Sized>(
        &self,
        data: &T,
        file_name: impl AsRef<Path>,
    ) -> LogResult<PathBuf> {
        let value = serde_json::to_value(data)?;
        Ok(self.snapshot(value, file_name.as_ref()))
    }

    /// Like [`Logger::log_json`] for a document that is already JSON text.
    pub fn log_json_str(&self, text: &str, file_name: impl AsRef<Path>) -> LogResult<PathBuf> {
        let value: Value = serde_json::from_str(text)?;
        Ok(self.snapshot(value, file_name.as_ref()))
    }

    fn snapshot(&self, value: Value, file_name: &Path) -> PathBuf {
        let sink = JsonSnapshotSink::new(self.log_dir.join(file_name));
        let event = LogEvent::new(LogLevel::Debug, value.to_string()).with_payload(value);

        let failures = self.json.dispatch_with(&event, &sink);
        self.report_failures(failures);
        sink.path().to_path_buf()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Configuration
    // ═══════════════════════════════════════════════════════════════════════

    /// Set the threshold of both the LOGGER and TYPER channels.
    pub fn set_level(&self, level: LogLevel) {
        *self.levels.write() = ChannelLevels {
            logger: level,
            typer: level,
        };
    }

    pub fn levels(&self) -> ChannelLevels {
        *self.levels.read()
    }

    /// Absolute directory used by the file sinks.
    pub fn get_log_directory(&self) -> &Path {
        &self.log_dir
    }

    pub fn register_observer(&self, observer: Arc<dyn ChatObserver>) {
        self.observers.write().push(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.read().len()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Failure reporting
    // ═══════════════════════════════════════════════════════════════════════

    /// Report sink failures on the LOGGER channel, skipping the failed sink.
    ///
    /// Failures raised while reporting are dropped.
    fn report_failures(&self, failures: Vec<SinkFailure>) {
        for failure in failures {
            if REPORTING.with(|flag| flag.replace(true)) {
                tracing::debug!(sink = %failure.sink, error = %failure.error, "dropping nested sink failure");
                continue;
            }

            let event = LogEvent::new(LogLevel::Error, failure.error.to_string())
                .with_title(format!("Sink {} failed", failure.sink))
                .with_color(color::RED.as_str());
            for nested in self.logger.dispatch_except(&event, &failure.sink) {
                tracing::debug!(sink = %nested.sink, error = %nested.error, "failed to report sink failure");
            }

            REPORTING.with(|flag| flag.set(false));
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("log_dir", &self.log_dir)
            .field("levels", &self.levels())
            .field("observers", &self.observer_count())
            .finish_non_exhaustive()
    }
}
