//! Agent logging facility.
//!
//! Routes an autonomous agent's log output to several destinations at once:
//!
//! - the console, either instantly or with a simulated typing effect
//! - `activity.log`, every event with colors stripped
//! - `error.log`, errors only, with the source location
//! - caller-named JSON snapshot files, overwritten on every write
//!
//! ## Architecture
//!
//! ```text
//! caller ─▶ Logger ─▶ Channel (TYPER | LOGGER | JSON_LOGGER)
//!                        └─▶ Sink ─▶ RecordFormatter ─▶ console / file
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use agentlog_core::{color, LogLevel, Logger, LoggerBuilder};
//!
//! let logger = Logger::init(LoggerBuilder::from_env())?;
//!
//! logger.info("connected to tool server", "TOOLS", color::GREEN.as_str());
//! logger.typewriter_log("THOUGHTS:", color::YELLOW.as_str(), "I should search first", LogLevel::Info);
//! logger.log_json(&serde_json::json!({"step": 1}), "plan.json")?;
//! logger.error("Tool failed", "exit code 2");
//! ```

pub mod bridge;
pub mod builder;
pub mod channel;
pub mod color;
pub mod error;
pub mod event;
pub mod filter;
pub mod formatter;
pub mod level;
pub mod logger;
mod macros;
pub mod observer;
pub mod present;
pub mod sink;

// Re-exports
pub use bridge::LoggerLayer;
pub use builder::LoggerBuilder;
pub use channel::{Channel, SinkFailure};
pub use error::{LogError, LogResult};
pub use event::{LogEvent, Message, SourceLocation};
pub use filter::{strip_color_codes, strip_value_color_codes};
pub use formatter::RecordFormatter;
pub use level::LogLevel;
pub use logger::{ChannelLevels, Logger};
pub use observer::ChatObserver;
pub use present::{print_assistant_thoughts, print_task_summary, AssistantThoughts, TaskStatus, TaskSummary};
pub use sink::{
    ConsoleWriter, FileSink, InstantConsoleSink, JsonSnapshotSink, Sink, TypingConsoleSink,
    TypingRenderer, TypingSpeed,
};
