//! Log event types.
//!
//! A [`LogEvent`] is built once at the facade boundary and shared by every
//! sink of a channel. Multi-part messages are joined there, so sinks and
//! formatters only ever see a single string.

use std::panic::Location;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::Value;

use crate::level::LogLevel;

/// Normalized message text.
///
/// Sequences of strings are joined with single spaces on conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Message(String);

impl Message {
    /// Join the given parts with single spaces.
    pub fn join<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for (i, part) in parts.into_iter().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            text.push_str(part.as_ref());
        }
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for Message {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Message {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&String> for Message {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

impl From<Vec<String>> for Message {
    fn from(value: Vec<String>) -> Self {
        Self::join(value)
    }
}

impl From<Vec<&str>> for Message {
    fn from(value: Vec<&str>) -> Self {
        Self::join(value)
    }
}

impl From<&[&str]> for Message {
    fn from(value: &[&str]) -> Self {
        Self::join(value)
    }
}

impl From<&[String]> for Message {
    fn from(value: &[String]) -> Self {
        Self::join(value)
    }
}

impl<const N: usize> From<[&str; N]> for Message {
    fn from(value: [&str; N]) -> Self {
        Self::join(value)
    }
}

/// Where an event was emitted from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    /// Module name (file stem or module path)
    pub module: String,

    /// Enclosing function, empty when unknown
    pub function: String,

    pub line: u32,
}

impl SourceLocation {
    pub fn new(module: impl Into<String>, function: impl Into<String>, line: u32) -> Self {
        Self {
            module: module.into(),
            function: function.into(),
            line,
        }
    }

    /// Build a location from a `#[track_caller]` location.
    ///
    /// The module is the file stem of the caller's source file; the function
    /// name is not available this way and stays empty.
    pub fn from_caller(location: &Location<'_>) -> Self {
        let module = Path::new(location.file())
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            module,
            function: String::new(),
            line: location.line(),
        }
    }
}

/// A single structured log event.
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub level: LogLevel,

    /// Title shown before the message, may be empty
    pub title: String,

    /// ANSI color tag for the title, empty for no color
    pub title_color: String,

    pub message: String,

    pub timestamp: DateTime<Local>,

    pub location: Option<SourceLocation>,

    /// Raw JSON document for snapshot sinks
    pub payload: Option<Value>,
}

impl LogEvent {
    /// Create a new event stamped with the current local time.
    pub fn new(level: LogLevel, message: impl Into<Message>) -> Self {
        Self {
            level,
            title: String::new(),
            title_color: String::new(),
            message: message.into().into_string(),
            timestamp: Local::now(),
            location: None,
            payload: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.title_color = color.into();
        self
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}
