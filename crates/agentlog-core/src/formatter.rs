//! Pattern-based record formatting.
//!
//! A pattern is plain text with named placeholders in braces, e.g.
//! `"{asctime} {levelname} {title} {message_no_color}"`. Patterns are parsed
//! once when the formatter is built; formatting itself cannot fail and renders
//! every missing optional field as an empty string.

use std::fmt::Write;

use crate::color::RESET;
use crate::error::{LogError, LogResult};
use crate::event::LogEvent;
use crate::filter::strip_color_codes;

/// Pattern used by both console sinks (colored title, raw message).
pub const CONSOLE_PATTERN: &str = "{title_color} {message}";

/// Pattern used by `activity.log`.
pub const ACTIVITY_PATTERN: &str = "{asctime} {levelname} {title} {message_no_color}";

/// Pattern used by `error.log`, includes the source location.
pub const ERROR_PATTERN: &str =
    "{asctime} {levelname} {module}:{funcName}:{lineno} {title} {message_no_color}";

/// Timestamp layout for `{asctime}`.
const ASCTIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Asctime,
    Levelname,
    Title,
    TitleColor,
    Message,
    MessageNoColor,
    Module,
    FuncName,
    Lineno,
}

impl Field {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "asctime" => Field::Asctime,
            "levelname" => Field::Levelname,
            "title" => Field::Title,
            "title_color" => Field::TitleColor,
            "message" => Field::Message,
            "message_no_color" => Field::MessageNoColor,
            "module" => Field::Module,
            "funcName" => Field::FuncName,
            "lineno" => Field::Lineno,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field),
}

/// Formats a [`LogEvent`] according to a parsed pattern.
#[derive(Debug, Clone)]
pub struct RecordFormatter {
    segments: Vec<Segment>,
}

impl RecordFormatter {
    /// Parse `pattern` into a formatter.
    pub fn new(pattern: &str) -> LogResult<Self> {
        let mut segments = Vec::new();
        let mut rest = pattern;

        while let Some(open) = rest.find('{') {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| LogError::Pattern(format!("unclosed placeholder in {pattern:?}")))?;
            let name = &after[..close];
            let field = Field::parse(name)
                .ok_or_else(|| LogError::Pattern(format!("unknown placeholder {{{name}}}")))?;
            segments.push(Segment::Field(field));
            rest = &after[close + 1..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self { segments })
    }

    pub fn console() -> Self {
        Self::builtin(CONSOLE_PATTERN)
    }

    pub fn activity() -> Self {
        Self::builtin(ACTIVITY_PATTERN)
    }

    pub fn error() -> Self {
        Self::builtin(ERROR_PATTERN)
    }

    fn builtin(pattern: &str) -> Self {
        match Self::new(pattern) {
            Ok(formatter) => formatter,
            // built-in patterns only use known placeholders
            Err(_) => Self {
                segments: vec![Segment::Field(Field::Message)],
            },
        }
    }

    /// Render `event` into a single line.
    pub fn format(&self, event: &LogEvent) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(field) => render_field(&mut out, *field, event),
            }
        }
        out
    }
}

fn render_field(out: &mut String, field: Field, event: &LogEvent) {
    match field {
        Field::Asctime => {
            let _ = write!(out, "{}", event.timestamp.format(ASCTIME_FORMAT));
        }
        Field::Levelname => out.push_str(event.level.name()),
        Field::Title => out.push_str(&event.title),
        Field::TitleColor => {
            if event.title_color.is_empty() {
                out.push_str(&event.title);
            } else {
                out.push_str(&event.title_color);
                out.push_str(&event.title);
                out.push(' ');
                out.push_str(RESET);
            }
        }
        Field::Message => out.push_str(&event.message),
        Field::MessageNoColor => out.push_str(&strip_color_codes(&event.message)),
        Field::Module => {
            if let Some(loc) = &event.location {
                out.push_str(&loc.module);
            }
        }
        Field::FuncName => {
            if let Some(loc) = &event.location {
                out.push_str(&loc.function);
            }
        }
        Field::Lineno => {
            if let Some(loc) = &event.location {
                let _ = write!(out, "{}", loc.line);
            }
        }
    }
}
