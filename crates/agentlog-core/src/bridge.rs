//! Custom tracing Layer that forwards events into a [`Logger`].
//!
//! This lets code instrumented with `tracing` land in the same console and
//! log files as the agent's own output. A `title` field becomes the event
//! title, other fields are appended to the message as `key=value`.
//!
//! ```ignore
//! use agentlog_core::{Logger, LoggerLayer};
//! use tracing_subscriber::prelude::*;
//!
//! let logger = Logger::global()?;
//! tracing_subscriber::registry()
//!     .with(LoggerLayer::new(logger))
//!     .init();
//! ```

use std::fmt::Write as FmtWrite;
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use crate::event::{LogEvent, SourceLocation};
use crate::level::LogLevel;
use crate::logger::Logger;

/// Targets starting with this prefix are the facility's own diagnostics.
const OWN_TARGET: &str = "agentlog";

/// A tracing Layer that writes events through a [`Logger`].
pub struct LoggerLayer {
    logger: Arc<Logger>,
}

impl LoggerLayer {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }
}

impl<S> Layer<S> for LoggerLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if metadata.target().starts_with(OWN_TARGET) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let mut message = visitor.message.unwrap_or_default();
        for (name, value) in &visitor.fields {
            if !message.is_empty() {
                message.push(' ');
            }
            let _ = write!(message, "{}={}", name, value);
        }

        let module = metadata
            .module_path()
            .unwrap_or_else(|| metadata.target())
            .rsplit("::")
            .next()
            .unwrap_or_default();
        let location = SourceLocation::new(module, "", metadata.line().unwrap_or(0));

        let level = LogLevel::from(*metadata.level());
        let log_event = LogEvent::new(level, message)
            .with_title(visitor.title.unwrap_or_default())
            .with_location(location);

        self.logger.log_event(&log_event);
    }
}

/// Visitor that extracts message, title and remaining fields.
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    title: Option<String>,
    fields: Vec<(String, String)>,
}

impl FieldVisitor {
    fn store(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = Some(value),
            "title" => self.title = Some(value),
            name => self.fields.push((name.to_string(), value)),
        }
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let mut buf = String::new();
        let _ = write!(&mut buf, "{:?}", value);
        self.store(field, buf);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.store(field, value.to_string());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.store(field, value.to_string());
    }
}
