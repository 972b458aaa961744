//! Named groups of sinks.
//!
//! A channel hands each event to its sinks in registration order. Sink
//! failures do not stop delivery to the remaining sinks; they are collected
//! and returned to the caller.

use std::sync::Arc;

use crate::error::LogError;
use crate::event::LogEvent;
use crate::sink::Sink;

/// Animated console output plus the log files.
pub const TYPER: &str = "TYPER";

/// Plain console output plus the log files.
pub const LOGGER: &str = "LOGGER";

/// Log files plus a per-request JSON snapshot.
pub const JSON_LOGGER: &str = "JSON_LOGGER";

/// A sink that returned an error while handling an event.
#[derive(Debug)]
pub struct SinkFailure {
    pub sink: String,
    pub error: LogError,
}

pub struct Channel {
    name: &'static str,
    sinks: Vec<Arc<dyn Sink>>,
}

impl Channel {
    pub fn new(name: &'static str, sinks: Vec<Arc<dyn Sink>>) -> Self {
        Self { name, sinks }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }

    /// Deliver `event` to every sink.
    pub fn dispatch(&self, event: &LogEvent) -> Vec<SinkFailure> {
        self.dispatch_filtered(event, None, |_| true)
    }

    /// Deliver `event` to every sink and to `transient`, which is only part
    /// of the channel for this one delivery.
    pub fn dispatch_with(&self, event: &LogEvent, transient: &dyn Sink) -> Vec<SinkFailure> {
        self.dispatch_filtered(event, Some(transient), |_| true)
    }

    /// Deliver `event` to every sink except the one named `skip`.
    pub fn dispatch_except(&self, event: &LogEvent, skip: &str) -> Vec<SinkFailure> {
        self.dispatch_filtered(event, None, |sink| sink.name() != skip)
    }

    fn dispatch_filtered(
        &self,
        event: &LogEvent,
        transient: Option<&dyn Sink>,
        keep: impl Fn(&dyn Sink) -> bool,
    ) -> Vec<SinkFailure> {
        let mut failures = Vec::new();
        for sink in &self.sinks {
            if keep(sink.as_ref()) {
                deliver(sink.as_ref(), event, &mut failures);
            }
        }
        if let Some(sink) = transient {
            if keep(sink) {
                deliver(sink, event, &mut failures);
            }
        }
        failures
    }
}

fn deliver(sink: &dyn Sink, event: &LogEvent, failures: &mut Vec<SinkFailure>) {
    if let Err(error) = sink.handle(event) {
        failures.push(SinkFailure {
            sink: sink.name().to_string(),
            error,
        });
    }
}
