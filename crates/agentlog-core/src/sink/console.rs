//! Console sink that prints each event as one complete line.

use crate::error::LogResult;
use crate::event::LogEvent;
use crate::formatter::RecordFormatter;
use crate::level::LogLevel;

use super::{ConsoleWriter, Sink};

pub struct InstantConsoleSink {
    writer: ConsoleWriter,
    formatter: RecordFormatter,
    threshold: LogLevel,
}

impl InstantConsoleSink {
    /// Console sink with the colored console pattern and a DEBUG threshold.
    pub fn new(writer: ConsoleWriter) -> Self {
        Self {
            writer,
            formatter: RecordFormatter::console(),
            threshold: LogLevel::Debug,
        }
    }

    pub fn with_threshold(mut self, threshold: LogLevel) -> Self {
        self.threshold = threshold;
        self
    }
}

impl Sink for InstantConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    fn threshold(&self) -> LogLevel {
        self.threshold
    }

    fn emit(&self, event: &LogEvent) -> LogResult<()> {
        let line = self.formatter.format(event);
        self.writer.write_line(&line)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;
    use crate::error::LogError;
    use crate::sink::testing::{Broken, Captured};

    #[test]
    fn test_prints_colored_line() {
        let captured = Captured::default();
        let sink = InstantConsoleSink::new(ConsoleWriter::new(captured.clone()));

        let event = LogEvent::new(LogLevel::Info, "ready")
            .with_title("AGENT")
            .with_color(color::GREEN.as_str());
        sink.handle(&event).unwrap();

        assert_eq!(captured.contents(), "\x1b[32mAGENT \x1b[0m ready\n");
    }

    #[test]
    fn test_threshold_override() {
        let captured = Captured::default();
        let sink =
            InstantConsoleSink::new(ConsoleWriter::new(captured.clone())).with_threshold(LogLevel::Warn);

        sink.handle(&LogEvent::new(LogLevel::Info, "quiet")).unwrap();
        sink.handle(&LogEvent::new(LogLevel::Warn, "loud")).unwrap();

        assert_eq!(captured.contents(), " loud\n");
    }

    #[test]
    fn test_write_failure_is_returned() {
        let sink = InstantConsoleSink::new(ConsoleWriter::new(Broken));
        let err = sink.handle(&LogEvent::new(LogLevel::Info, "x")).unwrap_err();
        assert!(matches!(err, LogError::Io(_)));
    }
}
