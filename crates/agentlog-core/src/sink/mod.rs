//! Log destinations.
//!
//! Every destination implements [`Sink`]. A sink owns its formatter and level
//! threshold; the same sink instance can be shared by several channels.
//!
//! | Sink | Medium | Threshold |
//! |------|--------|-----------|
//! | [`InstantConsoleSink`] | console, whole line | DEBUG |
//! | [`TypingConsoleSink`] | console, word by word | INFO |
//! | [`FileSink::activity`] | `activity.log`, append | DEBUG |
//! | [`FileSink::error`] | `error.log`, append | ERROR |
//! | [`JsonSnapshotSink`] | caller-named JSON file, overwrite | DEBUG |

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::LogResult;
use crate::event::LogEvent;
use crate::level::LogLevel;

pub mod console;
pub mod file;
pub mod json;
pub mod typing;

pub use console::InstantConsoleSink;
pub use file::FileSink;
pub use json::JsonSnapshotSink;
pub use typing::{TypingConsoleSink, TypingRenderer, TypingSpeed};

/// A destination for log events.
pub trait Sink: Send + Sync {
    /// Short name used when reporting failures.
    fn name(&self) -> &str;

    /// Events below this level are dropped before formatting.
    fn threshold(&self) -> LogLevel;

    /// Format and write one event. Called only for events at or above
    /// [`Sink::threshold`].
    fn emit(&self, event: &LogEvent) -> LogResult<()>;

    /// Apply the threshold, then emit.
    fn handle(&self, event: &LogEvent) -> LogResult<()> {
        if event.level < self.threshold() {
            return Ok(());
        }
        self.emit(event)
    }
}

/// Shared handle to the console stream.
///
/// Each call locks the stream only for the bytes it writes, so a whole line
/// from [`InstantConsoleSink`] is never split, while a typing animation may
/// see plain lines land between its words.
#[derive(Clone)]
pub struct ConsoleWriter {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl ConsoleWriter {
    /// Wrap an arbitrary writer (used by tests to capture output).
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Console writer bound to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Writer that discards everything.
    pub fn discard() -> Self {
        Self::new(io::sink())
    }

    /// Write `line` followed by a newline in one locked operation.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self.inner.lock();
        writeln!(writer, "{}", line)?;
        writer.flush()
    }

    /// Write `fragment` without a newline and flush immediately.
    pub fn write_fragment(&self, fragment: &str) -> io::Result<()> {
        let mut writer = self.inner.lock();
        writer.write_all(fragment.as_bytes())?;
        writer.flush()
    }
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self::stdout()
    }
}

impl std::fmt::Debug for ConsoleWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleWriter").finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::io::{self, Write};
    use std::sync::Arc;

    use parking_lot::Mutex;

    /// In-memory writer whose contents can be read back after the fact.
    #[derive(Clone, Default)]
    pub struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        pub fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Writer that fails every call.
    pub struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "console closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "console closed"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::Captured;
    use super::*;

    struct Counting {
        threshold: LogLevel,
        seen: Mutex<usize>,
    }

    impl Sink for Counting {
        fn name(&self) -> &str {
            "counting"
        }

        fn threshold(&self) -> LogLevel {
            self.threshold
        }

        fn emit(&self, _event: &LogEvent) -> LogResult<()> {
            *self.seen.lock() += 1;
            Ok(())
        }
    }

    #[test]
    fn test_handle_applies_threshold() {
        let sink = Counting {
            threshold: LogLevel::Warn,
            seen: Mutex::new(0),
        };

        for level in [LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error] {
            sink.handle(&LogEvent::new(level, "x")).unwrap();
        }
        assert_eq!(*sink.seen.lock(), 2);
    }

    #[test]
    fn test_console_writer_line_and_fragment() {
        let captured = Captured::default();
        let writer = ConsoleWriter::new(captured.clone());

        writer.write_fragment("a").unwrap();
        writer.write_fragment(" b").unwrap();
        writer.write_line("").unwrap();
        writer.write_line("next").unwrap();

        assert_eq!(captured.contents(), "a b\nnext\n");
    }
}
