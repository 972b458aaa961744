//! Console sink that simulates a person typing.
//!
//! Words are written one at a time with a random pause after each. Both pause
//! bounds shrink by a constant factor after every word, so long messages
//! speed up as they go.
//!
//! The default bounds are `min_speed = 0.05s` and `max_speed = 0.01s`, i.e.
//! the "minimum" is the larger of the two. Sampling uses
//! `min + (max - min) * u` with `u` in `[0, 1)`, which accepts the inverted
//! range and draws from `(0.01, 0.05]`, shrinking toward zero.

use std::io;
use std::thread;
use std::time::Duration;

use rand::Rng;

use crate::error::LogResult;
use crate::event::LogEvent;
use crate::formatter::RecordFormatter;
use crate::level::LogLevel;

use super::{ConsoleWriter, Sink};

/// Pause bounds for the typing animation, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypingSpeed {
    pub min_speed: f64,
    pub max_speed: f64,

    /// Factor applied to both bounds after each word
    pub decay: f64,
}

impl TypingSpeed {
    /// No pauses at all.
    pub fn instant() -> Self {
        Self {
            min_speed: 0.0,
            max_speed: 0.0,
            ..Self::default()
        }
    }

    /// Draw one pause between the two bounds.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        let u: f64 = rng.random();
        let secs = self.min_speed + (self.max_speed - self.min_speed) * u;
        // negative, NaN or overflowing bounds give no pause
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO)
    }

    /// Bounds for the next word.
    pub fn decayed(&self) -> Self {
        Self {
            min_speed: self.min_speed * self.decay,
            max_speed: self.max_speed * self.decay,
            decay: self.decay,
        }
    }
}

impl Default for TypingSpeed {
    fn default() -> Self {
        Self {
            min_speed: 0.05,
            max_speed: 0.01,
            decay: 0.95,
        }
    }
}

/// Word-by-word renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypingRenderer {
    speed: TypingSpeed,
}

impl TypingRenderer {
    pub fn new(speed: TypingSpeed) -> Self {
        Self { speed }
    }

    pub fn speed(&self) -> TypingSpeed {
        self.speed
    }

    /// Type `line` onto `writer`, ending with a line terminator.
    pub fn render(&self, writer: &ConsoleWriter, line: &str) -> io::Result<()> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let mut speed = self.speed;
        let mut rng = rand::rng();

        for (i, word) in words.iter().enumerate() {
            writer.write_fragment(word)?;
            if i + 1 < words.len() {
                writer.write_fragment(" ")?;
            }
            let pause = speed.sample(&mut rng);
            if !pause.is_zero() {
                thread::sleep(pause);
            }
            speed = speed.decayed();
        }
        writer.write_line("")
    }
}

/// Console sink for the animated channel.
pub struct TypingConsoleSink {
    writer: ConsoleWriter,
    formatter: RecordFormatter,
    renderer: TypingRenderer,
    threshold: LogLevel,
}

impl TypingConsoleSink {
    /// Typing sink with the console pattern and an INFO threshold.
    pub fn new(writer: ConsoleWriter, speed: TypingSpeed) -> Self {
        Self {
            writer,
            formatter: RecordFormatter::console(),
            renderer: TypingRenderer::new(speed),
            threshold: LogLevel::Info,
        }
    }
}

impl Sink for TypingConsoleSink {
    fn name(&self) -> &str {
        "typing-console"
    }

    fn threshold(&self) -> LogLevel {
        self.threshold
    }

    fn emit(&self, event: &LogEvent) -> LogResult<()> {
        let line = self.formatter.format(event);
        self.renderer.render(&self.writer, &line)?;
        Ok(())
    }
}
