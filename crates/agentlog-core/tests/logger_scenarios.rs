//! End-to-end routing scenarios for the logging facade.

use std::fs;
use std::io::{self, Write};
use std::sync::Arc;

use agentlog_core::{
    color, log_error, log_info, ConsoleWriter, LogLevel, Logger, LoggerBuilder, TypingSpeed,
};
use parking_lot::Mutex;
use tempfile::TempDir;

#[derive(Clone, Default)]
struct Console(Arc<Mutex<Vec<u8>>>);

impl Console {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl Write for Console {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct Harness {
    _temp: TempDir,
    logger: Logger,
    console: Console,
}

impl Harness {
    fn new() -> Self {
        Self::with_level(LogLevel::Debug)
    }

    fn with_level(level: LogLevel) -> Self {
        let temp = TempDir::new().unwrap();
        let console = Console::default();
        let logger = LoggerBuilder::new()
            .with_log_dir(temp.path().join("logs"))
            .with_level(level)
            .with_console(ConsoleWriter::new(console.clone()))
            .with_typing_speed(TypingSpeed::instant())
            .build()
            .unwrap();
        Self {
            _temp: temp,
            logger,
            console,
        }
    }

    fn lines(&self, file: &str) -> Vec<String> {
        fs::read_to_string(self.logger.get_log_directory().join(file))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

#[test]
fn info_reaches_activity_but_not_error_log() {
    let h = Harness::with_level(LogLevel::Info);

    h.logger.info("hello", "X", color::BLUE.as_str());

    let activity = h.lines("activity.log");
    assert_eq!(activity.len(), 1);
    assert!(activity[0].ends_with(" INFO X hello"), "got {:?}", activity[0]);
    assert!(h.lines("error.log").is_empty());
}

#[test]
fn error_reaches_both_files_and_only_error_log_has_location() {
    let h = Harness::new();

    h.logger.error("bad thing", "");
    let line = line!() - 1;

    let activity = h.lines("activity.log");
    let errors = h.lines("error.log");
    assert_eq!(activity.len(), 1);
    assert_eq!(errors.len(), 1);

    let location = format!("logger_scenarios::{line}");
    assert!(activity[0].contains(" ERROR bad thing"));
    assert!(!activity[0].contains(&location));
    assert!(errors[0].contains(&format!(" ERROR {location} bad thing")));
}

#[test]
fn error_log_only_receives_errors() {
    let h = Harness::new();

    h.logger.debug("d", "", "");
    h.logger.info("i", "", "");
    h.logger.warn("w", "", "");
    h.logger.error("e", "");
    h.logger
        .typewriter_log("typed", "", "error via typer", LogLevel::Error);

    assert_eq!(h.lines("activity.log").len(), 5);
    let errors = h.lines("error.log");
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|l| l.contains(" ERROR ")));
}

#[test]
fn sequence_messages_are_joined_with_spaces() {
    let h = Harness::new();

    h.logger.info(vec!["search", "the", "web"], "STEP", "");

    assert_eq!(h.console.contents(), "STEP search the web\n");
    assert!(h.lines("activity.log")[0].ends_with("STEP search the web"));
}

#[test]
fn console_keeps_colors_files_do_not() {
    let h = Harness::new();

    h.logger.info(
        format!("{}green text{}", *color::GREEN, color::RESET),
        "C",
        color::RED.as_str(),
    );

    let console = h.console.contents();
    assert!(console.contains('\x1b'));
    for line in h.lines("activity.log") {
        assert!(!line.contains('\x1b'));
        assert!(line.ends_with("C green text"));
    }
}

#[test]
fn debug_is_typed_nowhere_but_recorded() {
    let h = Harness::new();

    h.logger
        .typewriter_log("TRACE", "", "low level detail", LogLevel::Debug);

    assert!(h.console.contents().is_empty());
    assert_eq!(h.lines("activity.log").len(), 1);
}

#[test]
fn snapshot_overwrites_previous_document() {
    let h = Harness::new();

    let path = h
        .logger
        .log_json(&serde_json::json!({"a": 1}), "snap.json")
        .unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "{\n    \"a\": 1\n}");

    h.logger
        .log_json(&serde_json::json!({"b": 2}), "snap.json")
        .unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "{\n    \"b\": 2\n}");
    assert!(!content.contains("\"a\""));

    // both requests are recorded in the activity log, neither in error.log
    assert_eq!(h.lines("activity.log").len(), 2);
    assert!(h.lines("error.log").is_empty());
}

#[test]
fn snapshot_requests_do_not_cross_write() {
    let h = Arc::new(Harness::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let h = h.clone();
            std::thread::spawn(move || {
                h.logger
                    .log_json(&serde_json::json!({ "id": i }), format!("snap-{i}.json"))
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    for i in 0..8 {
        let path = h.logger.get_log_directory().join(format!("snap-{i}.json"));
        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({ "id": i }));
    }
}

#[test]
fn concurrent_snapshots_to_one_file_leave_a_whole_document() {
    let h = Arc::new(Harness::new());
    let big = serde_json::json!({ "big": "x".repeat(4000) });
    let small = serde_json::json!({ "s": 1 });

    for round in 0..50 {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let h = h.clone();
                let doc = if i % 2 == 0 { big.clone() } else { small.clone() };
                std::thread::spawn(move || {
                    h.logger.log_json(&doc, "race.json").unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let text = fs::read_to_string(h.logger.get_log_directory().join("race.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text)
            .unwrap_or_else(|e| panic!("round {round}: {e} in {} bytes", text.len()));
        assert!(value == big || value == small, "round {round}");
    }

    assert!(h.lines("error.log").is_empty());
    let leftovers: Vec<_> = fs::read_dir(h.logger.get_log_directory())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| !name.ends_with(".log") && name != "race.json")
        .collect();
    assert!(leftovers.is_empty(), "{leftovers:?}");
}

#[test]
fn malformed_snapshot_is_reported_to_caller() {
    let h = Harness::new();

    assert!(h.logger.log_json_str("[1, 2", "broken.json").is_err());
    assert!(!h.logger.get_log_directory().join("broken.json").exists());
    assert!(h.lines("activity.log").is_empty());
}

#[test]
fn set_level_applies_to_plain_and_typed_output() {
    let h = Harness::new();

    h.logger.set_level(LogLevel::Error);
    h.logger.warn("hidden", "", "");
    h.logger
        .typewriter_log("T", "", "hidden too", LogLevel::Warn);
    h.logger.error("shown", "");

    assert_eq!(h.lines("activity.log").len(), 1);
    assert!(h.console.contents().contains("shown"));
    assert!(!h.console.contents().contains("hidden"));
}

#[test]
fn macros_record_function_name() {
    let h = Harness::new();

    log_info!(h.logger, "plain info");
    log_error!(h.logger, "Tool failed", "exit code 2");
    let line = line!() - 1;

    let errors = h.lines("error.log");
    assert_eq!(errors.len(), 1);
    assert!(
        errors[0].contains(&format!(
            " ERROR logger_scenarios:macros_record_function_name:{line} Tool failed exit code 2"
        )),
        "got {:?}",
        errors[0]
    );
}

#[test]
fn failing_observer_does_not_block_logging() {
    let h = Harness::new();
    let reports = Arc::new(Mutex::new(Vec::new()));

    h.logger
        .register_observer(Arc::new(|_: &str| -> anyhow::Result<()> {
            anyhow::bail!("speech engine offline")
        }));
    {
        let reports = reports.clone();
        h.logger
            .register_observer(Arc::new(move |text: &str| -> anyhow::Result<()> {
                reports.lock().push(text.to_string());
                Ok(())
            }));
    }

    h.logger
        .typewriter_log("GOAL", color::CYAN.as_str(), "write report", LogLevel::Info);

    assert_eq!(*reports.lock(), vec!["GOAL. write report".to_string()]);
    assert!(h.console.contents().contains("write report"));
    assert_eq!(h.lines("activity.log").len(), 1);
}
