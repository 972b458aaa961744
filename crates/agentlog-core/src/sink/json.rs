//! One-shot JSON snapshot files.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::error::LogResult;
use crate::event::LogEvent;
use crate::level::LogLevel;

use super::Sink;

/// Sink that overwrites its target with the event's JSON document.
///
/// The document is the event payload when present, otherwise the message
/// text parsed as JSON. It is written to a temporary file next to the
/// target and renamed over it, so readers and concurrent writers only ever
/// see one complete document.
pub struct JsonSnapshotSink {
    path: PathBuf,
}

impl JsonSnapshotSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Pretty-print `value` with a four-space indent.
pub fn to_pretty_json(value: &Value) -> LogResult<String> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

impl Sink for JsonSnapshotSink {
    fn name(&self) -> &str {
        "json-snapshot"
    }

    fn threshold(&self) -> LogLevel {
        LogLevel::Debug
    }

    fn emit(&self, event: &LogEvent) -> LogResult<()> {
        let document = match &event.payload {
            Some(value) => to_pretty_json(value)?,
            None => to_pretty_json(&serde_json::from_str(&event.message)?)?,
        };
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(document.as_bytes())?;
        staged.persist(&self.path).map_err(|e| e.error)?;
        tracing::debug!(path = %self.path.display(), "JSON snapshot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use crate::error::LogError;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_pretty_indent() {
        let text = to_pretty_json(&json!({"a": 1, "b": [true]})).unwrap();
        assert_eq!(text, "{\n    \"a\": 1,\n    \"b\": [\n        true\n    ]\n}");
    }

    #[test]
    fn test_non_ascii_kept() {
        let text = to_pretty_json(&json!({"name": "café"})).unwrap();
        assert!(text.contains("café"));
    }

    #[test]
    fn test_snapshot_overwrites() {
        let temp = TempDir::new().unwrap();
        let sink = JsonSnapshotSink::new(temp.path().join("snap.json"));

        sink.handle(&LogEvent::new(LogLevel::Debug, "").with_payload(json!({"a": 1})))
            .unwrap();
        sink.handle(&LogEvent::new(LogLevel::Debug, "").with_payload(json!({"b": 2})))
            .unwrap();

        let content = fs::read_to_string(sink.path()).unwrap();
        assert_eq!(content, "{\n    \"b\": 2\n}");
    }

    #[test]
    fn test_message_parsed_without_payload() {
        let temp = TempDir::new().unwrap();
        let sink = JsonSnapshotSink::new(temp.path().join("plan.json"));

        sink.handle(&LogEvent::new(LogLevel::Debug, r#"[1, 2]"#)).unwrap();
        let content = fs::read_to_string(sink.path()).unwrap();
        assert_eq!(content, "[\n    1,\n    2\n]");
    }

    #[test]
    fn test_malformed_message_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let sink = JsonSnapshotSink::new(temp.path().join("bad.json"));

        let err = sink.handle(&LogEvent::new(LogLevel::Debug, "{not json")).unwrap_err();
        assert!(matches!(err, LogError::Serialization(_)));
        assert!(!sink.path().exists());
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let sink = JsonSnapshotSink::new(temp.path().join("gone").join("snap.json"));

        let err = sink
            .handle(&LogEvent::new(LogLevel::Debug, "").with_payload(json!({"a": 1})))
            .unwrap_err();
        assert!(matches!(err, LogError::Io(_)));
    }

    #[test]
    fn test_no_staging_files_left_behind() {
        let temp = TempDir::new().unwrap();
        let sink = JsonSnapshotSink::new(temp.path().join("snap.json"));

        for i in 0..5 {
            sink.handle(&LogEvent::new(LogLevel::Debug, "").with_payload(json!({"i": i})))
                .unwrap();
        }

        let names: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("snap.json")]);
    }
}
