//! ANSI escape sequence removal for sinks that do not render color.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

static ANSI_ESCAPE: OnceLock<Regex> = OnceLock::new();

fn ansi_escape() -> &'static Regex {
    ANSI_ESCAPE.get_or_init(|| {
        // ESC + single Fe byte, or a CSI sequence: ESC [ params intermediates final
        Regex::new(r"\x1B(?:[@-Z\\-_]|\[[0-?]*[ -/]*[@-~])").expect("valid ANSI pattern")
    })
}

/// Remove every ANSI escape sequence from `input`.
///
/// Removal is repeated until nothing matches, so sequences that only appear
/// after an inner sequence is cut out are removed as well and
/// `strip_color_codes(strip_color_codes(x)) == strip_color_codes(x)`.
pub fn strip_color_codes(input: &str) -> String {
    let pattern = ansi_escape();
    let mut current = input.to_string();
    while pattern.is_match(&current) {
        current = pattern.replace_all(&current, "").into_owned();
    }
    current
}

/// Serialize a non-text value to JSON and strip it.
///
/// Serialization failures produce an empty string.
pub fn strip_value_color_codes<T: Serialize + ?Sized>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(text) => strip_color_codes(&text),
        Err(e) => {
            tracing::debug!(error = %e, "value could not be rendered as JSON");
            String::new()
        }
    }
}
