//! ANSI foreground color tags used for event titles.
//!
//! Tags are plain escape strings so they can be stored in an event and
//! stripped again by [`crate::filter`] before reaching a file. The codes
//! come from [`colored::Color`].

use std::sync::LazyLock;

use colored::Color;

/// Escape sequence that switches the foreground to `color`.
pub fn foreground(color: Color) -> String {
    format!("\x1b[{}m", color.to_fg_str())
}

pub static BLACK: LazyLock<String> = LazyLock::new(|| foreground(Color::Black));
pub static RED: LazyLock<String> = LazyLock::new(|| foreground(Color::Red));
pub static GREEN: LazyLock<String> = LazyLock::new(|| foreground(Color::Green));
pub static YELLOW: LazyLock<String> = LazyLock::new(|| foreground(Color::Yellow));
pub static BLUE: LazyLock<String> = LazyLock::new(|| foreground(Color::Blue));
pub static MAGENTA: LazyLock<String> = LazyLock::new(|| foreground(Color::Magenta));
pub static CYAN: LazyLock<String> = LazyLock::new(|| foreground(Color::Cyan));
pub static WHITE: LazyLock<String> = LazyLock::new(|| foreground(Color::White));
pub static LIGHT_BLACK: LazyLock<String> = LazyLock::new(|| foreground(Color::BrightBlack));
pub static LIGHT_RED: LazyLock<String> = LazyLock::new(|| foreground(Color::BrightRed));
pub static LIGHT_GREEN: LazyLock<String> = LazyLock::new(|| foreground(Color::BrightGreen));
pub static LIGHT_YELLOW: LazyLock<String> = LazyLock::new(|| foreground(Color::BrightYellow));
pub static LIGHT_BLUE: LazyLock<String> = LazyLock::new(|| foreground(Color::BrightBlue));
pub static LIGHT_MAGENTA: LazyLock<String> = LazyLock::new(|| foreground(Color::BrightMagenta));
pub static LIGHT_CYAN: LazyLock<String> = LazyLock::new(|| foreground(Color::BrightCyan));
pub static LIGHT_WHITE: LazyLock<String> = LazyLock::new(|| foreground(Color::BrightWhite));

/// Resets every style attribute.
pub const RESET: &str = "\x1b[0m";
