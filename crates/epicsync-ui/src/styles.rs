//! Ayu color theme and styling functions for epicsync output.
//!
//! Uses the Ayu Dark color palette.
//! Color source: <https://github.com/ayu-theme/ayu-colors>
//!
//! Only outcomes and urgent priorities get color; everything else is plain
//! text so piped output stays readable.

use epicsync_core::enums::Priority;
use owo_colors::OwoColorize;

use crate::terminal::supports_color;

// ---------------------------------------------------------------------------
// Ayu Dark color palette (RGB values)
// ---------------------------------------------------------------------------

const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // #c2d94c - bright green
const WARN: (u8, u8, u8) = (0xff, 0xb4, 0x54); // #ffb454 - bright yellow
const FAIL: (u8, u8, u8) = (0xf0, 0x71, 0x78); // #f07178 - bright red
const MUTED: (u8, u8, u8) = (0x6c, 0x76, 0x80); // #6c7680 - muted gray
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff); // #59c2ff - bright blue

const PRIORITY_P0: (u8, u8, u8) = (0xf0, 0x71, 0x78); // #f07178 - bright red
const PRIORITY_P1: (u8, u8, u8) = (0xff, 0x8f, 0x40); // #ff8f40 - orange
const PRIORITY_P2: (u8, u8, u8) = (0xe6, 0xb4, 0x50); // #e6b450 - muted gold

// ---------------------------------------------------------------------------
// Icons and separators
// ---------------------------------------------------------------------------

pub const ICON_PASS: &str = "\u{2713}"; // ✓
pub const ICON_FAIL: &str = "\u{2717}"; // ✗
pub const ICON_WARN: &str = "\u{26A0}"; // ⚠
pub const ICON_SKIP: &str = "-";

/// Heavy rule used around banners and the summary.
pub const SEPARATOR_HEAVY: &str = "================================================================================";
/// Light rule used between sections.
pub const SEPARATOR_LIGHT: &str = "--------------------------------------------------------------------------------";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Applies truecolor foreground to a string, falling back to plain text
/// when color is not supported.
fn color_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).to_string()
    } else {
        s.to_string()
    }
}

fn color_bold_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).bold().to_string()
    } else {
        s.to_string()
    }
}

pub fn render_fail(s: &str) -> String {
    color_str(s, FAIL)
}

pub fn render_muted(s: &str) -> String {
    color_str(s, MUTED)
}

pub fn render_accent(s: &str) -> String {
    color_str(s, ACCENT)
}

/// Renders text in bold.
pub fn render_bold(s: &str) -> String {
    if supports_color() {
        s.bold().to_string()
    } else {
        s.to_string()
    }
}

/// Renders a section header in uppercase with accent color and bold.
pub fn render_category(s: &str) -> String {
    color_bold_str(&s.to_uppercase(), ACCENT)
}

pub fn render_pass_icon() -> String {
    color_str(ICON_PASS, PASS)
}

pub fn render_fail_icon() -> String {
    color_str(ICON_FAIL, FAIL)
}

pub fn render_warn_icon() -> String {
    color_str(ICON_WARN, WARN)
}

pub fn render_skip_icon() -> String {
    color_str(ICON_SKIP, MUTED)
}

// ---------------------------------------------------------------------------
// Priority rendering
// ---------------------------------------------------------------------------

/// Renders a priority label. P0 is bold red, P1 orange, P2 muted gold;
/// P3 and custom values are plain.
pub fn render_priority(priority: &Priority) -> String {
    let label = priority.as_str();
    match priority {
        Priority::P0 => color_bold_str(label, PRIORITY_P0),
        Priority::P1 => color_str(label, PRIORITY_P1),
        Priority::P2 => color_str(label, PRIORITY_P2),
        _ => label.to_string(),
    }
}
