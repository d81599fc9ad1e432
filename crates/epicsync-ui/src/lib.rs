//! Terminal styling for epicsync console output.
//!
//! Provides Ayu-themed colors, pass/fail icons, and terminal color detection.

pub mod styles;
pub mod terminal;
