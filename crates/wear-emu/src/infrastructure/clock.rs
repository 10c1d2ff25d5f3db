//! Clock formatting for the status bar and time-text elements.
//!
//! Time-text patterns come from the host in strftime syntax. chrono panics
//! while *rendering* an invalid pattern, so patterns are validated up front
//! and bad ones fall back to the literal text.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};

/// Cadence of both the status-bar heartbeat and time-text refresh, kept
/// just under the second boundary.
pub const TICK_MS: u64 = 999;

/// Formats `now` with a host-supplied strftime pattern. An unparsable
/// pattern is returned verbatim rather than propagating a formatting panic.
pub fn format_time(pattern: &str, now: DateTime<Local>) -> String {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return pattern.to_string();
    }
    now.format_with_items(items.into_iter()).to_string()
}

/// The status-bar clock text.
pub fn status_line(now: DateTime<Local>) -> String {
    now.format("%H:%M").to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
