//! Timestamp formatting for card metadata.
//!
//! Timestamps within the last 24 hours are close enough that the time of day
//! matters; older ones render date-only. The current time is an explicit
//! argument so the formatter stays a pure function of its inputs.

use chrono::{DateTime, Local, Utc};

use crate::defaults::RECENT_WINDOW_MS;
use crate::model::SortMethod;

/// Current wall-clock time in epoch milliseconds, for production callers.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format an epoch-millisecond timestamp for display.
///
/// Renders `YYYY-MM-DD HH:mm` when `epoch_ms` is strictly less than 24 hours
/// before `now_ms`, and `YYYY-MM-DD` otherwise, zero-padded, in the local
/// calendar and timezone of the executing process. Out-of-range timestamps
/// render as an empty string.
pub fn format_timestamp(epoch_ms: i64, now_ms: i64) -> String {
    let Some(instant) = DateTime::from_timestamp_millis(epoch_ms) else {
        return String::new();
    };
    let local = instant.with_timezone(&Local);

    let is_recent = now_ms - epoch_ms < RECENT_WINDOW_MS;
    if is_recent {
        local.format("%Y-%m-%d %H:%M").to_string()
    } else {
        local.format("%Y-%m-%d").to_string()
    }
}

/// Glyph variants the host can render next to a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampGlyph {
    /// Created-time sorts: a calendar.
    Calendar,
    /// Everything else: a clock.
    Clock,
}

/// Pick the timestamp glyph for the active sort method.
pub fn timestamp_glyph(sort_method: SortMethod) -> TimestampGlyph {
    if sort_method.is_ctime() {
        TimestampGlyph::Calendar
    } else {
        TimestampGlyph::Clock
    }
}

// =============================================================================
// TESTS
// =============================================================================
