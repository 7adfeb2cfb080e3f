//! Calendar-day window computation.
//!
//! A calendar date (no time-of-day, no offset) selects the half-open
//! interval `[midnight, next midnight)` on the UTC calendar. Day boundaries
//! are always computed in UTC so the same date selects the same rows
//! regardless of where the server process runs.

use chrono::{Days, NaiveDate, NaiveTime};

use crate::types::Timestamp;

/// Half-open time interval `[start, end)` covering one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: Timestamp,
    /// Exclusive upper bound: midnight at the start of the following day.
    pub end: Timestamp,
}

impl DayWindow {
    /// Whether `instant` falls inside the window.
    pub fn contains(&self, instant: Timestamp) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Compute the day window for `date`.
///
/// The upper bound is the next midnight, exclusive. Saturates at the
/// calendar maximum rather than overflowing.
pub fn day_window(date: NaiveDate) -> DayWindow {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    let end = date
        .checked_add_days(Days::new(1))
        .unwrap_or(NaiveDate::MAX)
        .and_time(NaiveTime::MIN)
        .and_utc();
    DayWindow { start, end }
}
