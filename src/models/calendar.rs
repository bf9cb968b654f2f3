//! Time window model.
//!
//! Maintenance blackouts and scheduled slots are half-open intervals
//! `[start, end)` over wall-clock timestamps.
//!
//! # Precedence
//! A window touching another at a single instant does not overlap it:
//! `[08:00, 10:00)` and `[10:00, 12:00)` are disjoint.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A time interval [start, end).
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeWindow {
    /// Interval start (inclusive).
    pub start: NaiveDateTime,
    /// Interval end (exclusive).
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Creates a window of `hours` starting at `start`.
    ///
    /// Fractional hours are resolved to the millisecond. Returns `None`
    /// when the end falls outside the representable calendar.
    pub fn from_hours(start: NaiveDateTime, hours: f64) -> Option<Self> {
        let end = start.checked_add_signed(hours_to_duration(hours)?)?;
        Some(Self { start, end })
    }

    /// Duration of this window.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether the window has a positive length.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// Whether a timestamp falls within this window.
    #[inline]
    pub fn contains(&self, time: NaiveDateTime) -> bool {
        time >= self.start && time < self.end
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Converts fractional hours into a millisecond-precision duration.
///
/// Returns `None` for non-finite input or a span beyond `Duration`'s range.
pub fn hours_to_duration(hours: f64) -> Option<Duration> {
    let millis = (hours * 3_600_000.0).round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    Duration::try_milliseconds(millis as i64)
}
