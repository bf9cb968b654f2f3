//! Scheduling context for scoring rule evaluation.

use chrono::{Duration, NaiveDateTime};

/// Runtime state passed to scoring rules.
///
/// `now` is the reference time urgency is measured from. The scheduler
/// sets it to the run start so a run is reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulingContext {
    /// Reference time for due-date urgency.
    pub now: NaiveDateTime,
}

impl SchedulingContext {
    /// Creates a context at the given time.
    pub fn at_time(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Whole days from `now` until `due`, rounded toward negative infinity.
    ///
    /// Overdue orders yield negative values: 1 hour overdue is day -1.
    pub fn days_until(&self, due: NaiveDateTime) -> i64 {
        let delta: Duration = due - self.now;
        delta.num_seconds().div_euclid(86_400)
    }
}
