//! Built-in scoring rules.
//!
//! # Score Convention
//! All rules return higher scores for orders that should run first.

use super::{RuleScore, SchedulingContext, ScoringRule};
use crate::models::ProductionOrder;

/// Priority weight amplified by due-date urgency.
///
/// `score = weight(priority) × multiplier(days_to_due)` where
///
/// | days to due | multiplier |
/// |-------------|-----------|
/// | ≤ 1 | 3.0 |
/// | ≤ 3 | 2.0 |
/// | ≤ 7 | 1.5 |
/// | otherwise | 1.0 |
///
/// Urgency can outrank priority: a NORMAL order due tomorrow (6.0)
/// beats a HIGH order due in 60 days (3.0).
#[derive(Debug, Clone, Copy, Default)]
pub struct UrgencyWeighted;

impl UrgencyWeighted {
    /// Multiplier applied for the given whole days until due.
    pub fn urgency_multiplier(days_to_due: i64) -> f64 {
        if days_to_due <= 1 {
            3.0
        } else if days_to_due <= 3 {
            2.0
        } else if days_to_due <= 7 {
            1.5
        } else {
            1.0
        }
    }
}

impl ScoringRule for UrgencyWeighted {
    fn name(&self) -> &'static str {
        "URGENCY_WEIGHTED"
    }

    fn evaluate(&self, order: &ProductionOrder, context: &SchedulingContext) -> RuleScore {
        let days = context.days_until(order.due_date);
        order.priority.weight() * Self::urgency_multiplier(days)
    }

    fn description(&self) -> &'static str {
        "Priority weight scaled by due-date urgency"
    }
}
