//! Order scoring and backlog ordering.
//!
//! A scoring rule turns an order into a comparable number; the rule
//! engine ranks the backlog by that number.
//!
//! # Usage
//!
//! ```
//! use u_production::dispatching::{RuleEngine, SchedulingContext};
//! use u_production::dispatching::rules;
//!
//! let engine = RuleEngine::new().with_rule(rules::UrgencyWeighted);
//! assert_eq!(engine.rule_name(), "URGENCY_WEIGHTED");
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod context;
mod engine;
pub mod rules;

pub use context::SchedulingContext;
pub use engine::{RankedOrder, RuleEngine};

use crate::models::ProductionOrder;
use std::fmt::Debug;

/// Score returned by a scoring rule.
///
/// Higher scores = higher priority (scheduled first).
pub type RuleScore = f64;

/// A rule that evaluates how early an order should be scheduled.
///
/// # Score Convention
/// **Higher score = higher priority.** The engine sorts descending.
pub trait ScoringRule: Send + Sync + Debug {
    /// Rule name (e.g., "URGENCY_WEIGHTED").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of an order at the context's reference time.
    fn evaluate(&self, order: &ProductionOrder, context: &SchedulingContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
