//! Production scheduler and reporting views.
//!
//! Provides the greedy order scheduler (run + reschedule) and read-only
//! projections over its state.
//!
//! # Algorithm
//!
//! `ProductionScheduler` ranks pending orders by urgency-weighted
//! priority and commits each, in turn, to the first equipment unit that
//! is free and has budget, provided its materials are in stock. It is a
//! deterministic heuristic: no backtracking, no lookahead.
//!
//! # Reports
//!
//! Gantt rows, equipment utilization, status summary and low-stock
//! materials, recomputed on every call.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

mod production;
pub mod reports;

pub use production::ProductionScheduler;
pub use reports::{GanttEntry, ProductionSummary};
