//! Production scheduling engine for the U-Engine ecosystem.
//!
//! Assigns pending production orders to equipment and time windows,
//! subject to equipment budgets, maintenance blackouts and material stock.
//! The engine is a deterministic greedy heuristic: orders are ranked by
//! urgency-weighted priority and committed one at a time, first-fit.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ProductionOrder`, `Equipment`, `Material`,
//!   `TimeWindow`, `RunResult`
//! - **`dispatching`**: Scoring rules and the stable backlog ranking
//! - **`feasibility`**: Material and equipment availability checks
//! - **`scheduler`**: The scheduling run, reschedule, and report views
//! - **`validation`**: Input integrity checks on registration
//! - **`engine`**: `SharedScheduler`, a lock-guarded handle for concurrent callers
//!
//! # Architecture
//!
//! Persistence, notification and authorization live outside this crate.
//! Callers load entities, register them, run the scheduler and persist or
//! forward the resulting state and [`models::RunResult`].
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

pub mod config;
pub mod dispatching;
pub mod engine;
pub mod error;
pub mod feasibility;
pub mod logging;
pub mod models;
pub mod registry;
pub mod scheduler;
pub mod validation;

pub use config::{CursorMode, SchedulerConfig};
pub use engine::SharedScheduler;
pub use error::{Result, ScheduleError};
pub use scheduler::ProductionScheduler;
