//! Production order model.
//!
//! An order is one unit of manufacturing work: a product, a quantity,
//! a due date, an effort estimate and the materials it consumes.
//!
//! # Lifecycle
//! ```text
//! PENDING ──commit──▶ SCHEDULED ──reschedule──▶ PENDING
//! ```
//! `InProgress`, `Completed` and `Cancelled` are set by collaborators
//! outside the engine; orders in those states are never candidates.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Business priority of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderPriority {
    Low,
    Normal,
    High,
    Urgent,
}

impl OrderPriority {
    /// Base weight used by the urgency-weighted score.
    pub fn weight(self) -> f64 {
        match self {
            Self::Low => 1.0,
            Self::Normal => 2.0,
            Self::High => 3.0,
            Self::Urgent => 4.0,
        }
    }
}

impl fmt::Display for OrderPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "LOW",
            Self::Normal => "NORMAL",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        };
        f.write_str(s)
    }
}

/// Scheduling status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Scheduled => "SCHEDULED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        };
        f.write_str(s)
    }
}

/// A production order to be scheduled.
///
/// Material requirements are keyed by material code; iteration follows
/// code order so decline reasons are reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionOrder {
    /// Unique order identifier (caller-assigned).
    pub order_id: String,
    /// Product being manufactured.
    pub product_code: String,
    /// Units to produce.
    pub quantity: u32,
    /// Requested completion time.
    pub due_date: NaiveDateTime,
    /// Business priority.
    pub priority: OrderPriority,
    /// Estimated processing effort in hours.
    pub estimated_hours: f64,
    /// Material code → quantity consumed.
    pub material_requirements: BTreeMap<String, f64>,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Committed start (set by the scheduler).
    pub scheduled_start: Option<NaiveDateTime>,
    /// Committed end (set by the scheduler).
    pub scheduled_end: Option<NaiveDateTime>,
    /// Equipment unit the order runs on (set by the scheduler).
    pub assigned_equipment: Option<String>,
}

impl ProductionOrder {
    /// Creates a pending order with normal priority and no materials.
    pub fn new(
        order_id: impl Into<String>,
        product_code: impl Into<String>,
        due_date: NaiveDateTime,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            product_code: product_code.into(),
            quantity: 1,
            due_date,
            priority: OrderPriority::Normal,
            estimated_hours: 1.0,
            material_requirements: BTreeMap::new(),
            status: OrderStatus::Pending,
            scheduled_start: None,
            scheduled_end: None,
            assigned_equipment: None,
        }
    }

    /// Sets the quantity.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: OrderPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the effort estimate.
    pub fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = hours;
        self
    }

    /// Adds (or replaces) a material requirement.
    pub fn with_material(mut self, material_code: impl Into<String>, quantity: f64) -> Self {
        self.material_requirements
            .insert(material_code.into(), quantity);
        self
    }

    /// Sets the status. Used by collaborators for external transitions.
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether the order is eligible for a scheduling run.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    /// Whether the order holds a committed assignment.
    #[inline]
    pub fn is_scheduled(&self) -> bool {
        self.status == OrderStatus::Scheduled
    }

    /// Drops any committed assignment and returns the order to the backlog.
    pub(crate) fn reset_to_pending(&mut self) {
        self.status = OrderStatus::Pending;
        self.scheduled_start = None;
        self.scheduled_end = None;
        self.assigned_equipment = None;
    }
}
