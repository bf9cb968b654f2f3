//! Scheduling run outcome model.
//!
//! A run produces one entry per candidate order: either a commitment
//! (equipment × time window) or a decline with a structured reason.
//! Declines are data, not errors; callers inspect them and may retry
//! after remediation (restocking, freeing equipment).
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::OrderPriority;

/// Result of one scheduling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Start timestamp the run was executed from.
    pub run_at: NaiveDateTime,
    /// Number of pending orders considered.
    pub total_orders: usize,
    /// Number of orders committed.
    pub scheduled_count: usize,
    /// Number of orders declined.
    pub failed_count: usize,
    /// Number of candidates left unprocessed after cancellation.
    pub skipped_count: usize,
    /// Whether the run stopped early on a cancellation request.
    pub cancelled: bool,
    /// Committed orders, in commit order.
    pub scheduled_orders: Vec<CommittedOrder>,
    /// Declined orders, in processing order.
    pub failed_orders: Vec<DeclinedOrder>,
    /// Equipment utilization (%) after the run.
    pub equipment_utilization: BTreeMap<String, f64>,
}

/// An order committed to an equipment unit and time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommittedOrder {
    pub order_id: String,
    pub product_code: String,
    pub priority: OrderPriority,
    /// Score the order was ranked with.
    pub score: f64,
    pub equipment_id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// An order that could not be committed in this run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclinedOrder {
    pub order_id: String,
    pub product_code: String,
    pub priority: OrderPriority,
    pub reason: DeclineReason,
}

/// Why an order was declined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeclineReason {
    /// One or more materials are missing or short.
    MaterialShortage(Vec<Shortfall>),
    /// No equipment unit passed the maintenance and capacity checks.
    NoEquipmentAvailable,
}

/// A single material problem found for an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shortfall {
    pub material_code: String,
    pub kind: ShortfallKind,
}

/// Classification of a material problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShortfallKind {
    /// The material code is not registered.
    NotFound,
    /// Stock is below the required quantity.
    Insufficient {
        required: f64,
        available: f64,
        shortfall: f64,
    },
}

impl RunResult {
    /// Creates an empty result for a run starting at `run_at`.
    pub fn new(run_at: NaiveDateTime) -> Self {
        Self {
            run_at,
            total_orders: 0,
            scheduled_count: 0,
            failed_count: 0,
            skipped_count: 0,
            cancelled: false,
            scheduled_orders: Vec::new(),
            failed_orders: Vec::new(),
            equipment_utilization: BTreeMap::new(),
        }
    }

    /// Records a commitment.
    pub fn add_committed(&mut self, committed: CommittedOrder) {
        self.scheduled_count += 1;
        self.scheduled_orders.push(committed);
    }

    /// Records a decline.
    pub fn add_declined(&mut self, declined: DeclinedOrder) {
        self.failed_count += 1;
        self.failed_orders.push(declined);
    }

    /// Whether every candidate was committed.
    pub fn is_complete(&self) -> bool {
        self.failed_count == 0 && self.skipped_count == 0
    }

    /// Finds the commitment for an order.
    pub fn committed(&self, order_id: &str) -> Option<&CommittedOrder> {
        self.scheduled_orders.iter().find(|c| c.order_id == order_id)
    }

    /// Finds the decline for an order.
    pub fn declined(&self, order_id: &str) -> Option<&DeclinedOrder> {
        self.failed_orders.iter().find(|d| d.order_id == order_id)
    }

    /// Latest committed end time, if anything was committed.
    pub fn horizon_end(&self) -> Option<NaiveDateTime> {
        self.scheduled_orders.iter().map(|c| c.end).max()
    }
}

impl Shortfall {
    /// Creates a not-found entry.
    pub fn not_found(material_code: impl Into<String>) -> Self {
        Self {
            material_code: material_code.into(),
            kind: ShortfallKind::NotFound,
        }
    }

    /// Creates an insufficient-stock entry.
    pub fn insufficient(material_code: impl Into<String>, required: f64, available: f64) -> Self {
        Self {
            material_code: material_code.into(),
            kind: ShortfallKind::Insufficient {
                required,
                available,
                shortfall: required - available,
            },
        }
    }

    /// Missing quantity, or `None` when the material is unknown.
    pub fn amount(&self) -> Option<f64> {
        match self.kind {
            ShortfallKind::NotFound => None,
            ShortfallKind::Insufficient { shortfall, .. } => Some(shortfall),
        }
    }
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ShortfallKind::NotFound => write!(f, "{}: material not found", self.material_code),
            ShortfallKind::Insufficient { shortfall, .. } => {
                write!(f, "{}: shortfall {}", self.material_code, shortfall)
            }
        }
    }
}

impl fmt::Display for DeclineReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaterialShortage(items) => {
                f.write_str("insufficient materials: ")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::NoEquipmentAvailable => f.write_str("no equipment available"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn committed(id: &str, start: u32, end: u32) -> CommittedOrder {
        CommittedOrder {
            order_id: id.into(),
            product_code: "P".into(),
            priority: OrderPriority::Normal,
            score: 2.0,
            equipment_id: "E1".into(),
            start: at(start),
            end: at(end),
        }
    }

    #[test]
    fn test_result_counts() {
        let mut r = RunResult::new(at(8));
        r.total_orders = 2;
        r.add_committed(committed("O1", 8, 10));
        r.add_declined(DeclinedOrder {
            order_id: "O2".into(),
            product_code: "P".into(),
            priority: OrderPriority::Low,
            reason: DeclineReason::NoEquipmentAvailable,
        });

        assert_eq!(r.scheduled_count, 1);
        assert_eq!(r.failed_count, 1);
        assert!(!r.is_complete());
        assert!(r.committed("O1").is_some());
        assert!(r.declined("O2").is_some());
        assert!(r.committed("O2").is_none());
        assert_eq!(r.horizon_end(), Some(at(10)));
    }

    #[test]
    fn test_shortfall_display() {
        let s = Shortfall::insufficient("M1", 10.0, 3.0);
        assert_eq!(s.amount(), Some(7.0));
        assert_eq!(s.to_string(), "M1: shortfall 7");

        let nf = Shortfall::not_found("M9");
        assert_eq!(nf.amount(), None);
        assert_eq!(nf.to_string(), "M9: material not found");
    }

    #[test]
    fn test_reason_display() {
        let reason = DeclineReason::MaterialShortage(vec![
            Shortfall::insufficient("M1", 10.0, 3.0),
            Shortfall::not_found("M2"),
        ]);
        assert_eq!(
            reason.to_string(),
            "insufficient materials: M1: shortfall 7, M2: material not found"
        );
        assert_eq!(
            DeclineReason::NoEquipmentAvailable.to_string(),
            "no equipment available"
        );
    }

    #[test]
    fn test_empty_result() {
        let r = RunResult::new(at(8));
        assert!(r.is_complete());
        assert_eq!(r.horizon_end(), None);
    }
}
