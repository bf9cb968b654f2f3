//! Equipment model.
//!
//! Equipment units perform orders. Each unit has an hour budget
//! (`available_hours_per_day`) and a set of maintenance blackouts.
//!
//! # Capacity Model
//! `current_load` accumulates committed hours for the whole scheduling
//! horizon. The budget does not reset at day boundaries.

use serde::{Deserialize, Serialize};

use super::TimeWindow;

/// A unit of production equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    /// Unique equipment identifier.
    pub equipment_id: String,
    /// Human-readable name.
    pub name: String,
    /// Nominal throughput (informational, not used for feasibility).
    pub capacity_per_hour: f64,
    /// Hour budget for the scheduling horizon.
    pub available_hours_per_day: f64,
    /// Blackout intervals during which the unit cannot run.
    pub maintenance_schedule: Vec<TimeWindow>,
    /// Hours currently committed against this unit.
    pub current_load: f64,
}

impl Equipment {
    /// Creates a unit with an 8-hour budget and no maintenance.
    pub fn new(equipment_id: impl Into<String>) -> Self {
        Self {
            equipment_id: equipment_id.into(),
            name: String::new(),
            capacity_per_hour: 0.0,
            available_hours_per_day: 8.0,
            maintenance_schedule: Vec::new(),
            current_load: 0.0,
        }
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the nominal throughput.
    pub fn with_capacity_per_hour(mut self, capacity: f64) -> Self {
        self.capacity_per_hour = capacity;
        self
    }

    /// Sets the hour budget.
    pub fn with_available_hours(mut self, hours: f64) -> Self {
        self.available_hours_per_day = hours;
        self
    }

    /// Adds a maintenance blackout, keeping the schedule ordered by start.
    pub fn with_maintenance(mut self, window: TimeWindow) -> Self {
        self.maintenance_schedule.push(window);
        self.maintenance_schedule.sort_by_key(|w| w.start);
        self
    }

    /// Sets the committed load (e.g. when restoring persisted state).
    pub fn with_current_load(mut self, load: f64) -> Self {
        self.current_load = load;
        self
    }

    /// Hours still available under the budget.
    pub fn remaining_hours(&self) -> f64 {
        (self.available_hours_per_day - self.current_load).max(0.0)
    }

    /// Whether `hours` more work fits under the budget.
    #[inline]
    pub fn can_absorb(&self, hours: f64) -> bool {
        self.current_load + hours <= self.available_hours_per_day
    }

    /// Whether the window collides with any maintenance blackout.
    pub fn in_maintenance(&self, window: &TimeWindow) -> bool {
        self.maintenance_schedule.iter().any(|m| m.overlaps(window))
    }

    /// Utilization as a percentage of the budget, rounded to 2 decimals.
    ///
    /// Returns 0 for a unit with no budget.
    pub fn utilization_percent(&self) -> f64 {
        if self.available_hours_per_day <= 0.0 {
            return 0.0;
        }
        let pct = self.current_load / self.available_hours_per_day * 100.0;
        (pct * 100.0).round() / 100.0
    }
}
