//! Equipment availability check.
//!
//! # Algorithm
//! First-fit over registration order: the first unit whose maintenance
//! schedule does not overlap the window and whose committed load plus
//! the required hours stays within its budget is chosen. Neither the
//! least-loaded nor the best-fitting unit is sought.

use crate::models::{Equipment, TimeWindow};
use crate::registry::Registry;

/// A feasible unit and the window it was checked against.
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentMatch {
    /// Position in registration order.
    pub position: usize,
    /// Matched unit's identifier.
    pub equipment_id: String,
    /// Window the unit is free for.
    pub window: TimeWindow,
}

/// Finds a unit that can run an order in a window.
#[derive(Debug, Clone, Copy)]
pub struct EquipmentChecker<'a> {
    equipment: &'a Registry<Equipment>,
}

impl<'a> EquipmentChecker<'a> {
    /// Creates a checker over the equipment registry.
    pub fn new(equipment: &'a Registry<Equipment>) -> Self {
        Self { equipment }
    }

    /// Whether a single unit can take `required_hours` in `window`.
    pub fn is_feasible(unit: &Equipment, window: &TimeWindow, required_hours: f64) -> bool {
        !unit.in_maintenance(window) && unit.can_absorb(required_hours)
    }

    /// First unit, in registration order, free for `window`.
    pub fn find(&self, window: TimeWindow, required_hours: f64) -> Option<EquipmentMatch> {
        self.find_with(required_hours, |_| Some(window))
    }

    /// First unit free for the window `window_for` proposes for it.
    ///
    /// Lets each unit be checked against its own start time. A unit for
    /// which no window is proposed is skipped.
    pub fn find_with<F>(&self, required_hours: f64, window_for: F) -> Option<EquipmentMatch>
    where
        F: Fn(&Equipment) -> Option<TimeWindow>,
    {
        self.equipment
            .iter()
            .enumerate()
            .find_map(|(position, unit)| {
                let window = window_for(unit)?;
                Self::is_feasible(unit, &window, required_hours).then(|| EquipmentMatch {
                    position,
                    equipment_id: unit.equipment_id.clone(),
                    window,
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn registry(items: Vec<Equipment>) -> Registry<Equipment> {
        items.into()
    }

    #[test]
    fn test_first_fit() {
        let reg = registry(vec![
            Equipment::new("E1").with_available_hours(8.0).with_current_load(2.0),
            Equipment::new("E2").with_available_hours(8.0),
        ]);
        let found = EquipmentChecker::new(&reg)
            .find(TimeWindow::new(at(8), at(10)), 2.0)
            .unwrap();
        // E1 fits and comes first even though E2 is less loaded
        assert_eq!(found.equipment_id, "E1");
        assert_eq!(found.position, 0);
    }

    #[test]
    fn test_full_unit_skipped() {
        let reg = registry(vec![
            Equipment::new("E1").with_available_hours(8.0).with_current_load(8.0),
            Equipment::new("E2").with_available_hours(8.0),
        ]);
        let found = EquipmentChecker::new(&reg)
            .find(TimeWindow::new(at(8), at(10)), 2.0)
            .unwrap();
        assert_eq!(found.equipment_id, "E2");
    }

    #[test]
    fn test_exact_budget_fits() {
        let reg = registry(vec![Equipment::new("E1").with_available_hours(4.0)]);
        assert!(EquipmentChecker::new(&reg)
            .find(TimeWindow::new(at(8), at(12)), 4.0)
            .is_some());
    }

    #[test]
    fn test_maintenance_blocks() {
        let reg = registry(vec![
            Equipment::new("E1").with_maintenance(TimeWindow::new(at(9), at(11))),
            Equipment::new("E2").with_maintenance(TimeWindow::new(at(7), at(8))),
        ]);
        let found = EquipmentChecker::new(&reg)
            .find(TimeWindow::new(at(8), at(10)), 2.0)
            .unwrap();
        assert_eq!(found.equipment_id, "E2"); // E2's window ends as ours starts
    }

    #[test]
    fn test_none_available() {
        let reg = registry(vec![Equipment::new("E1").with_available_hours(1.0)]);
        assert!(EquipmentChecker::new(&reg)
            .find(TimeWindow::new(at(8), at(10)), 2.0)
            .is_none());

        let empty = registry(vec![]);
        assert!(EquipmentChecker::new(&empty)
            .find(TimeWindow::new(at(8), at(10)), 2.0)
            .is_none());
    }

    #[test]
    fn test_find_with_per_unit_window() {
        let reg = registry(vec![
            Equipment::new("E1").with_maintenance(TimeWindow::new(at(8), at(12))),
            Equipment::new("E2"),
        ]);
        let found = EquipmentChecker::new(&reg)
            .find_with(2.0, |e| {
                if e.equipment_id == "E1" {
                    Some(TimeWindow::new(at(12), at(14)))
                } else {
                    Some(TimeWindow::new(at(8), at(10)))
                }
            })
            .unwrap();
        assert_eq!(found.equipment_id, "E1");
        assert_eq!(found.window.start, at(12));
    }

    #[test]
    fn test_find_with_skips_unit_without_window() {
        let reg = registry(vec![Equipment::new("E1"), Equipment::new("E2")]);
        let found = EquipmentChecker::new(&reg)
            .find_with(2.0, |e| {
                (e.equipment_id == "E2").then(|| TimeWindow::new(at(8), at(10)))
            })
            .unwrap();
        assert_eq!(found.equipment_id, "E2");
    }
}
