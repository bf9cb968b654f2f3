//! Input validation for registered entities.
//!
//! Checks structural integrity of orders, equipment and materials before
//! they enter the engine. Detects:
//! - Empty identifiers
//! - Non-positive quantities and effort estimates
//! - Negative stock
//! - Inverted or overlapping maintenance windows
//!
//! All problems of an entity are collected rather than stopping at the
//! first one.

use crate::models::{Equipment, Material, ProductionOrder};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Identifier is empty.
    EmptyId,
    /// A quantity is zero, negative or not finite.
    NonPositiveQuantity,
    /// An hour figure is zero, negative or not finite.
    NonPositiveHours,
    /// Stock or safety stock is negative.
    NegativeStock,
    /// A maintenance window does not end after it starts.
    InvalidWindow,
    /// Two maintenance windows overlap.
    OverlappingWindows,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a production order.
///
/// Checks:
/// 1. Non-empty order id
/// 2. `quantity > 0`
/// 3. `estimated_hours` finite and positive
/// 4. Every required material quantity finite and non-negative
pub fn validate_order(order: &ProductionOrder) -> ValidationResult {
    let mut errors = Vec::new();

    if order.order_id.trim().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyId,
            "order id is empty",
        ));
    }

    if order.quantity == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveQuantity,
            "quantity must be positive",
        ));
    }

    if !(order.estimated_hours.is_finite() && order.estimated_hours > 0.0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveHours,
            format!("estimated_hours must be positive, got {}", order.estimated_hours),
        ));
    }

    for (code, &qty) in &order.material_requirements {
        if !(qty.is_finite() && qty >= 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveQuantity,
                format!("material '{code}' requires invalid quantity {qty}"),
            ));
        }
    }

    finish(errors)
}

/// Validates an equipment unit.
///
/// Checks:
/// 1. Non-empty equipment id
/// 2. `available_hours_per_day` finite and positive
/// 3. Every maintenance window has `start < end`
/// 4. Maintenance windows are pairwise disjoint
pub fn validate_equipment(equipment: &Equipment) -> ValidationResult {
    let mut errors = Vec::new();

    if equipment.equipment_id.trim().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyId,
            "equipment id is empty",
        ));
    }

    if !(equipment.available_hours_per_day.is_finite() && equipment.available_hours_per_day > 0.0)
    {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveHours,
            format!(
                "available_hours_per_day must be positive, got {}",
                equipment.available_hours_per_day
            ),
        ));
    }

    for w in &equipment.maintenance_schedule {
        if !w.is_valid() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWindow,
                format!("maintenance window {} .. {} is empty or inverted", w.start, w.end),
            ));
        }
    }

    // Sorted by start, so any overlap shows up between neighbours.
    let mut windows: Vec<_> = equipment
        .maintenance_schedule
        .iter()
        .filter(|w| w.is_valid())
        .collect();
    windows.sort_by_key(|w| w.start);
    for pair in windows.windows(2) {
        if pair[0].overlaps(pair[1]) {
            errors.push(ValidationError::new(
                ValidationErrorKind::OverlappingWindows,
                format!(
                    "maintenance windows starting {} and {} overlap",
                    pair[0].start, pair[1].start
                ),
            ));
        }
    }

    finish(errors)
}

/// Validates a material.
///
/// Checks:
/// 1. Non-empty material code
/// 2. `current_stock` and `safety_stock` finite and non-negative
pub fn validate_material(material: &Material) -> ValidationResult {
    let mut errors = Vec::new();

    if material.material_code.trim().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyId,
            "material code is empty",
        ));
    }

    for (field, value) in [
        ("current_stock", material.current_stock),
        ("safety_stock", material.safety_stock),
    ] {
        if !(value.is_finite() && value >= 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeStock,
                format!("{field} must be non-negative, got {value}"),
            ));
        }
    }

    finish(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeWindow;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_valid_order() {
        let o = ProductionOrder::new("O1", "P", at(17))
            .with_quantity(10)
            .with_estimated_hours(2.0)
            .with_material("M1", 5.0);
        assert!(validate_order(&o).is_ok());
    }

    #[test]
    fn test_order_multiple_errors() {
        let o = ProductionOrder::new("", "P", at(17))
            .with_quantity(0)
            .with_estimated_hours(0.0)
            .with_material("M1", -1.0);

        let errors = validate_order(&o).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::EmptyId));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonPositiveHours));
    }

    #[test]
    fn test_order_nan_hours() {
        let o = ProductionOrder::new("O1", "P", at(17)).with_estimated_hours(f64::NAN);
        let errors = validate_order(&o).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NonPositiveHours);
    }

    #[test]
    fn test_valid_equipment() {
        let e = Equipment::new("E1")
            .with_maintenance(TimeWindow::new(at(10), at(12)))
            .with_maintenance(TimeWindow::new(at(12), at(13)));
        assert!(validate_equipment(&e).is_ok());
    }

    #[test]
    fn test_equipment_zero_budget() {
        let e = Equipment::new("E1").with_available_hours(0.0);
        let errors = validate_equipment(&e).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NonPositiveHours);
    }

    #[test]
    fn test_equipment_inverted_window() {
        let e = Equipment::new("E1").with_maintenance(TimeWindow::new(at(12), at(10)));
        let errors = validate_equipment(&e).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidWindow));
    }

    #[test]
    fn test_equipment_overlapping_windows() {
        let e = Equipment::new("E1")
            .with_maintenance(TimeWindow::new(at(10), at(12)))
            .with_maintenance(TimeWindow::new(at(11), at(13)));
        let errors = validate_equipment(&e).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::OverlappingWindows));
    }

    #[test]
    fn test_material_negative_stock() {
        let m = Material::new("M1", -1.0);
        let errors = validate_material(&m).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NegativeStock);

        assert!(validate_material(&Material::new("M1", 0.0)).is_ok());
    }

    #[test]
    fn test_material_empty_code() {
        let errors = validate_material(&Material::new(" ", 1.0)).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyId);
    }
}
