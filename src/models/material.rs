//! Material (stock keeping unit) model.

use serde::{Deserialize, Serialize};

/// A consumable material held in stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Unique material code.
    pub material_code: String,
    /// Human-readable name.
    pub name: String,
    /// Quantity on hand. Never negative.
    pub current_stock: f64,
    /// Reorder threshold.
    pub safety_stock: f64,
    /// Replenishment lead time in days.
    pub lead_time_days: u32,
    /// Preferred supplier.
    pub supplier: String,
}

impl Material {
    /// Creates a material with the given stock on hand.
    pub fn new(material_code: impl Into<String>, current_stock: f64) -> Self {
        Self {
            material_code: material_code.into(),
            name: String::new(),
            current_stock,
            safety_stock: 0.0,
            lead_time_days: 0,
            supplier: String::new(),
        }
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the safety stock.
    pub fn with_safety_stock(mut self, safety_stock: f64) -> Self {
        self.safety_stock = safety_stock;
        self
    }

    /// Sets the lead time.
    pub fn with_lead_time_days(mut self, days: u32) -> Self {
        self.lead_time_days = days;
        self
    }

    /// Sets the supplier.
    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = supplier.into();
        self
    }

    /// Whether stock has fallen below the safety level.
    pub fn is_below_safety_stock(&self) -> bool {
        self.current_stock < self.safety_stock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_builder() {
        let m = Material::new("M1", 40.0)
            .with_name("Steel sheet")
            .with_safety_stock(10.0)
            .with_lead_time_days(5)
            .with_supplier("ACME");

        assert_eq!(m.material_code, "M1");
        assert_eq!(m.name, "Steel sheet");
        assert!((m.current_stock - 40.0).abs() < 1e-10);
        assert_eq!(m.lead_time_days, 5);
        assert_eq!(m.supplier, "ACME");
        assert!(!m.is_below_safety_stock());
    }

    #[test]
    fn test_below_safety_stock() {
        let m = Material::new("M1", 4.0).with_safety_stock(5.0);
        assert!(m.is_below_safety_stock());
    }
}
