//! Material availability check.

use crate::models::{DeclineReason, Material, ProductionOrder, Shortfall};
use crate::registry::Registry;

/// Outcome of a material check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialCheck {
    /// Problems found, in material-code order. Empty when feasible.
    pub shortfalls: Vec<Shortfall>,
}

impl MaterialCheck {
    /// Whether every requirement is covered.
    pub fn is_ok(&self) -> bool {
        self.shortfalls.is_empty()
    }

    /// Converts a failed check into a decline reason.
    pub fn into_reason(self) -> Option<DeclineReason> {
        if self.is_ok() {
            None
        } else {
            Some(DeclineReason::MaterialShortage(self.shortfalls))
        }
    }
}

/// Checks an order's material requirements against current stock.
#[derive(Debug, Clone, Copy)]
pub struct MaterialChecker<'a> {
    materials: &'a Registry<Material>,
}

impl<'a> MaterialChecker<'a> {
    /// Creates a checker over the material registry.
    pub fn new(materials: &'a Registry<Material>) -> Self {
        Self { materials }
    }

    /// Reports every unknown or under-stocked material the order needs.
    pub fn check(&self, order: &ProductionOrder) -> MaterialCheck {
        let shortfalls = order
            .material_requirements
            .iter()
            .filter_map(|(code, &required)| match self.materials.get(code) {
                None => Some(Shortfall::not_found(code.as_str())),
                Some(m) if m.current_stock < required => {
                    Some(Shortfall::insufficient(code.as_str(), required, m.current_stock))
                }
                Some(_) => None,
            })
            .collect();

        MaterialCheck { shortfalls }
    }
}
