//! Feasibility checks for committing an order.
//!
//! Two independent, read-only predicates run before every commit:
//!
//! - **Materials**: every required material exists with enough stock.
//! - **Equipment**: some unit is free of maintenance during the window
//!   and has budget left for the order's hours.
//!
//! Checkers borrow the live registries and hold no cache, so each call
//! sees the stock and load left by earlier commits in the same run.

mod equipment;
mod material;

pub use equipment::{EquipmentChecker, EquipmentMatch};
pub use material::{MaterialCheck, MaterialChecker};
