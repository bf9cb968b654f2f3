//! Production scheduling domain models.
//!
//! Provides the typed records the engine operates on and the result
//! types a scheduling run produces.
//!
//! # Domain Mappings
//!
//! | u-production | Scheduling theory | Shop floor |
//! |--------------|-------------------|------------|
//! | ProductionOrder | Job | Work order |
//! | Equipment | Machine | Press, line, cell |
//! | Material | Consumable resource | Raw stock, parts |
//! | RunResult | Schedule | Production plan |

mod calendar;
mod equipment;
mod material;
mod order;
mod outcome;

pub use calendar::{hours_to_duration, TimeWindow};
pub use equipment::Equipment;
pub use material::Material;
pub use order::{OrderPriority, OrderStatus, ProductionOrder};
pub use outcome::{
    CommittedOrder, DeclineReason, DeclinedOrder, RunResult, Shortfall, ShortfallKind,
};
