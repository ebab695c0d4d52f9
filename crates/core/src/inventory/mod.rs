//! Stock movement rules.
//!
//! `Inventory` rows hold "quantity now" per (location, variant); movements are
//! the append-only trail. This module decides which legs a movement has,
//! whether a leg may draw stock down, and how the moving-average cost moves.

pub mod availability;
pub mod costing;
pub mod error;
pub mod movement;
pub mod types;

#[cfg(test)]
mod costing_props;

pub use availability::{StockCheck, check_availability};
pub use costing::{apply_inbound, moving_average, stock_value};
pub use error::InventoryError;
pub use movement::{InboundLeg, MovementPlan, OutboundLeg, plan_movement, signed_effect};
pub use types::{MovementInput, MovementType, StockKey, StockLevel};
