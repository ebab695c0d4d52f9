//! Soft holds against inventory.
//!
//! A reservation moves no stock. It lowers what other documents can draw
//! and is consumed first-in first-out when its own document ships.

pub mod consume;
pub mod types;

#[cfg(test)]
mod consume_props;

pub use consume::{ConsumptionPlan, ConsumptionStep, ensure_reservable, plan_consumption};
pub use types::{OpenReservation, ReservationStatus, ReserveInput, ReservedFor};
