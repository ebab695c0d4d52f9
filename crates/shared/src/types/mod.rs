//! Common types used across the application.

pub mod amount;
pub mod id;

pub use amount::{AMOUNT_SCALE, COST_SCALE, QUANTITY_SCALE, fits_scale, format_amount};
pub use id::*;
