//! Physical stock counts.
//!
//! A session snapshots system quantities at one location, collects counts,
//! and on completion turns every difference into an ADJUSTMENT movement.

pub mod types;
pub mod variance;

pub use types::{CountInput, CountedLine, OpnameStatus};
pub use variance::{CountOutcome, OpnamePlan, VarianceLine, plan_adjustments, validate_counts};
