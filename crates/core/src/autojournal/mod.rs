//! Automatic journals for operational events.
//!
//! Each event maps to a fixed debit/credit pair of configured account codes.
//! One business document produces at most one entry.

pub mod event;
pub mod mapping;

pub use event::{BusinessEvent, SALES_SHIPMENT_REFERENCE_TYPE};
pub use mapping::{MappedLine, map_event};
