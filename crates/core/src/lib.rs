//! Core business logic for Neraca.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `account` - Chart-of-accounts classification and guards
//! - `fiscal` - Monthly fiscal periods and the open/closed gate
//! - `ledger` - Double-entry journal rules, numbering, reversal, ledger folding
//! - `inventory` - Movement legs, moving-average costing, stock availability
//! - `reservation` - Soft holds and FIFO consumption
//! - `opname` - Physical count variance planning
//! - `autojournal` - Operational events mapped to journal lines

pub mod account;
pub mod autojournal;
pub mod fiscal;
pub mod inventory;
pub mod ledger;
pub mod opname;
pub mod reservation;
