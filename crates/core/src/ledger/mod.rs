//! Double-entry journal logic.
//!
//! This module implements the journal rules that do not need storage:
//! - Line validation and the balance invariant
//! - The DRAFT/POSTED/VOIDED state machine
//! - Per-year entry numbering
//! - Reversal planning
//! - Ledger folding with running balances

pub mod calculator;
pub mod error;
pub mod numbering;
pub mod reversal;
pub mod types;
pub mod validation;
pub mod workflow;

#[cfg(test)]
mod calculator_props;
#[cfg(test)]
mod validation_props;

pub use calculator::{AccountLedger, LedgerCalculator, LedgerRow, LedgerSummary, PostedLine};
pub use error::LedgerError;
pub use numbering::{EntryNumber, compare_entry_numbers};
pub use reversal::{ReversalPlan, ReversalService};
pub use types::{
    CreateJournalEntryInput, EntryOrigin, EntryTotals, JournalLineInput, JournalStatus,
    REVERSAL_REFERENCE_TYPE, UpdateDraftInput, source_key,
};
pub use validation::{validate_description, validate_lines};
pub use workflow::{JournalAction, JournalWorkflow};
