//! Ledger error types for validation and state errors.
//!
//! Covers the chart of accounts, fiscal periods, and journal entries. Every
//! variant maps onto one [`AppError`] category.

use chrono::NaiveDate;
use neraca_shared::AppError;
use neraca_shared::types::format_amount;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use super::types::JournalStatus;
use super::workflow::JournalAction;
use crate::account::{AccountCategory, AccountType};

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Journal entry has no lines.
    #[error("Journal entry must have at least one line")]
    EmptyEntry,

    /// Line carries both a debit and a credit.
    #[error("Line {line} has both a debit and a credit amount")]
    BothSidesSet {
        /// 1-based line number.
        line: usize,
    },

    /// Line carries neither a debit nor a credit.
    #[error("Line {line} has neither a debit nor a credit amount")]
    NoSideSet {
        /// 1-based line number.
        line: usize,
    },

    /// Line amount is negative.
    #[error("Line {line} has a negative amount")]
    NegativeAmount {
        /// 1-based line number.
        line: usize,
    },

    /// Line amount is finer than the smallest currency unit.
    #[error("Line {line} amount {amount} is more precise than the smallest currency unit")]
    ExcessPrecision {
        /// 1-based line number.
        line: usize,
        /// The offending amount.
        amount: Decimal,
    },

    /// Debits and credits differ.
    #[error(
        "Journal not balanced: debit {} ≠ credit {}",
        format_amount(.debit),
        format_amount(.credit)
    )]
    Unbalanced {
        /// Total debit.
        debit: Decimal,
        /// Total credit.
        credit: Decimal,
    },

    /// Required text field is blank.
    #[error("{0} must not be blank")]
    BlankField(&'static str),

    /// Entries can only be created as DRAFT or POSTED.
    #[error("Journal entries can only be created as DRAFT or POSTED, not {0}")]
    InvalidRequestedStatus(JournalStatus),

    /// Entry number does not follow the `JE-<year>-<sequence>` format.
    #[error("Invalid journal entry number: {0}")]
    InvalidEntryNumber(String),

    /// Operational event carries an amount the mapping cannot post.
    #[error("{reference_type} {reference} has an invalid amount {amount}")]
    InvalidEventAmount {
        /// Event reference type.
        reference_type: &'static str,
        /// Business document id.
        reference: String,
        /// The offending amount.
        amount: Decimal,
    },

    // ========== Account Errors ==========
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// No account carries this code.
    #[error("Account with code {0} not found")]
    AccountCodeNotFound(String),

    /// Account code already taken.
    #[error("Account code {0} already exists")]
    DuplicateAccountCode(String),

    /// Account code contains whitespace.
    #[error("Invalid account code: {0:?}")]
    InvalidAccountCode(String),

    /// Category does not belong to the type.
    #[error("Category {category} does not belong to account type {account_type}")]
    CategoryMismatch {
        /// Requested category.
        category: AccountCategory,
        /// Requested type.
        account_type: AccountType,
    },

    /// Re-parenting would create a cycle.
    #[error("Account {0} cannot be placed under one of its own descendants")]
    CyclicHierarchy(Uuid),

    /// Account is referenced by journal lines.
    #[error("Account {code} is referenced by {line_count} journal line(s) and cannot be deleted")]
    AccountInUse {
        /// Account code.
        code: String,
        /// Number of referencing lines.
        line_count: u64,
    },

    /// Account has child accounts.
    #[error("Account {code} has {child_count} child account(s) and cannot be deleted")]
    AccountHasChildren {
        /// Account code.
        code: String,
        /// Number of children.
        child_count: u64,
    },

    /// Account type cannot be changed because it has journal lines.
    #[error("Cannot change account type for account {0} because it has journal lines")]
    AccountTypeChangeNotAllowed(String),

    /// A payment names an account that is not flagged as cash.
    #[error("Account {0} is not a cash account")]
    NotCashAccount(String),

    // ========== Fiscal Period Errors ==========
    /// Month outside 1..=12 or year out of range.
    #[error("Invalid fiscal period {year}-{month}")]
    InvalidPeriod {
        /// Calendar year.
        year: i32,
        /// Calendar month.
        month: u32,
    },

    /// No fiscal period covers the date.
    #[error("No fiscal period found for date {0}")]
    NoFiscalPeriod(NaiveDate),

    /// The period covering the date is closed.
    #[error("Fiscal period {period} is closed, {date} cannot be changed")]
    PeriodClosed {
        /// Period name.
        period: String,
        /// The rejected date.
        date: NaiveDate,
    },

    /// Period was already closed.
    #[error("Fiscal period {0} is already closed")]
    PeriodAlreadyClosed(String),

    /// Period not found.
    #[error("Fiscal period not found: {0}")]
    PeriodNotFound(Uuid),

    // ========== Journal State Errors ==========
    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(Uuid),

    /// Action not legal from the entry's current status.
    #[error("Cannot {action} journal entry {entry_number} in {status} status")]
    InvalidTransition {
        /// Attempted action.
        action: JournalAction,
        /// Entry number.
        entry_number: String,
        /// Current status.
        status: JournalStatus,
    },

    /// Only drafts can be deleted.
    #[error("Can only delete draft journal entries, {entry_number} is {status}")]
    CanOnlyDeleteDraft {
        /// Entry number.
        entry_number: String,
        /// Current status.
        status: JournalStatus,
    },

    /// Entry was already reversed.
    #[error("Journal entry {0} has already been reversed")]
    AlreadyReversed(String),

    /// A system-generated entry for the same document already exists.
    #[error("A journal entry for {0} already exists")]
    DuplicateSource(String),
}

impl LedgerError {
    /// Returns the stable machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyEntry => "EMPTY_ENTRY",
            Self::BothSidesSet { .. } => "BOTH_SIDES_SET",
            Self::NoSideSet { .. } => "NO_SIDE_SET",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::ExcessPrecision { .. } => "EXCESS_PRECISION",
            Self::Unbalanced { .. } => "UNBALANCED_ENTRY",
            Self::BlankField(_) => "BLANK_FIELD",
            Self::InvalidRequestedStatus(_) => "INVALID_REQUESTED_STATUS",
            Self::InvalidEntryNumber(_) => "INVALID_ENTRY_NUMBER",
            Self::InvalidEventAmount { .. } => "INVALID_EVENT_AMOUNT",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountCodeNotFound(_) => "ACCOUNT_CODE_NOT_FOUND",
            Self::DuplicateAccountCode(_) => "DUPLICATE_ACCOUNT_CODE",
            Self::InvalidAccountCode(_) => "INVALID_ACCOUNT_CODE",
            Self::CategoryMismatch { .. } => "CATEGORY_MISMATCH",
            Self::CyclicHierarchy(_) => "CYCLIC_HIERARCHY",
            Self::AccountInUse { .. } => "ACCOUNT_IN_USE",
            Self::AccountHasChildren { .. } => "ACCOUNT_HAS_CHILDREN",
            Self::AccountTypeChangeNotAllowed(_) => "ACCOUNT_TYPE_CHANGE_NOT_ALLOWED",
            Self::NotCashAccount(_) => "NOT_CASH_ACCOUNT",
            Self::InvalidPeriod { .. } => "INVALID_PERIOD",
            Self::NoFiscalPeriod(_) => "NO_FISCAL_PERIOD",
            Self::PeriodClosed { .. } => "PERIOD_CLOSED",
            Self::PeriodAlreadyClosed(_) => "PERIOD_ALREADY_CLOSED",
            Self::PeriodNotFound(_) => "PERIOD_NOT_FOUND",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::CanOnlyDeleteDraft { .. } => "CAN_ONLY_DELETE_DRAFT",
            Self::AlreadyReversed(_) => "ALREADY_REVERSED",
            Self::DuplicateSource(_) => "DUPLICATE_SOURCE",
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::EmptyEntry
            | LedgerError::BothSidesSet { .. }
            | LedgerError::NoSideSet { .. }
            | LedgerError::NegativeAmount { .. }
            | LedgerError::ExcessPrecision { .. }
            | LedgerError::Unbalanced { .. }
            | LedgerError::BlankField(_)
            | LedgerError::InvalidRequestedStatus(_)
            | LedgerError::InvalidEntryNumber(_)
            | LedgerError::InvalidEventAmount { .. }
            | LedgerError::InvalidAccountCode(_)
            | LedgerError::CategoryMismatch { .. }
            | LedgerError::CyclicHierarchy(_)
            | LedgerError::NotCashAccount(_)
            | LedgerError::InvalidPeriod { .. } => Self::Validation(message),

            LedgerError::PeriodClosed { .. } | LedgerError::NoFiscalPeriod(_) => {
                Self::PeriodClosed(message)
            }

            LedgerError::DuplicateAccountCode(_)
            | LedgerError::PeriodAlreadyClosed(_)
            | LedgerError::InvalidTransition { .. }
            | LedgerError::AlreadyReversed(_)
            | LedgerError::DuplicateSource(_) => Self::Conflict(message),

            LedgerError::AccountNotFound(_)
            | LedgerError::AccountCodeNotFound(_)
            | LedgerError::PeriodNotFound(_)
            | LedgerError::EntryNotFound(_) => Self::NotFound(message),

            LedgerError::AccountInUse { .. }
            | LedgerError::AccountHasChildren { .. }
            | LedgerError::AccountTypeChangeNotAllowed(_)
            | LedgerError::CanOnlyDeleteDraft { .. } => Self::BusinessRule(message),
        }
    }
}
