//! Journal domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference type stamped on reversing entries.
pub const REVERSAL_REFERENCE_TYPE: &str = "JOURNAL_REVERSAL";

/// Journal entry status.
///
/// DRAFT → POSTED → VOIDED. Only POSTED entries affect balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JournalStatus {
    /// Being prepared; editable and deletable.
    Draft,
    /// Final; counted in every balance.
    Posted,
    /// Cancelled after posting; lines kept for audit, never counted.
    Voided,
}

impl JournalStatus {
    /// Returns true if lines and header can still change.
    #[must_use]
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if lines of an entry in this status count toward balances.
    #[must_use]
    pub const fn affects_balances(self) -> bool {
        matches!(self, Self::Posted)
    }

    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Posted => "POSTED",
            Self::Voided => "VOIDED",
        }
    }
}

impl std::fmt::Display for JournalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One debit or credit line of a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLineInput {
    /// Account to post to.
    pub account_id: Uuid,
    /// Debit amount, zero on credit lines.
    pub debit: Decimal,
    /// Credit amount, zero on debit lines.
    pub credit: Decimal,
    /// Optional line memo.
    pub description: Option<String>,
}

impl JournalLineInput {
    /// A debit line.
    #[must_use]
    pub const fn debit(account_id: Uuid, amount: Decimal) -> Self {
        Self {
            account_id,
            debit: amount,
            credit: Decimal::ZERO,
            description: None,
        }
    }

    /// A credit line.
    #[must_use]
    pub const fn credit(account_id: Uuid, amount: Decimal) -> Self {
        Self {
            account_id,
            debit: Decimal::ZERO,
            credit: amount,
            description: None,
        }
    }

    /// Attaches a line memo.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Input for creating a journal entry.
#[derive(Debug, Clone)]
pub struct CreateJournalEntryInput {
    /// Accounting date; must fall in an OPEN period.
    pub entry_date: NaiveDate,
    /// Header description.
    pub description: String,
    /// Originating business document id.
    pub reference: Option<String>,
    /// Originating business document kind.
    pub reference_type: Option<String>,
    /// Debit/credit lines in display order.
    pub lines: Vec<JournalLineInput>,
    /// DRAFT or POSTED.
    pub status: JournalStatus,
    /// Creating user, `None` for system entries.
    pub created_by: Option<Uuid>,
}

/// Replacement content for a DRAFT entry.
#[derive(Debug, Clone)]
pub struct UpdateDraftInput {
    /// New accounting date.
    pub entry_date: NaiveDate,
    /// New header description.
    pub description: String,
    /// New reference.
    pub reference: Option<String>,
    /// New reference type.
    pub reference_type: Option<String>,
    /// New line set, replacing the old one.
    pub lines: Vec<JournalLineInput>,
}

/// Who produced an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOrigin {
    /// Keyed in by a user.
    Manual,
    /// Reversal of another entry; one per original.
    Reversal {
        /// Uniqueness key, see [`source_key`].
        source_key: String,
    },
    /// Generated from an operational event; one per business document.
    Automatic {
        /// Uniqueness key, see [`source_key`].
        source_key: String,
    },
}

impl EntryOrigin {
    /// Returns true for entries generated from operational events.
    ///
    /// Reversals are requested by a user and stay false.
    #[must_use]
    pub const fn is_auto_generated(&self) -> bool {
        matches!(self, Self::Automatic { .. })
    }

    /// Uniqueness key persisted with the entry.
    #[must_use]
    pub fn source_key(&self) -> Option<&str> {
        match self {
            Self::Manual => None,
            Self::Reversal { source_key } | Self::Automatic { source_key } => Some(source_key),
        }
    }
}

/// Key identifying the business document a system entry was made for.
#[must_use]
pub fn source_key(reference_type: &str, reference: &str) -> String {
    format!("{reference_type}:{reference}")
}

/// Debit and credit totals of a validated line set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryTotals {
    /// Sum of debits.
    pub total_debit: Decimal,
    /// Sum of credits.
    pub total_credit: Decimal,
}

impl EntryTotals {
    /// Sums a line set.
    #[must_use]
    pub fn of(lines: &[JournalLineInput]) -> Self {
        lines.iter().fold(
            Self {
                total_debit: Decimal::ZERO,
                total_credit: Decimal::ZERO,
            },
            |acc, line| Self {
                total_debit: acc.total_debit + line.debit,
                total_credit: acc.total_credit + line.credit,
            },
        )
    }

    /// Returns true if debits equal credits exactly.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.total_debit == self.total_credit
    }
}
