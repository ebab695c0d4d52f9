//! Account ledger folding.
//!
//! Balances are never stored. A ledger is recomputed from POSTED lines every
//! time: lines before the start date collapse into the beginning balance, the
//! rest become rows carrying a running balance.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::numbering::compare_entry_numbers;
use crate::account::NormalBalance;

/// One POSTED journal line touching the account, as read from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedLine {
    /// Owning entry.
    pub entry_id: Uuid,
    /// Owning entry number.
    pub entry_number: String,
    /// Owning entry date.
    pub entry_date: NaiveDate,
    /// Owning entry description.
    pub entry_description: String,
    /// Position of the line within its entry.
    pub line_number: i32,
    /// Line memo.
    pub line_description: Option<String>,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

/// A ledger row with its running balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerRow {
    /// Owning entry.
    pub entry_id: Uuid,
    /// Owning entry number.
    pub entry_number: String,
    /// Entry date.
    pub date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// Line memo.
    pub line_description: Option<String>,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Balance after this row, in the account's normal direction.
    pub balance: Decimal,
}

/// Ledger of one account over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountLedger {
    /// Balance carried in from before the range.
    pub beginning_balance: Decimal,
    /// Rows inside the range, oldest first.
    pub rows: Vec<LedgerRow>,
    /// Sum of debits inside the range.
    pub total_debit: Decimal,
    /// Sum of credits inside the range.
    pub total_credit: Decimal,
    /// Balance after the last row.
    pub ending_balance: Decimal,
}

/// Opening/closing view of a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    /// Balance before the range.
    pub opening_balance: Decimal,
    /// Debits inside the range.
    pub total_debit: Decimal,
    /// Credits inside the range.
    pub total_credit: Decimal,
    /// Balance at the end of the range.
    pub closing_balance: Decimal,
}

impl AccountLedger {
    /// Collapses the ledger into totals.
    #[must_use]
    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            opening_balance: self.beginning_balance,
            total_debit: self.total_debit,
            total_credit: self.total_credit,
            closing_balance: self.ending_balance,
        }
    }
}

/// Stateless ledger calculator.
pub struct LedgerCalculator;

impl LedgerCalculator {
    /// Folds POSTED lines into a ledger for `[start, end]` (both optional,
    /// both inclusive).
    ///
    /// Lines are ordered by (entry date, entry number, line number) regardless
    /// of input order. Lines after `end` are ignored.
    #[must_use]
    pub fn build(
        normal_balance: NormalBalance,
        mut lines: Vec<PostedLine>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> AccountLedger {
        lines.sort_by(|a, b| {
            a.entry_date
                .cmp(&b.entry_date)
                .then_with(|| compare_entry_numbers(&a.entry_number, &b.entry_number))
                .then_with(|| a.line_number.cmp(&b.line_number))
        });

        let mut ledger = AccountLedger {
            beginning_balance: Decimal::ZERO,
            rows: Vec::new(),
            total_debit: Decimal::ZERO,
            total_credit: Decimal::ZERO,
            ending_balance: Decimal::ZERO,
        };
        let mut balance = Decimal::ZERO;

        for line in lines {
            if end.is_some_and(|end| line.entry_date > end) {
                break;
            }
            balance += normal_balance.balance_change(line.debit, line.credit);
            if start.is_some_and(|start| line.entry_date < start) {
                ledger.beginning_balance = balance;
                continue;
            }
            ledger.total_debit += line.debit;
            ledger.total_credit += line.credit;
            ledger.rows.push(LedgerRow {
                entry_id: line.entry_id,
                entry_number: line.entry_number,
                date: line.entry_date,
                description: line.entry_description,
                line_description: line.line_description,
                debit: line.debit,
                credit: line.credit,
                balance,
            });
        }

        ledger.ending_balance = balance;
        ledger
    }
}
