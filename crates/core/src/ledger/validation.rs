//! Journal line validation.
//!
//! Runs at creation, on every draft edit, and again at posting.

use neraca_shared::types::{AMOUNT_SCALE, fits_scale};
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{EntryTotals, JournalLineInput};

/// Validates a line set and returns its totals.
///
/// Rules, checked in order:
/// 1. at least one line
/// 2. no negative amounts
/// 3. exactly one non-zero side per line
/// 4. no amount finer than the smallest currency unit
/// 5. total debit equals total credit exactly
///
/// # Errors
///
/// The first rule broken, with the 1-based line number where applicable.
pub fn validate_lines(lines: &[JournalLineInput]) -> Result<EntryTotals, LedgerError> {
    if lines.is_empty() {
        return Err(LedgerError::EmptyEntry);
    }

    for (index, line) in lines.iter().enumerate() {
        let number = index + 1;
        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount { line: number });
        }
        match (line.debit.is_zero(), line.credit.is_zero()) {
            (false, false) => return Err(LedgerError::BothSidesSet { line: number }),
            (true, true) => return Err(LedgerError::NoSideSet { line: number }),
            _ => {}
        }
        let amount = line.debit.max(line.credit);
        if !fits_scale(amount, AMOUNT_SCALE) {
            return Err(LedgerError::ExcessPrecision {
                line: number,
                amount,
            });
        }
    }

    let totals = EntryTotals::of(lines);
    if !totals.is_balanced() {
        return Err(LedgerError::Unbalanced {
            debit: totals.total_debit,
            credit: totals.total_credit,
        });
    }
    Ok(totals)
}

/// Validates the header text of an entry.
pub fn validate_description(description: &str) -> Result<(), LedgerError> {
    if description.trim().is_empty() {
        return Err(LedgerError::BlankField("description"));
    }
    Ok(())
}
