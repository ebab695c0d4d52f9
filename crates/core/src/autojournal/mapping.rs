//! Fixed event-to-account mapping.

use neraca_shared::config::AccountMappingConfig;
use rust_decimal::Decimal;

use super::event::BusinessEvent;
use crate::ledger::LedgerError;

/// A journal line addressed by account code, before codes are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedLine {
    /// Account code.
    pub account_code: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

impl MappedLine {
    fn debit(code: &str, amount: Decimal) -> Self {
        Self {
            account_code: code.to_string(),
            debit: amount,
            credit: Decimal::ZERO,
        }
    }

    fn credit(code: &str, amount: Decimal) -> Self {
        Self {
            account_code: code.to_string(),
            debit: Decimal::ZERO,
            credit: amount,
        }
    }
}

/// Maps an event to its debit/credit pair.
///
/// Returns `Ok(None)` when the amount is zero and nothing should be posted.
///
/// # Errors
///
/// `InvalidEventAmount` for a negative amount on an event that only moves
/// one way.
pub fn map_event(
    event: &BusinessEvent,
    accounts: &AccountMappingConfig,
) -> Result<Option<Vec<MappedLine>>, LedgerError> {
    let cash = event
        .cash_account_override()
        .unwrap_or(accounts.cash.as_str());

    let (debit_code, credit_code, amount) = match event {
        BusinessEvent::PurchaseInvoiceCreated { amount, .. } => {
            (&accounts.inventory, &accounts.accounts_payable, *amount)
        }
        BusinessEvent::PurchasePaymentRecorded { amount, .. } => {
            return pair(event, &accounts.accounts_payable, cash, *amount);
        }
        BusinessEvent::SalesShipmentExecuted { cost_amount, .. } => {
            (&accounts.cost_of_goods_sold, &accounts.inventory, *cost_amount)
        }
        BusinessEvent::SalesInvoicePosted { amount, .. } => {
            (&accounts.accounts_receivable, &accounts.sales_revenue, *amount)
        }
        BusinessEvent::SalesPaymentReceived { amount, .. } => {
            return pair(event, cash, &accounts.accounts_receivable, *amount);
        }
        BusinessEvent::StockOpnameCompleted { value_delta, .. } => {
            if *value_delta >= Decimal::ZERO {
                (&accounts.inventory, &accounts.inventory_gain, *value_delta)
            } else {
                (&accounts.inventory_loss, &accounts.inventory, -*value_delta)
            }
        }
    };
    pair(event, debit_code, credit_code, amount)
}

fn pair(
    event: &BusinessEvent,
    debit_code: &str,
    credit_code: &str,
    amount: Decimal,
) -> Result<Option<Vec<MappedLine>>, LedgerError> {
    if amount < Decimal::ZERO {
        return Err(LedgerError::InvalidEventAmount {
            reference_type: event.reference_type(),
            reference: event.reference().to_string(),
            amount,
        });
    }
    if amount.is_zero() {
        return Ok(None);
    }
    Ok(Some(vec![
        MappedLine::debit(debit_code, amount),
        MappedLine::credit(credit_code, amount),
    ]))
}
