//! Operational events that carry a financial effect.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reference type of cost-of-goods journals, one per delivery.
pub const SALES_SHIPMENT_REFERENCE_TYPE: &str = "SALES_SHIPMENT";

/// An operational event that must be journaled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BusinessEvent {
    /// Supplier invoice recorded: Dr inventory, Cr payables.
    PurchaseInvoiceCreated {
        /// Invoice id.
        invoice_id: String,
        /// Invoice date.
        date: NaiveDate,
        /// Invoice total.
        amount: Decimal,
    },
    /// Supplier paid: Dr payables, Cr cash.
    PurchasePaymentRecorded {
        /// Payment id.
        payment_id: String,
        /// Payment date.
        date: NaiveDate,
        /// Amount paid.
        amount: Decimal,
        /// Cash/bank account used instead of the default.
        cash_account_code: Option<String>,
    },
    /// Goods shipped to a customer: Dr cost of goods sold, Cr inventory.
    SalesShipmentExecuted {
        /// Delivery that left the warehouse; an order may ship in several.
        shipment_reference: String,
        /// Shipment date.
        date: NaiveDate,
        /// Shipped quantity valued at average cost.
        cost_amount: Decimal,
    },
    /// Customer invoiced: Dr receivables, Cr revenue.
    SalesInvoicePosted {
        /// Invoice id.
        invoice_id: String,
        /// Invoice date.
        date: NaiveDate,
        /// Invoice total.
        amount: Decimal,
    },
    /// Customer paid: Dr cash, Cr receivables.
    SalesPaymentReceived {
        /// Payment id.
        payment_id: String,
        /// Receipt date.
        date: NaiveDate,
        /// Amount received.
        amount: Decimal,
        /// Cash/bank account used instead of the default.
        cash_account_code: Option<String>,
    },
    /// Stock count completed: surplus Dr inventory / Cr gain, shortage
    /// Dr loss / Cr inventory.
    StockOpnameCompleted {
        /// Count session id.
        session_id: String,
        /// Completion date.
        date: NaiveDate,
        /// Net valued variance; positive is a surplus.
        value_delta: Decimal,
    },
}

impl BusinessEvent {
    /// Kind of business document, stored as the entry's reference type.
    #[must_use]
    pub const fn reference_type(&self) -> &'static str {
        match self {
            Self::PurchaseInvoiceCreated { .. } => "PURCHASE_INVOICE",
            Self::PurchasePaymentRecorded { .. } => "PURCHASE_PAYMENT",
            Self::SalesShipmentExecuted { .. } => SALES_SHIPMENT_REFERENCE_TYPE,
            Self::SalesInvoicePosted { .. } => "SALES_INVOICE",
            Self::SalesPaymentReceived { .. } => "SALES_PAYMENT",
            Self::StockOpnameCompleted { .. } => "STOCK_OPNAME",
        }
    }

    /// Business document id, stored as the entry's reference.
    #[must_use]
    pub fn reference(&self) -> &str {
        match self {
            Self::PurchaseInvoiceCreated { invoice_id, .. }
            | Self::SalesInvoicePosted { invoice_id, .. } => invoice_id,
            Self::PurchasePaymentRecorded { payment_id, .. }
            | Self::SalesPaymentReceived { payment_id, .. } => payment_id,
            Self::SalesShipmentExecuted {
                shipment_reference, ..
            } => shipment_reference,
            Self::StockOpnameCompleted { session_id, .. } => session_id,
        }
    }

    /// Accounting date of the entry.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        match self {
            Self::PurchaseInvoiceCreated { date, .. }
            | Self::PurchasePaymentRecorded { date, .. }
            | Self::SalesShipmentExecuted { date, .. }
            | Self::SalesInvoicePosted { date, .. }
            | Self::SalesPaymentReceived { date, .. }
            | Self::StockOpnameCompleted { date, .. } => *date,
        }
    }

    /// Entry description.
    #[must_use]
    pub fn description(&self) -> String {
        let reference = self.reference();
        match self {
            Self::PurchaseInvoiceCreated { .. } => format!("Purchase invoice {reference}"),
            Self::PurchasePaymentRecorded { .. } => format!("Payment to supplier {reference}"),
            Self::SalesShipmentExecuted { .. } => format!("Cost of goods shipped for {reference}"),
            Self::SalesInvoicePosted { .. } => format!("Sales invoice {reference}"),
            Self::SalesPaymentReceived { .. } => format!("Payment from customer {reference}"),
            Self::StockOpnameCompleted { .. } => format!("Stock opname adjustment {reference}"),
        }
    }

    /// Cash account explicitly chosen for a payment.
    #[must_use]
    pub fn cash_account_override(&self) -> Option<&str> {
        match self {
            Self::PurchasePaymentRecorded {
                cash_account_code, ..
            }
            | Self::SalesPaymentReceived {
                cash_account_code, ..
            } => cash_account_code.as_deref(),
            _ => None,
        }
    }
}
