//! Stock count domain types.

use neraca_shared::types::ProductVariantId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Count session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OpnameStatus {
    /// Counts may still be recorded.
    Open,
    /// Adjustments applied; terminal.
    Completed,
}

impl OpnameStatus {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Completed => "COMPLETED",
        }
    }
}

/// One counted quantity submitted by a counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountInput {
    /// Variant counted.
    pub product_variant_id: ProductVariantId,
    /// Physical quantity found.
    pub counted_quantity: Decimal,
    /// Counter's remark.
    pub notes: Option<String>,
}

/// A session line as read from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountedLine {
    /// Variant.
    pub product_variant_id: ProductVariantId,
    /// Quantity the system held when the line was snapshotted.
    pub system_quantity: Decimal,
    /// Physical count, if recorded.
    pub counted_quantity: Option<Decimal>,
}
