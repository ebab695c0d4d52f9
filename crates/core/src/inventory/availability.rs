//! Stock availability gate.
//!
//! ```text
//! available = on_hand - reservations held by others
//! ```
//!
//! Reservations belonging to the document that is drawing stock are excluded
//! by the caller, so an order can always ship what it reserved.

use neraca_shared::config::NegativeStockPolicy;
use rust_decimal::Decimal;

use super::error::InventoryError;
use super::types::StockKey;

/// Outcome of an availability check that let the draw proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockCheck {
    /// Physical on-hand quantity.
    pub on_hand: Decimal,
    /// Quantity held by other documents' reservations.
    pub reserved: Decimal,
    /// On hand minus reserved.
    pub available: Decimal,
    /// Quantity asked for.
    pub requested: Decimal,
}

impl StockCheck {
    /// Quantity drawn beyond what was available; non-zero only under
    /// [`NegativeStockPolicy::Allow`].
    #[must_use]
    pub fn shortfall(&self) -> Decimal {
        (self.requested - self.available).max(Decimal::ZERO)
    }
}

/// Checks whether `requested` can be drawn.
///
/// # Errors
///
/// `InsufficientStock` when `requested` exceeds what is available and the
/// policy is [`NegativeStockPolicy::Block`].
pub fn check_availability(
    key: StockKey,
    on_hand: Decimal,
    reserved: Decimal,
    requested: Decimal,
    policy: NegativeStockPolicy,
) -> Result<StockCheck, InventoryError> {
    let available = on_hand - reserved;
    if requested > available && !policy.allows_negative() {
        return Err(InventoryError::InsufficientStock {
            location_id: key.location_id,
            product_variant_id: key.product_variant_id,
            requested,
            available,
            on_hand,
            reserved,
        });
    }
    Ok(StockCheck {
        on_hand,
        reserved,
        available,
        requested,
    })
}
