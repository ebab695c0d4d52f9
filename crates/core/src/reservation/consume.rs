//! Reservation checks and FIFO consumption.

use neraca_shared::types::{QUANTITY_SCALE, fits_scale};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::types::OpenReservation;
use crate::inventory::{InventoryError, StockKey};

/// Rejects a reservation that would hold more than is on hand.
///
/// `held` is the total of live ACTIVE reservations at the same
/// (location, variant).
///
/// # Errors
///
/// Validation errors for a bad quantity, `InsufficientStock` when
/// `held + quantity > on_hand`.
pub fn ensure_reservable(
    key: StockKey,
    on_hand: Decimal,
    held: Decimal,
    quantity: Decimal,
) -> Result<(), InventoryError> {
    if quantity <= Decimal::ZERO {
        return Err(InventoryError::NonPositiveQuantity(quantity));
    }
    if !fits_scale(quantity, QUANTITY_SCALE) {
        return Err(InventoryError::ExcessPrecision(quantity));
    }
    if held + quantity > on_hand {
        return Err(InventoryError::InsufficientStock {
            location_id: key.location_id,
            product_variant_id: key.product_variant_id,
            requested: quantity,
            available: on_hand - held,
            on_hand,
            reserved: held,
        });
    }
    Ok(())
}

/// What consuming does to one reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumptionStep {
    /// Reservation touched.
    pub reservation_id: Uuid,
    /// Quantity taken from it.
    pub consumed: Decimal,
    /// Quantity it still holds afterwards.
    pub remaining: Decimal,
}

impl ConsumptionStep {
    /// Returns true if the reservation becomes FULFILLED.
    #[must_use]
    pub fn is_fulfilled(&self) -> bool {
        self.remaining.is_zero()
    }
}

/// Result of planning a consumption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumptionPlan {
    /// Reservations touched, oldest first.
    pub steps: Vec<ConsumptionStep>,
    /// Quantity covered by reservations.
    pub consumed: Decimal,
    /// Quantity beyond all reservations; shipped unbacked, never an error.
    pub unbacked: Decimal,
}

/// Plans consuming `quantity` from `reservations`, oldest first.
///
/// # Errors
///
/// `NonPositiveQuantity` if `quantity <= 0`.
pub fn plan_consumption(
    reservations: &[OpenReservation],
    quantity: Decimal,
) -> Result<ConsumptionPlan, InventoryError> {
    if quantity <= Decimal::ZERO {
        return Err(InventoryError::NonPositiveQuantity(quantity));
    }

    let mut ordered: Vec<&OpenReservation> = reservations.iter().collect();
    ordered.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

    let mut left = quantity;
    let mut steps = Vec::new();
    for reservation in ordered {
        if left.is_zero() {
            break;
        }
        if reservation.quantity <= Decimal::ZERO {
            continue;
        }
        let take = left.min(reservation.quantity);
        left -= take;
        steps.push(ConsumptionStep {
            reservation_id: reservation.id,
            consumed: take,
            remaining: reservation.quantity - take,
        });
    }

    Ok(ConsumptionPlan {
        steps,
        consumed: quantity - left,
        unbacked: left,
    })
}
