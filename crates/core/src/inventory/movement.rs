//! Movement legs.
//!
//! | type       | from     | to       | legs                          |
//! |------------|----------|----------|-------------------------------|
//! | IN         | -        | required | inbound                       |
//! | OUT        | required | -        | outbound (stock-gated)        |
//! | TRANSFER   | required | required | outbound (gated) + inbound    |
//! | ADJUSTMENT | one of   | one of   | inbound, or outbound ungated  |

use neraca_shared::types::{LocationId, QUANTITY_SCALE, fits_scale};
use rust_decimal::Decimal;

use super::error::InventoryError;
use super::types::{MovementInput, MovementType};

/// Stock leaving a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutboundLeg {
    /// Location drawn from.
    pub location_id: LocationId,
    /// Whether the availability check applies.
    pub gated: bool,
}

/// Stock arriving at a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InboundLeg {
    /// Location receiving.
    pub location_id: LocationId,
}

/// The legs of a validated movement. The outbound leg always runs first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementPlan {
    /// Stock leaving, if any.
    pub outbound: Option<OutboundLeg>,
    /// Stock arriving, if any.
    pub inbound: Option<InboundLeg>,
}

/// Validates a movement request and splits it into legs.
///
/// # Errors
///
/// Validation errors for bad quantities, costs, references, or a location
/// layout that does not fit the movement type.
pub fn plan_movement(input: &MovementInput) -> Result<MovementPlan, InventoryError> {
    if input.quantity <= Decimal::ZERO {
        return Err(InventoryError::NonPositiveQuantity(input.quantity));
    }
    if !fits_scale(input.quantity, QUANTITY_SCALE) {
        return Err(InventoryError::ExcessPrecision(input.quantity));
    }
    if let Some(cost) = input.unit_cost
        && cost < Decimal::ZERO
    {
        return Err(InventoryError::NegativeUnitCost(cost));
    }
    if input.reference.trim().is_empty() {
        return Err(InventoryError::BlankReference);
    }

    let kind = input.movement_type;
    let missing = |leg| InventoryError::MissingLocation {
        movement_type: kind,
        leg,
    };
    let unexpected = |leg| InventoryError::UnexpectedLocation {
        movement_type: kind,
        leg,
    };

    match (kind, input.from_location_id, input.to_location_id) {
        (MovementType::In, None, Some(to)) => Ok(MovementPlan {
            outbound: None,
            inbound: Some(InboundLeg { location_id: to }),
        }),
        (MovementType::In, _, None) => Err(missing("destination")),
        (MovementType::In, Some(_), Some(_)) => Err(unexpected("source")),

        (MovementType::Out, Some(from), None) => Ok(MovementPlan {
            outbound: Some(OutboundLeg {
                location_id: from,
                gated: true,
            }),
            inbound: None,
        }),
        (MovementType::Out, None, _) => Err(missing("source")),
        (MovementType::Out, Some(_), Some(_)) => Err(unexpected("destination")),

        (MovementType::Transfer, Some(from), Some(to)) if from == to => {
            Err(InventoryError::SameLocationTransfer)
        }
        (MovementType::Transfer, Some(from), Some(to)) => Ok(MovementPlan {
            outbound: Some(OutboundLeg {
                location_id: from,
                gated: true,
            }),
            inbound: Some(InboundLeg { location_id: to }),
        }),
        (MovementType::Transfer, None, _) => Err(missing("source")),
        (MovementType::Transfer, Some(_), None) => Err(missing("destination")),

        (MovementType::Adjustment, None, Some(to)) => Ok(MovementPlan {
            outbound: None,
            inbound: Some(InboundLeg { location_id: to }),
        }),
        (MovementType::Adjustment, Some(from), None) => Ok(MovementPlan {
            outbound: Some(OutboundLeg {
                location_id: from,
                gated: false,
            }),
            inbound: None,
        }),
        (MovementType::Adjustment, None, None) => Err(missing("source or destination")),
        (MovementType::Adjustment, Some(_), Some(_)) => Err(unexpected("second")),
    }
}

/// Signed effect of a recorded movement on the stock at `location`.
#[must_use]
pub fn signed_effect(
    from: Option<LocationId>,
    to: Option<LocationId>,
    quantity: Decimal,
    location: LocationId,
) -> Decimal {
    let mut effect = Decimal::ZERO;
    if from == Some(location) {
        effect -= quantity;
    }
    if to == Some(location) {
        effect += quantity;
    }
    effect
}
