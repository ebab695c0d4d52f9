//! Inventory domain types.

use neraca_shared::types::{LocationId, ProductVariantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementType {
    /// Receipt into a location.
    In,
    /// Issue out of a location.
    Out,
    /// Move between two locations.
    Transfer,
    /// Correction at one location, either direction.
    Adjustment,
}

impl MovementType {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
            Self::Transfer => "TRANSFER",
            Self::Adjustment => "ADJUSTMENT",
        }
    }
}

impl std::fmt::Display for MovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one inventory row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StockKey {
    /// Location holding the stock.
    pub location_id: LocationId,
    /// Variant held.
    pub product_variant_id: ProductVariantId,
}

impl StockKey {
    /// Creates a key.
    #[must_use]
    pub const fn new(location_id: LocationId, product_variant_id: ProductVariantId) -> Self {
        Self {
            location_id,
            product_variant_id,
        }
    }
}

/// Quantity and moving-average cost of one inventory row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StockLevel {
    /// On-hand quantity; may be negative under the ALLOW policy.
    pub quantity: Decimal,
    /// Moving-average unit cost.
    pub average_cost: Decimal,
}

/// Request to record one movement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementInput {
    /// Movement kind.
    pub movement_type: MovementType,
    /// Variant moved.
    pub product_variant_id: ProductVariantId,
    /// Strictly positive quantity.
    pub quantity: Decimal,
    /// Source location (OUT, TRANSFER, decreasing ADJUSTMENT).
    pub from_location_id: Option<LocationId>,
    /// Destination location (IN, TRANSFER, increasing ADJUSTMENT).
    pub to_location_id: Option<LocationId>,
    /// Inbound unit cost; `None` keeps the current average.
    pub unit_cost: Option<Decimal>,
    /// Business document that caused the movement.
    pub reference: String,
}

impl MovementInput {
    /// Receipt of `quantity` at `location` costing `unit_cost` each.
    #[must_use]
    pub fn receipt(
        product_variant_id: ProductVariantId,
        location: LocationId,
        quantity: Decimal,
        unit_cost: Decimal,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            movement_type: MovementType::In,
            product_variant_id,
            quantity,
            from_location_id: None,
            to_location_id: Some(location),
            unit_cost: Some(unit_cost),
            reference: reference.into(),
        }
    }

    /// Issue of `quantity` from `location`.
    #[must_use]
    pub fn issue(
        product_variant_id: ProductVariantId,
        location: LocationId,
        quantity: Decimal,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            movement_type: MovementType::Out,
            product_variant_id,
            quantity,
            from_location_id: Some(location),
            to_location_id: None,
            unit_cost: None,
            reference: reference.into(),
        }
    }

    /// Transfer of `quantity` from one location to another.
    #[must_use]
    pub fn transfer(
        product_variant_id: ProductVariantId,
        from: LocationId,
        to: LocationId,
        quantity: Decimal,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            movement_type: MovementType::Transfer,
            product_variant_id,
            quantity,
            from_location_id: Some(from),
            to_location_id: Some(to),
            unit_cost: None,
            reference: reference.into(),
        }
    }
}
