//! Inventory error types.

use neraca_shared::AppError;
use neraca_shared::types::{LocationId, ProductVariantId, format_amount};
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use super::types::MovementType;

/// Errors from movements, reservations, and stock counts.
#[derive(Debug, Error)]
pub enum InventoryError {
    // ========== Validation Errors ==========
    /// Quantity must be strictly positive.
    #[error("Quantity must be greater than zero, got {0}")]
    NonPositiveQuantity(Decimal),

    /// Quantity is finer than the stored precision.
    #[error("Quantity {0} has more than 4 decimal places")]
    ExcessPrecision(Decimal),

    /// Unit cost must not be negative.
    #[error("Unit cost must not be negative, got {0}")]
    NegativeUnitCost(Decimal),

    /// Movement type needs a location it was not given.
    #[error("{movement_type} movement requires a {leg} location")]
    MissingLocation {
        /// Movement type.
        movement_type: MovementType,
        /// "source" or "destination".
        leg: &'static str,
    },

    /// Movement type was given a location it must not have.
    #[error("{movement_type} movement must not have a {leg} location")]
    UnexpectedLocation {
        /// Movement type.
        movement_type: MovementType,
        /// "source" or "destination".
        leg: &'static str,
    },

    /// Transfer source and destination are the same.
    #[error("Transfer source and destination must differ")]
    SameLocationTransfer,

    /// Reference text is blank.
    #[error("Reference must not be blank")]
    BlankReference,

    /// Counted quantity is negative.
    #[error("Counted quantity for variant {product_variant_id} must not be negative, got {counted}")]
    NegativeCount {
        /// Counted variant.
        product_variant_id: ProductVariantId,
        /// The offending count.
        counted: Decimal,
    },

    /// Shipment has no lines.
    #[error("Shipment for order {0} has no lines")]
    EmptyShipment(String),

    // ========== Stock Errors ==========
    /// Not enough unreserved stock.
    #[error(
        "Insufficient stock for variant {product_variant_id} at location {location_id}: requested {}, available {} (on hand {}, reserved {})",
        format_amount(.requested),
        format_amount(.available),
        format_amount(.on_hand),
        format_amount(.reserved)
    )]
    InsufficientStock {
        /// Location drawn from.
        location_id: LocationId,
        /// Variant drawn.
        product_variant_id: ProductVariantId,
        /// Requested quantity.
        requested: Decimal,
        /// On hand minus reservations held by others.
        available: Decimal,
        /// Physical on-hand quantity.
        on_hand: Decimal,
        /// Quantity held by reservations.
        reserved: Decimal,
    },

    /// Delivery has already been shipped and journaled.
    #[error("Shipment {0} has already been recorded")]
    ShipmentAlreadyRecorded(String),

    // ========== Stock Count Errors ==========
    /// Count session not found.
    #[error("Stock opname session not found: {0}")]
    OpnameNotFound(Uuid),

    /// Count session is no longer open.
    #[error("Stock opname session {0} is already completed")]
    OpnameCompleted(Uuid),

    /// Location already has an open count session.
    #[error("Location {location_id} already has an open stock opname session {session_id}")]
    OpnameAlreadyOpen {
        /// Location being counted.
        location_id: LocationId,
        /// The open session.
        session_id: Uuid,
    },
}

impl InventoryError {
    /// Returns the stable machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveQuantity(_) => "NON_POSITIVE_QUANTITY",
            Self::ExcessPrecision(_) => "EXCESS_PRECISION",
            Self::NegativeUnitCost(_) => "NEGATIVE_UNIT_COST",
            Self::MissingLocation { .. } => "MISSING_LOCATION",
            Self::UnexpectedLocation { .. } => "UNEXPECTED_LOCATION",
            Self::SameLocationTransfer => "SAME_LOCATION_TRANSFER",
            Self::BlankReference => "BLANK_REFERENCE",
            Self::NegativeCount { .. } => "NEGATIVE_COUNT",
            Self::EmptyShipment(_) => "EMPTY_SHIPMENT",
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::ShipmentAlreadyRecorded(_) => "SHIPMENT_ALREADY_RECORDED",
            Self::OpnameNotFound(_) => "OPNAME_NOT_FOUND",
            Self::OpnameCompleted(_) => "OPNAME_COMPLETED",
            Self::OpnameAlreadyOpen { .. } => "OPNAME_ALREADY_OPEN",
        }
    }
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        let message = err.to_string();
        match err {
            InventoryError::NonPositiveQuantity(_)
            | InventoryError::ExcessPrecision(_)
            | InventoryError::NegativeUnitCost(_)
            | InventoryError::MissingLocation { .. }
            | InventoryError::UnexpectedLocation { .. }
            | InventoryError::SameLocationTransfer
            | InventoryError::BlankReference
            | InventoryError::NegativeCount { .. }
            | InventoryError::EmptyShipment(_) => Self::Validation(message),
            InventoryError::InsufficientStock { .. } => Self::InsufficientStock(message),
            InventoryError::OpnameNotFound(_) => Self::NotFound(message),
            InventoryError::ShipmentAlreadyRecorded(_)
            | InventoryError::OpnameCompleted(_)
            | InventoryError::OpnameAlreadyOpen { .. } => Self::Conflict(message),
        }
    }
}
