//! Reservation domain types.

use chrono::{DateTime, Utc};
use neraca_shared::types::{LocationId, ProductVariantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reservation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReservationStatus {
    /// Holding stock.
    Active,
    /// Fully consumed by its document.
    Fulfilled,
    /// Released without being consumed.
    Cancelled,
}

impl ReservationStatus {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Fulfilled => "FULFILLED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// Kind of document holding the reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservedFor {
    /// Customer order awaiting shipment.
    SalesOrder,
    /// Inter-location transfer awaiting dispatch.
    TransferOrder,
    /// Production run awaiting material issue.
    ProductionOrder,
}

impl ReservedFor {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SalesOrder => "SALES_ORDER",
            Self::TransferOrder => "TRANSFER_ORDER",
            Self::ProductionOrder => "PRODUCTION_ORDER",
        }
    }
}

/// Request to place a reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReserveInput {
    /// Variant held.
    pub product_variant_id: ProductVariantId,
    /// Location held at.
    pub location_id: LocationId,
    /// Quantity held.
    pub quantity: Decimal,
    /// Kind of holding document.
    pub reserved_for: ReservedFor,
    /// Holding document id.
    pub reference_id: String,
    /// Optional expiry; expired holds stop counting against availability.
    pub expires_at: Option<DateTime<Utc>>,
}

/// An ACTIVE reservation as read from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenReservation {
    /// Reservation id.
    pub id: Uuid,
    /// Remaining held quantity.
    pub quantity: Decimal,
    /// Creation time; consumption order.
    pub created_at: DateTime<Utc>,
    /// Optional expiry.
    pub expires_at: Option<DateTime<Utc>>,
}

impl OpenReservation {
    /// Returns true if the hold still counts against availability at `now`.
    #[must_use]
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|at| at > now)
    }
}
