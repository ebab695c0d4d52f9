//! Soft stock holds.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{ReservationStatus, ReservedFor};

/// Stock reservation model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_reservations")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Held variant.
    pub product_variant_id: Uuid,
    /// Location the stock is held at.
    pub location_id: Uuid,
    /// Quantity still held.
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub quantity: Decimal,
    /// Document kind the hold is for.
    pub reserved_for: ReservedFor,
    /// Document id the hold is for.
    pub reference_id: String,
    /// ACTIVE, FULFILLED, or CANCELLED.
    pub status: ReservationStatus,
    /// Hold stops counting after this instant.
    pub expires_at: Option<DateTimeWithTimeZone>,
    /// Created timestamp; FIFO order for consumption.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// No relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
