//! Append-only stock movement trail.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::MovementType;

/// Stock movement model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_movements")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// IN, OUT, TRANSFER, or ADJUSTMENT.
    pub movement_type: MovementType,
    /// Moved variant.
    pub product_variant_id: Uuid,
    /// Source location.
    pub from_location_id: Option<Uuid>,
    /// Destination location.
    pub to_location_id: Option<Uuid>,
    /// Always positive; direction comes from the locations.
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub quantity: Decimal,
    /// Unit cost the movement was valued at.
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub cost: Decimal,
    /// Originating document.
    pub reference: String,
    /// Created timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// No relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
