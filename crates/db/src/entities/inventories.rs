//! Current stock per (location, variant).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory model. Unique on (location, variant).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventories")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Stock-holding location.
    pub location_id: Uuid,
    /// Stocked variant.
    pub product_variant_id: Uuid,
    /// Quantity on hand.
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub quantity: Decimal,
    /// Moving-average unit cost.
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub average_cost: Decimal,
    /// Created timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// No relations; locations and variants live outside this schema.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
