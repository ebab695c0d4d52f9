//! Stock count line entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One variant within a count session. Unique on (session, variant).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_opname_items")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning session.
    pub stock_opname_id: Uuid,
    /// Counted variant.
    pub product_variant_id: Uuid,
    /// On-hand when the line was snapshotted.
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub system_quantity: Decimal,
    /// Physically counted quantity, unset until counted.
    #[sea_orm(column_type = "Decimal(Some((20, 4)))", nullable)]
    pub counted_quantity: Option<Decimal>,
    /// Counter's notes.
    pub notes: Option<String>,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Stock opname item relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Owning session.
    #[sea_orm(
        belongs_to = "super::stock_opnames::Entity",
        from = "Column::StockOpnameId",
        to = "super::stock_opnames::Column::Id",
        on_delete = "Cascade"
    )]
    StockOpnames,
}

impl Related<super::stock_opnames::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockOpnames.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
