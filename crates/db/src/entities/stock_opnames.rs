//! Stock count session entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::OpnameStatus;

/// Stock opname session model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_opnames")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Counted location.
    pub location_id: Uuid,
    /// OPEN or COMPLETED.
    pub status: OpnameStatus,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Created timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Completion timestamp.
    pub completed_at: Option<DateTimeWithTimeZone>,
}

/// Stock opname relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Counted lines.
    #[sea_orm(has_many = "super::stock_opname_items::Entity")]
    StockOpnameItems,
}

impl Related<super::stock_opname_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockOpnameItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
