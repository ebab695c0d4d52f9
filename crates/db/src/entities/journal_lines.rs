//! Journal line entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Journal line model. Exactly one of `debit`/`credit` is non-zero.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_lines")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning entry.
    pub journal_entry_id: Uuid,
    /// 1-based position within the entry.
    pub line_number: i32,
    /// Account posted to.
    pub account_id: Uuid,
    /// Debit amount.
    #[sea_orm(column_type = "Decimal(Some((20, 2)))")]
    pub debit: Decimal,
    /// Credit amount.
    #[sea_orm(column_type = "Decimal(Some((20, 2)))")]
    pub credit: Decimal,
    /// Line memo.
    pub description: Option<String>,
    /// Created timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Journal line relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Owning entry.
    #[sea_orm(
        belongs_to = "super::journal_entries::Entity",
        from = "Column::JournalEntryId",
        to = "super::journal_entries::Column::Id",
        on_delete = "Cascade"
    )]
    JournalEntries,
    /// Account posted to.
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id",
        on_delete = "Restrict"
    )]
    Accounts,
}

impl Related<super::journal_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalEntries.def()
    }
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
