//! Chart of accounts entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{AccountCategory, AccountType};

/// Account model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Unique account code, e.g. "1100".
    #[sea_orm(unique)]
    pub code: String,
    /// Display name.
    pub name: String,
    /// Fixes the normal balance side.
    pub account_type: AccountType,
    /// Sub-classification within the type.
    pub category: AccountCategory,
    /// Parent in the account tree.
    pub parent_id: Option<Uuid>,
    /// Whether payments may settle through this account.
    pub is_cash_account: bool,
    /// Created timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Account relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Lines posted to this account.
    #[sea_orm(has_many = "super::journal_lines::Entity")]
    JournalLines,
}

impl Related<super::journal_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
