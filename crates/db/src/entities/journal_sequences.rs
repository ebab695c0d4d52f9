//! Per-year entry number counter.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Last issued sequence for a calendar year.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_sequences")]
pub struct Model {
    /// Calendar year.
    #[sea_orm(primary_key, auto_increment = false)]
    pub year: i32,
    /// Last number handed out, 0 before the first entry.
    pub last_number: i64,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// No relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
