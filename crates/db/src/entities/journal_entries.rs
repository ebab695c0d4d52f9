//! Journal entry header entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::JournalStatus;

/// Journal entry model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_entries")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// `JE-<year>-<sequence>`, unique.
    #[sea_orm(unique)]
    pub entry_number: String,
    /// Accounting date.
    pub entry_date: Date,
    /// Header description.
    pub description: String,
    /// Originating document id.
    pub reference: Option<String>,
    /// Originating document kind.
    pub reference_type: Option<String>,
    /// DRAFT, POSTED, or VOIDED.
    pub status: JournalStatus,
    /// Produced by an automatic journal.
    pub is_auto_generated: bool,
    /// `<reference_type>:<reference>` for system entries, unique when set.
    #[sea_orm(unique)]
    pub source_key: Option<String>,
    /// Creating user.
    pub created_by: Option<Uuid>,
    /// When the entry was posted.
    pub posted_at: Option<DateTimeWithTimeZone>,
    /// When the entry was voided.
    pub voided_at: Option<DateTimeWithTimeZone>,
    /// Created timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Journal entry relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Debit/credit lines.
    #[sea_orm(has_many = "super::journal_lines::Entity")]
    JournalLines,
}

impl Related<super::journal_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
