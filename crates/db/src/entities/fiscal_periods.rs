//! Monthly fiscal period entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::FiscalPeriodStatus;

/// Fiscal period model. One row per (year, month).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fiscal_periods")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: i32,
    /// Display name, e.g. "March 2026".
    pub name: String,
    /// First day of the month.
    pub start_date: Date,
    /// Last day of the month.
    pub end_date: Date,
    /// OPEN or CLOSED.
    pub status: FiscalPeriodStatus,
    /// When the period was closed.
    pub closed_at: Option<DateTimeWithTimeZone>,
    /// Created timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Fiscal periods have no relations; entries find theirs by date.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
