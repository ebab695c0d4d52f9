//! Fiscal period repository.
//!
//! Periods are calendar months. Every ledger mutation calls
//! [`FiscalRepository::assert_open_in`] inside its own transaction, taking a
//! shared lock on the period row so a concurrent close waits for it.

use chrono::NaiveDate;
use neraca_core::fiscal::{FiscalPeriod, MonthBounds, PeriodGuard};
use neraca_core::ledger::LedgerError;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{fiscal_periods, sea_orm_active_enums::FiscalPeriodStatus};
use crate::error::{RepositoryError, RepositoryResult, is_unique_violation};

/// Fiscal period repository.
#[derive(Debug, Clone)]
pub struct FiscalRepository {
    db: DatabaseConnection,
}

impl FiscalRepository {
    /// Creates a new fiscal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens the period for `year`/`month`.
    ///
    /// Opening a period that is already OPEN returns it unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `month` is outside 1-12
    /// - The period exists and is CLOSED
    pub async fn open_period(
        &self,
        year: i32,
        month: u32,
    ) -> RepositoryResult<fiscal_periods::Model> {
        let bounds = MonthBounds::of(year, month)?;
        let month_column = i32::try_from(month)
            .map_err(|_| LedgerError::InvalidPeriod { year, month })?;

        if let Some(existing) = find_by_month_in(&self.db, year, month_column).await? {
            return reopen_guard(existing);
        }

        let now = chrono::Utc::now().into();
        let period = fiscal_periods::ActiveModel {
            id: Set(Uuid::now_v7()),
            year: Set(year),
            month: Set(month_column),
            name: Set(bounds.name),
            start_date: Set(bounds.start_date),
            end_date: Set(bounds.end_date),
            status: Set(FiscalPeriodStatus::Open),
            closed_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match period.insert(&self.db).await {
            Ok(period) => {
                info!(period_id = %period.id, name = %period.name, "fiscal period opened");
                Ok(period)
            }
            Err(err) if is_unique_violation(&err) => {
                let existing = find_by_month_in(&self.db, year, month_column)
                    .await?
                    .ok_or(RepositoryError::Database(err))?;
                reopen_guard(existing)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Closes a period. Irreversible.
    ///
    /// Waits for in-flight postings that hold the period's shared lock.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Period not found
    /// - Period is already CLOSED
    pub async fn close_period(&self, period_id: Uuid) -> RepositoryResult<fiscal_periods::Model> {
        let txn = self.db.begin().await?;

        let period = fiscal_periods::Entity::find_by_id(period_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(LedgerError::PeriodNotFound(period_id))?;

        PeriodGuard::ensure_closable(&to_domain(&period)?)?;

        let now = chrono::Utc::now().into();
        let mut active: fiscal_periods::ActiveModel = period.into();
        active.status = Set(FiscalPeriodStatus::Closed);
        active.closed_at = Set(Some(now));
        active.updated_at = Set(now);
        let closed = active.update(&txn).await?;

        txn.commit().await?;

        info!(period_id = %closed.id, name = %closed.name, "fiscal period closed");
        Ok(closed)
    }

    /// Finds the period containing `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_period_for_date(
        &self,
        date: NaiveDate,
    ) -> RepositoryResult<Option<fiscal_periods::Model>> {
        Ok(containing_query(date).one(&self.db).await?)
    }

    /// Ensures `date` falls in an OPEN period, holding a shared lock on the
    /// period row until `txn` ends.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No period contains `date`
    /// - The containing period is CLOSED
    pub async fn assert_open_in(
        txn: &DatabaseTransaction,
        date: NaiveDate,
    ) -> RepositoryResult<fiscal_periods::Model> {
        let period = containing_query(date).lock_shared().one(txn).await?;
        let domain = period.as_ref().map(to_domain).transpose()?;
        PeriodGuard::ensure_open(domain.as_ref(), date)?;
        period.ok_or_else(|| LedgerError::NoFiscalPeriod(date).into())
    }
}

fn containing_query(date: NaiveDate) -> sea_orm::Select<fiscal_periods::Entity> {
    fiscal_periods::Entity::find()
        .filter(fiscal_periods::Column::StartDate.lte(date))
        .filter(fiscal_periods::Column::EndDate.gte(date))
}

async fn find_by_month_in<C: ConnectionTrait>(
    conn: &C,
    year: i32,
    month: i32,
) -> RepositoryResult<Option<fiscal_periods::Model>> {
    Ok(fiscal_periods::Entity::find()
        .filter(fiscal_periods::Column::Year.eq(year))
        .filter(fiscal_periods::Column::Month.eq(month))
        .one(conn)
        .await?)
}

fn reopen_guard(existing: fiscal_periods::Model) -> RepositoryResult<fiscal_periods::Model> {
    match existing.status {
        FiscalPeriodStatus::Open => Ok(existing),
        FiscalPeriodStatus::Closed => Err(LedgerError::PeriodAlreadyClosed(existing.name).into()),
    }
}

/// Converts a stored period into the domain type.
pub(crate) fn to_domain(model: &fiscal_periods::Model) -> RepositoryResult<FiscalPeriod> {
    let month = u32::try_from(model.month)
        .map_err(|_| RepositoryError::Corrupt(format!("fiscal period month {}", model.month)))?;
    Ok(FiscalPeriod {
        id: model.id,
        year: model.year,
        month,
        name: model.name.clone(),
        start_date: model.start_date,
        end_date: model.end_date,
        status: model.status.into(),
    })
}
