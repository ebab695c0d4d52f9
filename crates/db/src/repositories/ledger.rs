//! Account ledger queries.
//!
//! Balances are computed on read from POSTED lines only.

use chrono::NaiveDate;
use neraca_core::account::AccountType;
use neraca_core::ledger::{AccountLedger, LedgerCalculator, LedgerError, LedgerSummary, PostedLine};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::JournalStatus;
use crate::entities::{accounts, journal_entries, journal_lines};
use crate::error::RepositoryResult;

/// Ledger query repository.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the ledger of one account over `[start, end]`.
    ///
    /// POSTED lines dated before `start` form the beginning balance; DRAFT
    /// and VOIDED entries never appear.
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist.
    pub async fn get_ledger(
        &self,
        account_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> RepositoryResult<AccountLedger> {
        let account = accounts::Entity::find_by_id(account_id)
            .one(&self.db)
            .await?
            .ok_or(LedgerError::AccountNotFound(account_id))?;
        let normal_balance = AccountType::from(account.account_type).normal_balance();

        let mut query = journal_lines::Entity::find()
            .find_also_related(journal_entries::Entity)
            .filter(journal_lines::Column::AccountId.eq(account_id))
            .filter(journal_entries::Column::Status.eq(JournalStatus::Posted));
        if let Some(end) = end {
            query = query.filter(journal_entries::Column::EntryDate.lte(end));
        }

        let lines = query
            .all(&self.db)
            .await?
            .into_iter()
            .filter_map(|(line, entry)| {
                entry.map(|entry| PostedLine {
                    entry_id: entry.id,
                    entry_number: entry.entry_number,
                    entry_date: entry.entry_date,
                    entry_description: entry.description,
                    line_number: line.line_number,
                    line_description: line.description,
                    debit: line.debit,
                    credit: line.credit,
                })
            })
            .collect();

        Ok(LedgerCalculator::build(normal_balance, lines, start, end))
    }

    /// Opening balance, period totals, and closing balance of one account.
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist.
    pub async fn get_summary(
        &self,
        account_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> RepositoryResult<LedgerSummary> {
        Ok(self.get_ledger(account_id, start, end).await?.summary())
    }
}
