//! Automatic journal dispatch for operational events.
//!
//! Each business document produces at most one entry: the entry's
//! `source_key` is `<reference_type>:<reference>` and is unique in storage.
//! Re-dispatching an event is a no-op that reports the existing entry.

use neraca_core::autojournal::{BusinessEvent, map_event};
use neraca_core::ledger::{
    CreateJournalEntryInput, EntryOrigin, JournalLineInput, JournalStatus, LedgerError,
    source_key,
};
use neraca_shared::config::AccountMappingConfig;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::{debug, info, instrument};

use super::account::find_by_code_in;
use super::journal::{JournalEntryWithLines, JournalRepository, find_by_source_in};
use crate::entities::journal_entries;
use crate::error::{RepositoryError, RepositoryResult};

/// Result of dispatching one event.
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    /// A new POSTED entry was created.
    Posted(JournalEntryWithLines),
    /// The document already has its entry.
    AlreadyProcessed(journal_entries::Model),
    /// The event carries no financial amount.
    Skipped,
}

impl DispatchOutcome {
    /// Number of the entry created or found, if any.
    #[must_use]
    pub fn entry_number(&self) -> Option<&str> {
        match self {
            Self::Posted(created) => Some(&created.entry.entry_number),
            Self::AlreadyProcessed(entry) => Some(&entry.entry_number),
            Self::Skipped => None,
        }
    }
}

/// Automatic journal repository.
#[derive(Debug, Clone)]
pub struct AutoJournalRepository {
    db: DatabaseConnection,
    accounts: AccountMappingConfig,
}

impl AutoJournalRepository {
    /// Creates a new auto-journal repository posting to `accounts`.
    #[must_use]
    pub const fn new(db: DatabaseConnection, accounts: AccountMappingConfig) -> Self {
        Self { db, accounts }
    }

    /// Dispatches an event in its own transaction.
    ///
    /// A concurrent dispatch of the same document that wins the race is
    /// reported as [`DispatchOutcome::AlreadyProcessed`].
    ///
    /// # Errors
    ///
    /// See [`Self::dispatch_in`].
    #[instrument(
        skip(self, event),
        fields(reference_type = event.reference_type(), reference = event.reference())
    )]
    pub async fn dispatch(&self, event: &BusinessEvent) -> RepositoryResult<DispatchOutcome> {
        let txn = self.db.begin().await?;
        match Self::dispatch_in(&txn, event, &self.accounts).await {
            Ok(outcome) => {
                txn.commit().await?;
                Ok(outcome)
            }
            Err(RepositoryError::Ledger(LedgerError::DuplicateSource(key))) => {
                txn.rollback().await?;
                let existing = find_by_source_in(&self.db, &key)
                    .await?
                    .ok_or(LedgerError::DuplicateSource(key))?;
                Ok(DispatchOutcome::AlreadyProcessed(existing))
            }
            Err(err) => Err(err),
        }
    }

    /// Dispatches an event inside the caller's transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The event amount is negative
    /// - A mapped account code does not exist
    /// - A payment names an account that is not a cash account
    /// - The event date falls outside an OPEN period
    pub async fn dispatch_in(
        txn: &DatabaseTransaction,
        event: &BusinessEvent,
        accounts: &AccountMappingConfig,
    ) -> RepositoryResult<DispatchOutcome> {
        let key = source_key(event.reference_type(), event.reference());

        if let Some(existing) = find_by_source_in(txn, &key).await? {
            debug!(source_key = %key, entry_number = %existing.entry_number, "already journaled");
            return Ok(DispatchOutcome::AlreadyProcessed(existing));
        }

        let Some(mapped) = map_event(event, accounts)? else {
            debug!(source_key = %key, "zero amount, nothing to journal");
            return Ok(DispatchOutcome::Skipped);
        };

        if let Some(code) = event.cash_account_override() {
            let account = find_by_code_in(txn, code)
                .await?
                .ok_or_else(|| LedgerError::AccountCodeNotFound(code.to_string()))?;
            if !account.is_cash_account {
                return Err(LedgerError::NotCashAccount(code.to_string()).into());
            }
        }

        let mut lines = Vec::with_capacity(mapped.len());
        for line in mapped {
            let account = find_by_code_in(txn, &line.account_code)
                .await?
                .ok_or_else(|| LedgerError::AccountCodeNotFound(line.account_code.clone()))?;
            lines.push(JournalLineInput {
                account_id: account.id,
                debit: line.debit,
                credit: line.credit,
                description: None,
            });
        }

        let input = CreateJournalEntryInput {
            entry_date: event.date(),
            description: event.description(),
            reference: Some(event.reference().to_string()),
            reference_type: Some(event.reference_type().to_string()),
            lines,
            status: JournalStatus::Posted,
            created_by: None,
        };
        let created = JournalRepository::create_entry_in(
            txn,
            &input,
            &EntryOrigin::Automatic { source_key: key },
        )
        .await?;

        info!(
            entry_number = %created.entry.entry_number,
            reference_type = event.reference_type(),
            reference = event.reference(),
            "automatic journal posted"
        );
        Ok(DispatchOutcome::Posted(created))
    }
}
