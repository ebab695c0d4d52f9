//! Journal entry repository.
//!
//! Owns the entry lifecycle: create (DRAFT or POSTED), edit draft, post,
//! void, reverse, and delete draft. Each operation runs in one transaction
//! that also re-checks the fiscal period of the entry date.
//!
//! Entry numbers come from `journal_sequences`, one row per year, locked for
//! the rest of the transaction. A rolled-back transaction returns its
//! number. Numbers are unique and increasing within a year but not gapless:
//! a deleted draft, or a draft moved to another year, leaves its old number
//! unused.

use chrono::{Datelike, NaiveDate};
use neraca_core::ledger::{
    CreateJournalEntryInput, EntryNumber, EntryOrigin, JournalAction, JournalLineInput,
    JournalStatus, JournalWorkflow, LedgerError, ReversalService, UpdateDraftInput,
    validate_description, validate_lines,
};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::fiscal::FiscalRepository;
use crate::entities::{accounts, journal_entries, journal_lines, journal_sequences};
use crate::error::{RepositoryError, RepositoryResult, is_unique_violation};

/// Journal entry with its lines in line order.
#[derive(Debug, Clone)]
pub struct JournalEntryWithLines {
    /// The entry header.
    pub entry: journal_entries::Model,
    /// The entry lines.
    pub lines: Vec<journal_lines::Model>,
}

/// Journal entry repository.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    db: DatabaseConnection,
}

impl JournalRepository {
    /// Creates a new journal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a manual journal entry as DRAFT or POSTED.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Requested status is VOIDED
    /// - Description is blank or the lines fail validation
    /// - A line references an unknown account
    /// - The entry date has no fiscal period or its period is CLOSED
    #[instrument(skip(self, input), fields(entry_date = %input.entry_date))]
    pub async fn create_entry(
        &self,
        input: CreateJournalEntryInput,
    ) -> RepositoryResult<JournalEntryWithLines> {
        let txn = self.db.begin().await?;
        let created = Self::create_entry_in(&txn, &input, &EntryOrigin::Manual).await?;
        txn.commit().await?;
        Ok(created)
    }

    /// Creates an entry inside an open transaction.
    ///
    /// System origins carry a source key; a second entry with the same key is
    /// rejected with [`LedgerError::DuplicateSource`].
    ///
    /// # Errors
    ///
    /// See [`Self::create_entry`].
    pub async fn create_entry_in(
        txn: &DatabaseTransaction,
        input: &CreateJournalEntryInput,
        origin: &EntryOrigin,
    ) -> RepositoryResult<JournalEntryWithLines> {
        JournalWorkflow::ensure_creatable(input.status)?;
        validate_description(&input.description)?;
        validate_lines(&input.lines)?;
        ensure_accounts_exist_in(txn, &input.lines).await?;
        FiscalRepository::assert_open_in(txn, input.entry_date).await?;

        if let Some(key) = origin.source_key()
            && find_by_source_in(txn, key).await?.is_some()
        {
            return Err(LedgerError::DuplicateSource(key.to_string()).into());
        }

        let number = next_entry_number_in(txn, input.entry_date.year()).await?;
        let now = chrono::Utc::now().into();
        let entry = journal_entries::ActiveModel {
            id: Set(Uuid::now_v7()),
            entry_number: Set(number.to_string()),
            entry_date: Set(input.entry_date),
            description: Set(input.description.clone()),
            reference: Set(input.reference.clone()),
            reference_type: Set(input.reference_type.clone()),
            status: Set(input.status.into()),
            is_auto_generated: Set(origin.is_auto_generated()),
            source_key: Set(origin.source_key().map(str::to_string)),
            created_by: Set(input.created_by),
            posted_at: Set((input.status == JournalStatus::Posted).then_some(now)),
            voided_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let entry = match entry.insert(txn).await {
            Ok(entry) => entry,
            Err(err) if is_unique_violation(&err) => {
                return Err(match origin.source_key() {
                    Some(key) => LedgerError::DuplicateSource(key.to_string()).into(),
                    None => err.into(),
                });
            }
            Err(err) => return Err(err.into()),
        };
        let lines = insert_lines_in(txn, entry.id, &input.lines).await?;

        info!(
            entry_id = %entry.id,
            entry_number = %entry.entry_number,
            status = %input.status,
            "journal entry created"
        );
        Ok(JournalEntryWithLines { entry, lines })
    }

    /// Replaces the header and lines of a DRAFT entry.
    ///
    /// Both the old and the new date must fall in OPEN periods. Moving the
    /// entry to another year gives it a number from that year's sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Entry not found or not DRAFT
    /// - The new content fails validation
    /// - Either date falls outside an OPEN period
    #[instrument(skip(self, input))]
    pub async fn update_draft(
        &self,
        entry_id: Uuid,
        input: UpdateDraftInput,
    ) -> RepositoryResult<JournalEntryWithLines> {
        let txn = self.db.begin().await?;

        let entry = lock_entry_in(&txn, entry_id).await?;
        JournalWorkflow::ensure_allowed(
            &entry.entry_number,
            entry.status.into(),
            JournalAction::Edit,
        )?;
        validate_description(&input.description)?;
        validate_lines(&input.lines)?;
        ensure_accounts_exist_in(&txn, &input.lines).await?;
        FiscalRepository::assert_open_in(&txn, entry.entry_date).await?;
        FiscalRepository::assert_open_in(&txn, input.entry_date).await?;

        let entry_number = if input.entry_date.year() == entry.entry_date.year() {
            entry.entry_number.clone()
        } else {
            next_entry_number_in(&txn, input.entry_date.year())
                .await?
                .to_string()
        };

        journal_lines::Entity::delete_many()
            .filter(journal_lines::Column::JournalEntryId.eq(entry_id))
            .exec(&txn)
            .await?;

        let mut active: journal_entries::ActiveModel = entry.into();
        active.entry_number = Set(entry_number);
        active.entry_date = Set(input.entry_date);
        active.description = Set(input.description);
        active.reference = Set(input.reference);
        active.reference_type = Set(input.reference_type);
        active.updated_at = Set(chrono::Utc::now().into());
        let entry = active.update(&txn).await?;
        let lines = insert_lines_in(&txn, entry_id, &input.lines).await?;

        txn.commit().await?;

        info!(entry_id = %entry.id, entry_number = %entry.entry_number, "draft updated");
        Ok(JournalEntryWithLines { entry, lines })
    }

    /// Posts a DRAFT entry.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Entry not found or not DRAFT
    /// - The stored lines no longer balance
    /// - The entry date falls outside an OPEN period
    #[instrument(skip(self))]
    pub async fn post(&self, entry_id: Uuid) -> RepositoryResult<JournalEntryWithLines> {
        let txn = self.db.begin().await?;

        let entry = lock_entry_in(&txn, entry_id).await?;
        JournalWorkflow::ensure_allowed(
            &entry.entry_number,
            entry.status.into(),
            JournalAction::Post,
        )?;
        let lines = load_lines_in(&txn, entry_id).await?;
        validate_lines(&to_line_inputs(&lines))?;
        FiscalRepository::assert_open_in(&txn, entry.entry_date).await?;

        let now = chrono::Utc::now().into();
        let mut active: journal_entries::ActiveModel = entry.into();
        active.status = Set(JournalStatus::Posted.into());
        active.posted_at = Set(Some(now));
        active.updated_at = Set(now);
        let entry = active.update(&txn).await?;

        txn.commit().await?;

        info!(entry_id = %entry.id, entry_number = %entry.entry_number, "journal entry posted");
        Ok(JournalEntryWithLines { entry, lines })
    }

    /// Voids a POSTED entry. Its lines stay for audit but stop counting.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Entry not found or not POSTED
    /// - The entry date falls outside an OPEN period
    #[instrument(skip(self))]
    pub async fn void(&self, entry_id: Uuid) -> RepositoryResult<journal_entries::Model> {
        let txn = self.db.begin().await?;

        let entry = lock_entry_in(&txn, entry_id).await?;
        JournalWorkflow::ensure_allowed(
            &entry.entry_number,
            entry.status.into(),
            JournalAction::Void,
        )?;
        FiscalRepository::assert_open_in(&txn, entry.entry_date).await?;

        let now = chrono::Utc::now().into();
        let mut active: journal_entries::ActiveModel = entry.into();
        active.status = Set(JournalStatus::Voided.into());
        active.voided_at = Set(Some(now));
        active.updated_at = Set(now);
        let entry = active.update(&txn).await?;

        txn.commit().await?;

        info!(entry_id = %entry.id, entry_number = %entry.entry_number, "journal entry voided");
        Ok(entry)
    }

    /// Creates the reversing entry of a POSTED entry, dated today.
    ///
    /// The original stays POSTED. An entry can be reversed once.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Entry not found or not POSTED
    /// - The entry was already reversed
    /// - Today falls outside an OPEN period
    #[instrument(skip(self))]
    pub async fn reverse(
        &self,
        entry_id: Uuid,
        status: JournalStatus,
    ) -> RepositoryResult<JournalEntryWithLines> {
        self.reverse_on(entry_id, chrono::Utc::now().date_naive(), status)
            .await
    }

    /// Creates the reversing entry of a POSTED entry on `reversal_date`.
    ///
    /// # Errors
    ///
    /// See [`Self::reverse`].
    #[instrument(skip(self))]
    pub async fn reverse_on(
        &self,
        entry_id: Uuid,
        reversal_date: NaiveDate,
        status: JournalStatus,
    ) -> RepositoryResult<JournalEntryWithLines> {
        let txn = self.db.begin().await?;

        let original = lock_entry_in(&txn, entry_id).await?;
        JournalWorkflow::ensure_allowed(
            &original.entry_number,
            original.status.into(),
            JournalAction::Reverse,
        )?;
        let original_lines = load_lines_in(&txn, entry_id).await?;
        let plan = ReversalService::plan(
            &original.entry_number,
            &original.description,
            &to_line_inputs(&original_lines),
        );

        if find_by_source_in(&txn, &plan.source_key).await?.is_some() {
            return Err(LedgerError::AlreadyReversed(original.entry_number).into());
        }

        let input = CreateJournalEntryInput {
            entry_date: reversal_date,
            description: plan.description,
            reference: Some(plan.reference),
            reference_type: Some(plan.reference_type.to_string()),
            lines: plan.lines,
            status,
            created_by: None,
        };
        let origin = EntryOrigin::Reversal {
            source_key: plan.source_key,
        };
        let reversal = match Self::create_entry_in(&txn, &input, &origin).await {
            Err(RepositoryError::Ledger(LedgerError::DuplicateSource(_))) => {
                return Err(LedgerError::AlreadyReversed(original.entry_number).into());
            }
            other => other?,
        };

        txn.commit().await?;

        info!(
            original = %original.entry_number,
            reversal = %reversal.entry.entry_number,
            "journal entry reversed"
        );
        Ok(reversal)
    }

    /// Deletes a DRAFT entry and its lines.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Entry not found or not DRAFT
    /// - The entry date falls outside an OPEN period
    #[instrument(skip(self))]
    pub async fn delete(&self, entry_id: Uuid) -> RepositoryResult<()> {
        let txn = self.db.begin().await?;

        let entry = lock_entry_in(&txn, entry_id).await?;
        JournalWorkflow::ensure_allowed(
            &entry.entry_number,
            entry.status.into(),
            JournalAction::Delete,
        )?;
        FiscalRepository::assert_open_in(&txn, entry.entry_date).await?;

        journal_lines::Entity::delete_many()
            .filter(journal_lines::Column::JournalEntryId.eq(entry_id))
            .exec(&txn)
            .await?;
        journal_entries::Entity::delete_by_id(entry_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        info!(entry_id = %entry_id, entry_number = %entry.entry_number, "draft deleted");
        Ok(())
    }

    /// Loads an entry with its lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry does not exist.
    pub async fn get_entry(&self, entry_id: Uuid) -> RepositoryResult<JournalEntryWithLines> {
        let entry = journal_entries::Entity::find_by_id(entry_id)
            .one(&self.db)
            .await?
            .ok_or(LedgerError::EntryNotFound(entry_id))?;
        let lines = load_lines_in(&self.db, entry_id).await?;
        Ok(JournalEntryWithLines { entry, lines })
    }

    /// Finds the system entry made for `source_key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_source(
        &self,
        source_key: &str,
    ) -> RepositoryResult<Option<journal_entries::Model>> {
        find_by_source_in(&self.db, source_key).await
    }
}

/// Finds the entry carrying `source_key` on any connection.
pub(crate) async fn find_by_source_in<C: ConnectionTrait>(
    conn: &C,
    source_key: &str,
) -> RepositoryResult<Option<journal_entries::Model>> {
    Ok(journal_entries::Entity::find()
        .filter(journal_entries::Column::SourceKey.eq(source_key))
        .one(conn)
        .await?)
}

/// Issues the next number of `year`, holding the sequence row lock.
async fn next_entry_number_in(
    txn: &DatabaseTransaction,
    year: i32,
) -> RepositoryResult<EntryNumber> {
    let now = chrono::Utc::now().into();

    journal_sequences::Entity::insert(journal_sequences::ActiveModel {
        year: Set(year),
        last_number: Set(0),
        updated_at: Set(now),
    })
    .on_conflict(
        OnConflict::column(journal_sequences::Column::Year)
            .do_nothing()
            .to_owned(),
    )
    .exec_without_returning(txn)
    .await?;

    let sequence = journal_sequences::Entity::find_by_id(year)
        .lock_exclusive()
        .one(txn)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("journal sequence for {year}")))?;

    let next = sequence.last_number + 1;
    let mut active: journal_sequences::ActiveModel = sequence.into();
    active.last_number = Set(next);
    active.updated_at = Set(now);
    active.update(txn).await?;

    Ok(EntryNumber::new(year, next))
}

async fn lock_entry_in(
    txn: &DatabaseTransaction,
    entry_id: Uuid,
) -> RepositoryResult<journal_entries::Model> {
    Ok(journal_entries::Entity::find_by_id(entry_id)
        .lock_exclusive()
        .one(txn)
        .await?
        .ok_or(LedgerError::EntryNotFound(entry_id))?)
}

async fn load_lines_in<C: ConnectionTrait>(
    conn: &C,
    entry_id: Uuid,
) -> RepositoryResult<Vec<journal_lines::Model>> {
    Ok(journal_lines::Entity::find()
        .filter(journal_lines::Column::JournalEntryId.eq(entry_id))
        .order_by_asc(journal_lines::Column::LineNumber)
        .all(conn)
        .await?)
}

async fn ensure_accounts_exist_in(
    txn: &DatabaseTransaction,
    lines: &[JournalLineInput],
) -> RepositoryResult<()> {
    let mut ids: Vec<Uuid> = lines.iter().map(|line| line.account_id).collect();
    ids.sort_unstable();
    ids.dedup();

    let found: Vec<Uuid> = accounts::Entity::find()
        .select_only()
        .column(accounts::Column::Id)
        .filter(accounts::Column::Id.is_in(ids.clone()))
        .into_tuple()
        .all(txn)
        .await?;

    match ids.into_iter().find(|id| !found.contains(id)) {
        Some(missing) => Err(LedgerError::AccountNotFound(missing).into()),
        None => Ok(()),
    }
}

async fn insert_lines_in(
    txn: &DatabaseTransaction,
    entry_id: Uuid,
    lines: &[JournalLineInput],
) -> RepositoryResult<Vec<journal_lines::Model>> {
    let now = chrono::Utc::now().into();
    let mut inserted = Vec::with_capacity(lines.len());
    for (line_number, line) in (1..).zip(lines) {
        let model = journal_lines::ActiveModel {
            id: Set(Uuid::now_v7()),
            journal_entry_id: Set(entry_id),
            line_number: Set(line_number),
            account_id: Set(line.account_id),
            debit: Set(line.debit),
            credit: Set(line.credit),
            description: Set(line.description.clone()),
            created_at: Set(now),
        };
        inserted.push(model.insert(txn).await?);
    }
    Ok(inserted)
}

/// Stored lines back as domain inputs.
pub(crate) fn to_line_inputs(lines: &[journal_lines::Model]) -> Vec<JournalLineInput> {
    lines
        .iter()
        .map(|line| JournalLineInput {
            account_id: line.account_id,
            debit: line.debit,
            credit: line.credit,
            description: line.description.clone(),
        })
        .collect()
}
