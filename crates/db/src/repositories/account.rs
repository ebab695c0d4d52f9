//! Account repository for chart of accounts database operations.

use neraca_core::account::{
    AccountCategory, AccountType, AccountUsage, ensure_category_matches, ensure_deletable,
    ensure_no_cycle, ensure_type_change_allowed, validate_account_fields,
};
use neraca_core::ledger::LedgerError;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, PaginatorTrait, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{accounts, journal_lines};
use crate::error::{RepositoryResult, is_unique_violation};

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Account code (unique).
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type; fixes the normal balance side.
    pub account_type: AccountType,
    /// Category; must belong to `account_type`.
    pub category: AccountCategory,
    /// Parent account ID for hierarchical structure.
    pub parent_id: Option<Uuid>,
    /// Whether payments may settle through this account.
    pub is_cash_account: bool,
}

/// Input for updating an account. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountInput {
    /// Account code.
    pub code: Option<String>,
    /// Account name.
    pub name: Option<String>,
    /// Account type (only if the account has no journal lines).
    pub account_type: Option<AccountType>,
    /// Category.
    pub category: Option<AccountCategory>,
    /// Parent account ID; `Some(None)` moves the account to the root.
    pub parent_id: Option<Option<Uuid>>,
    /// Cash account flag.
    pub is_cash_account: Option<bool>,
}

/// Account repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new account with validation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Code or name is blank
    /// - Category does not belong to the account type
    /// - Account code already exists
    /// - Parent account does not exist
    pub async fn create_account(
        &self,
        input: CreateAccountInput,
    ) -> RepositoryResult<accounts::Model> {
        validate_account_fields(&input.code, &input.name)?;
        ensure_category_matches(input.account_type, input.category)?;

        if find_by_code_in(&self.db, &input.code).await?.is_some() {
            return Err(LedgerError::DuplicateAccountCode(input.code).into());
        }

        if let Some(parent_id) = input.parent_id
            && accounts::Entity::find_by_id(parent_id)
                .one(&self.db)
                .await?
                .is_none()
        {
            return Err(LedgerError::AccountNotFound(parent_id).into());
        }

        let now = chrono::Utc::now().into();
        let account = accounts::ActiveModel {
            id: Set(Uuid::now_v7()),
            code: Set(input.code.clone()),
            name: Set(input.name),
            account_type: Set(input.account_type.into()),
            category: Set(input.category.into()),
            parent_id: Set(input.parent_id),
            is_cash_account: Set(input.is_cash_account),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let account = match account.insert(&self.db).await {
            Ok(account) => account,
            Err(err) if is_unique_violation(&err) => {
                return Err(LedgerError::DuplicateAccountCode(input.code).into());
            }
            Err(err) => return Err(err.into()),
        };

        info!(account_id = %account.id, code = %account.code, "account created");
        Ok(account)
    }

    /// Finds an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<accounts::Model>> {
        Ok(accounts::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Finds an account by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_code(&self, code: &str) -> RepositoryResult<Option<accounts::Model>> {
        find_by_code_in(&self.db, code).await
    }

    /// Updates an account with validation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Account not found
    /// - Changing the type of an account that has journal lines
    /// - Category does not belong to the resulting type
    /// - New code already exists
    /// - New parent is missing or is the account itself or one of its descendants
    pub async fn update_account(
        &self,
        id: Uuid,
        input: UpdateAccountInput,
    ) -> RepositoryResult<accounts::Model> {
        let txn = self.db.begin().await?;

        let account = accounts::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(LedgerError::AccountNotFound(id))?;

        let current_type = AccountType::from(account.account_type);
        let new_type = input.account_type.unwrap_or(current_type);
        let new_category = input
            .category
            .unwrap_or_else(|| account.category.into());
        ensure_category_matches(new_type, new_category)?;

        if new_type != current_type {
            let line_count = count_lines_in(&txn, id).await?;
            ensure_type_change_allowed(&account.code, current_type, new_type, line_count)?;
        }

        if let Some(new_code) = &input.code
            && *new_code != account.code
        {
            validate_account_fields(new_code, &account.name)?;
            if find_by_code_in(&txn, new_code).await?.is_some() {
                return Err(LedgerError::DuplicateAccountCode(new_code.clone()).into());
            }
        }
        if let Some(name) = &input.name {
            validate_account_fields(&account.code, name)?;
        }

        if let Some(Some(parent_id)) = input.parent_id {
            let chain = ancestor_chain_in(&txn, parent_id).await?;
            ensure_no_cycle(id, &chain)?;
        }

        let mut active: accounts::ActiveModel = account.into();
        if let Some(code) = input.code {
            active.code = Set(code);
        }
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        active.account_type = Set(new_type.into());
        active.category = Set(new_category.into());
        if let Some(parent_id) = input.parent_id {
            active.parent_id = Set(parent_id);
        }
        if let Some(is_cash_account) = input.is_cash_account {
            active.is_cash_account = Set(is_cash_account);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        info!(account_id = %updated.id, code = %updated.code, "account updated");
        Ok(updated)
    }

    /// Deletes an account.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Account not found
    /// - Account is referenced by journal lines
    /// - Account has child accounts
    pub async fn delete_account(&self, id: Uuid) -> RepositoryResult<()> {
        let txn = self.db.begin().await?;

        let account = accounts::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(LedgerError::AccountNotFound(id))?;

        let usage = AccountUsage {
            line_count: count_lines_in(&txn, id).await?,
            child_count: accounts::Entity::find()
                .filter(accounts::Column::ParentId.eq(id))
                .count(&txn)
                .await?,
        };
        ensure_deletable(&account.code, usage)?;

        accounts::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        info!(account_id = %id, code = %account.code, "account deleted");
        Ok(())
    }
}

/// Finds an account by code on any connection.
pub(crate) async fn find_by_code_in<C: ConnectionTrait>(
    conn: &C,
    code: &str,
) -> RepositoryResult<Option<accounts::Model>> {
    Ok(accounts::Entity::find()
        .filter(accounts::Column::Code.eq(code))
        .one(conn)
        .await?)
}

async fn count_lines_in(txn: &DatabaseTransaction, account_id: Uuid) -> RepositoryResult<u64> {
    Ok(journal_lines::Entity::find()
        .filter(journal_lines::Column::AccountId.eq(account_id))
        .count(txn)
        .await?)
}

/// `start` followed by its ancestors up to the root.
async fn ancestor_chain_in(
    txn: &DatabaseTransaction,
    start: Uuid,
) -> RepositoryResult<Vec<Uuid>> {
    let mut chain = Vec::new();
    let mut cursor = Some(start);
    while let Some(current) = cursor {
        // A pre-existing loop would otherwise spin forever.
        if chain.contains(&current) {
            break;
        }
        let node = accounts::Entity::find_by_id(current)
            .one(txn)
            .await?
            .ok_or(LedgerError::AccountNotFound(current))?;
        chain.push(current);
        cursor = node.parent_id;
    }
    Ok(chain)
}
