//! Guards for creating, moving, retyping, and deleting accounts.

use uuid::Uuid;

use super::types::{AccountCategory, AccountType};
use crate::ledger::LedgerError;

/// How much an account is referenced elsewhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountUsage {
    /// Journal lines (any status) pointing at the account.
    pub line_count: u64,
    /// Direct child accounts.
    pub child_count: u64,
}

/// Rejects blank codes and names, and codes containing whitespace.
pub fn validate_account_fields(code: &str, name: &str) -> Result<(), LedgerError> {
    if code.trim().is_empty() {
        return Err(LedgerError::BlankField("account code"));
    }
    if code.chars().any(char::is_whitespace) {
        return Err(LedgerError::InvalidAccountCode(code.to_string()));
    }
    if name.trim().is_empty() {
        return Err(LedgerError::BlankField("account name"));
    }
    Ok(())
}

/// A category must belong to the account's type.
pub fn ensure_category_matches(
    account_type: AccountType,
    category: AccountCategory,
) -> Result<(), LedgerError> {
    if category.account_type() == account_type {
        Ok(())
    } else {
        Err(LedgerError::CategoryMismatch {
            category,
            account_type,
        })
    }
}

/// An account referenced by journal lines or owning children cannot be deleted.
pub fn ensure_deletable(code: &str, usage: AccountUsage) -> Result<(), LedgerError> {
    if usage.line_count > 0 {
        return Err(LedgerError::AccountInUse {
            code: code.to_string(),
            line_count: usage.line_count,
        });
    }
    if usage.child_count > 0 {
        return Err(LedgerError::AccountHasChildren {
            code: code.to_string(),
            child_count: usage.child_count,
        });
    }
    Ok(())
}

/// The type of an account with journal lines is frozen.
pub fn ensure_type_change_allowed(
    code: &str,
    current: AccountType,
    requested: AccountType,
    line_count: u64,
) -> Result<(), LedgerError> {
    if current != requested && line_count > 0 {
        return Err(LedgerError::AccountTypeChangeNotAllowed(code.to_string()));
    }
    Ok(())
}

/// Rejects a re-parenting that would make `account_id` its own ancestor.
///
/// `parent_chain` is the new parent followed by its ancestors up to the root.
pub fn ensure_no_cycle(account_id: Uuid, parent_chain: &[Uuid]) -> Result<(), LedgerError> {
    if parent_chain.contains(&account_id) {
        return Err(LedgerError::CyclicHierarchy(account_id));
    }
    Ok(())
}
