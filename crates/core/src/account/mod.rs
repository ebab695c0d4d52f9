//! Chart of accounts.
//!
//! Accounts form a tree. Each has a type that fixes its normal balance side
//! and a category that must belong to that type.

pub mod rules;
pub mod types;

pub use rules::{
    AccountUsage, ensure_category_matches, ensure_deletable, ensure_no_cycle,
    ensure_type_change_allowed, validate_account_fields,
};
pub use types::{AccountCategory, AccountType, NormalBalance};
