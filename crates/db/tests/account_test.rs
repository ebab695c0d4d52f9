//! Integration tests for the chart of accounts.

mod common;

use neraca_core::account::{AccountCategory, AccountType};
use neraca_core::ledger::{JournalStatus, LedgerError};
use neraca_db::RepositoryError;
use neraca_db::entities::sea_orm_active_enums::AccountType as StoredType;
use neraca_db::repositories::{
    AccountRepository, CreateAccountInput, JournalRepository, UpdateAccountInput,
};
use rust_decimal_macros::dec;
use uuid::Uuid;

use common::{date, open_period_of, seed_chart, setup, simple_entry};

fn account(code: &str, category: AccountCategory, parent_id: Option<Uuid>) -> CreateAccountInput {
    CreateAccountInput {
        code: code.to_string(),
        name: format!("Account {code}"),
        account_type: category.account_type(),
        category,
        parent_id,
        is_cash_account: false,
    }
}

#[tokio::test]
async fn test_create_and_find_account() {
    let db = setup().await;
    let repo = AccountRepository::new(db);

    let created = repo
        .create_account(account("1510", AccountCategory::FixedAsset, None))
        .await
        .unwrap();
    assert_eq!(created.account_type, StoredType::Asset);

    let by_code = repo.find_by_code("1510").await.unwrap().unwrap();
    assert_eq!(by_code.id, created.id);
    assert!(repo.find_by_id(Uuid::now_v7()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_code_is_rejected() {
    let db = setup().await;
    let repo = AccountRepository::new(db);
    repo.create_account(account("2200", AccountCategory::CurrentLiability, None))
        .await
        .unwrap();

    let err = repo
        .create_account(account("2200", AccountCategory::LongTermLiability, None))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Ledger(LedgerError::DuplicateAccountCode(_))));
}

#[tokio::test]
async fn test_category_must_match_type() {
    let db = setup().await;
    let repo = AccountRepository::new(db);

    let mut input = account("4200", AccountCategory::OtherRevenue, None);
    input.account_type = AccountType::Expense;
    let err = repo.create_account(input).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Ledger(LedgerError::CategoryMismatch { .. })));
}

#[tokio::test]
async fn test_parent_cycle_is_rejected() {
    let db = setup().await;
    let repo = AccountRepository::new(db);

    let root = repo
        .create_account(account("1000", AccountCategory::CurrentAsset, None))
        .await
        .unwrap();
    let child = repo
        .create_account(account("1010", AccountCategory::CurrentAsset, Some(root.id)))
        .await
        .unwrap();
    let grandchild = repo
        .create_account(account("1011", AccountCategory::CurrentAsset, Some(child.id)))
        .await
        .unwrap();

    let err = repo
        .update_account(
            root.id,
            UpdateAccountInput {
                parent_id: Some(Some(grandchild.id)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Ledger(LedgerError::CyclicHierarchy(_))));

    let moved = repo
        .update_account(
            grandchild.id,
            UpdateAccountInput {
                parent_id: Some(None),
                name: Some("Petty Cash".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.parent_id, None);
    assert_eq!(moved.name, "Petty Cash");
}

#[tokio::test]
async fn test_used_account_cannot_be_deleted_or_retyped() {
    let db = setup().await;
    let chart = seed_chart(&db).await;
    let day = date(2026, 8, 3);
    open_period_of(&db, day).await;

    JournalRepository::new(db.clone())
        .create_entry(simple_entry(day, chart.cash, chart.equity, dec!(10), JournalStatus::Draft))
        .await
        .unwrap();

    let repo = AccountRepository::new(db.clone());
    let err = repo.delete_account(chart.cash).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Ledger(LedgerError::AccountInUse { .. })));

    let err = repo
        .update_account(
            chart.equity,
            UpdateAccountInput {
                account_type: Some(AccountType::Liability),
                category: Some(AccountCategory::CurrentLiability),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::Ledger(LedgerError::AccountTypeChangeNotAllowed(_))
    ));

    // An unused account can change type and be deleted.
    let retyped = repo
        .update_account(
            chart.inventory_gain,
            UpdateAccountInput {
                account_type: Some(AccountType::Expense),
                category: Some(AccountCategory::OtherExpense),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(retyped.account_type, StoredType::Expense);
    repo.delete_account(chart.inventory_gain).await.unwrap();
    assert!(repo.find_by_code("4900").await.unwrap().is_none());
}

#[tokio::test]
async fn test_parent_with_children_cannot_be_deleted() {
    let db = setup().await;
    let repo = AccountRepository::new(db);

    let parent = repo
        .create_account(account("6000", AccountCategory::OperatingExpense, None))
        .await
        .unwrap();
    repo.create_account(account("6010", AccountCategory::OperatingExpense, Some(parent.id)))
        .await
        .unwrap();

    let err = repo.delete_account(parent.id).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Ledger(LedgerError::AccountHasChildren { .. })));
}
