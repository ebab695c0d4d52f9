//! Shared setup for the database integration tests.
//!
//! Each test gets its own in-memory SQLite database with the full schema.
//! Row-lock behaviour is covered against PostgreSQL in `concurrent_test.rs`.

#![allow(dead_code)]

use chrono::{Datelike, NaiveDate, Utc};
use neraca_core::account::AccountCategory;
use neraca_core::ledger::{CreateJournalEntryInput, JournalLineInput, JournalStatus};
use neraca_db::migration::{Migrator, MigratorTrait};
use neraca_db::repositories::{AccountRepository, CreateAccountInput, FiscalRepository};
use rust_decimal::Decimal;
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

/// Connects to a fresh in-memory database and runs every migration.
pub async fn setup() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

/// Ids of the seeded chart of accounts.
#[derive(Debug, Clone, Copy)]
pub struct Chart {
    pub cash: Uuid,
    pub receivable: Uuid,
    pub inventory: Uuid,
    pub payable: Uuid,
    pub equity: Uuid,
    pub revenue: Uuid,
    pub inventory_gain: Uuid,
    pub cogs: Uuid,
    pub inventory_loss: Uuid,
}

/// Installs the accounts the default account mapping points at.
pub async fn seed_chart(db: &DatabaseConnection) -> Chart {
    let repo = AccountRepository::new(db.clone());
    let create = async |code: &str, name: &str, category: AccountCategory, cash: bool| {
        repo.create_account(CreateAccountInput {
            code: code.to_string(),
            name: name.to_string(),
            account_type: category.account_type(),
            category,
            parent_id: None,
            is_cash_account: cash,
        })
        .await
        .expect("Failed to create account")
        .id
    };

    Chart {
        cash: create("1100", "Cash", AccountCategory::CurrentAsset, true).await,
        receivable: create("1200", "Accounts Receivable", AccountCategory::CurrentAsset, false)
            .await,
        inventory: create("1300", "Inventory", AccountCategory::CurrentAsset, false).await,
        payable: create("2100", "Accounts Payable", AccountCategory::CurrentLiability, false)
            .await,
        equity: create("3100", "Owner's Capital", AccountCategory::Equity, false).await,
        revenue: create("4100", "Sales Revenue", AccountCategory::OperatingRevenue, false).await,
        inventory_gain: create("4900", "Inventory Gain", AccountCategory::OtherRevenue, false)
            .await,
        cogs: create("5100", "Cost of Goods Sold", AccountCategory::CostOfGoodsSold, false).await,
        inventory_loss: create("6900", "Inventory Loss", AccountCategory::OtherExpense, false)
            .await,
    }
}

/// Opens the period containing `date`.
pub async fn open_period_of(db: &DatabaseConnection, date: NaiveDate) -> Uuid {
    FiscalRepository::new(db.clone())
        .open_period(date.year(), date.month())
        .await
        .expect("Failed to open period")
        .id
}

/// Today's date, used by operations that journal on the current day.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// A two-line entry moving `amount` from `credit` to `debit`.
pub fn simple_entry(
    entry_date: NaiveDate,
    debit: Uuid,
    credit: Uuid,
    amount: Decimal,
    status: JournalStatus,
) -> CreateJournalEntryInput {
    CreateJournalEntryInput {
        entry_date,
        description: "Test entry".to_string(),
        reference: None,
        reference_type: None,
        lines: vec![
            JournalLineInput::debit(debit, amount),
            JournalLineInput::credit(credit, amount),
        ],
        status,
        created_by: None,
    }
}

