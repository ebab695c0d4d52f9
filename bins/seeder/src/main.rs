//! Database seeder for Neraca.
//!
//! Installs the chart of accounts the automatic journals post to and opens
//! the twelve monthly periods of a year. Safe to run repeatedly.
//!
//! Usage: seeder [YEAR]   (defaults to the current year)

use anyhow::Context;
use chrono::{Datelike, Utc};
use neraca_core::account::AccountCategory;
use neraca_core::ledger::LedgerError;
use neraca_db::repositories::{AccountRepository, CreateAccountInput, FiscalRepository};
use neraca_db::{RepositoryError, connect_with};
use neraca_shared::AppConfig;
use neraca_shared::config::AccountMappingConfig;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Code of the owner's equity account; no automatic journal posts to it.
const OWNERS_CAPITAL: &str = "3100";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "neraca=debug,seeder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let year = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<i32>()
            .with_context(|| format!("invalid year argument: {arg}"))?,
        None => Utc::now().year(),
    };

    let config = AppConfig::load().context("Failed to load configuration")?;
    let db = connect_with(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!("Connected to database");

    seed_chart_of_accounts(&AccountRepository::new(db.clone()), &config.accounts).await?;
    seed_fiscal_periods(&FiscalRepository::new(db), year).await?;

    info!("Seeding complete");
    Ok(())
}

/// Code, name, category and cash flag of one seeded account.
type SeedAccount = (String, &'static str, AccountCategory, bool);

/// The accounts every installation starts with.
fn chart_of_accounts(mapping: &AccountMappingConfig) -> Vec<SeedAccount> {
    use AccountCategory::{
        CostOfGoodsSold, CurrentAsset, CurrentLiability, Equity, OperatingRevenue, OtherExpense,
        OtherRevenue,
    };

    vec![
        (mapping.cash.clone(), "Cash", CurrentAsset, true),
        (mapping.accounts_receivable.clone(), "Accounts Receivable", CurrentAsset, false),
        (mapping.inventory.clone(), "Merchandise Inventory", CurrentAsset, false),
        (mapping.accounts_payable.clone(), "Accounts Payable", CurrentLiability, false),
        (OWNERS_CAPITAL.to_string(), "Owner's Capital", Equity, false),
        (mapping.sales_revenue.clone(), "Sales Revenue", OperatingRevenue, false),
        (mapping.inventory_gain.clone(), "Inventory Gain", OtherRevenue, false),
        (mapping.cost_of_goods_sold.clone(), "Cost of Goods Sold", CostOfGoodsSold, false),
        (mapping.inventory_loss.clone(), "Inventory Loss", OtherExpense, false),
    ]
}

async fn seed_chart_of_accounts(
    repo: &AccountRepository,
    mapping: &AccountMappingConfig,
) -> anyhow::Result<()> {
    for (code, name, category, is_cash_account) in chart_of_accounts(mapping) {
        if repo.find_by_code(&code).await?.is_some() {
            info!(%code, "account already exists, skipping");
            continue;
        }
        let account = repo
            .create_account(CreateAccountInput {
                code,
                name: name.to_string(),
                account_type: category.account_type(),
                category,
                parent_id: None,
                is_cash_account,
            })
            .await
            .with_context(|| format!("Failed to create account {name}"))?;
        info!(code = %account.code, name = %account.name, "created account");
    }
    Ok(())
}

async fn seed_fiscal_periods(repo: &FiscalRepository, year: i32) -> anyhow::Result<()> {
    for month in 1..=12 {
        match repo.open_period(year, month).await {
            Ok(period) => info!(name = %period.name, "period open"),
            Err(RepositoryError::Ledger(LedgerError::PeriodAlreadyClosed(name))) => {
                warn!(%name, "period already closed, leaving it closed");
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to open period {year}-{month:02}"));
            }
        }
    }
    Ok(())
}
