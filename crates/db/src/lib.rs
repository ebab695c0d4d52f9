//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Transactional repositories for the ledger and inventory
//! - Database migrations
//!
//! Every mutating operation runs inside one database transaction. Functions
//! ending in `_in` take an open transaction so callers can compose several
//! operations into a single commit.

pub mod entities;
pub mod error;
pub mod migration;
pub mod repositories;

pub use error::{RepositoryError, RepositoryResult};
pub use repositories::{
    AccountRepository, AutoJournalRepository, FiscalRepository, InventoryRepository,
    JournalRepository, LedgerRepository, OpnameRepository, ReconciliationRepository,
    ReservationRepository, ShipmentRepository,
};

use std::time::Duration;

use neraca_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Establishes a pooled connection using the application's database settings.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    Database::connect(options).await
}
