//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration. Tables are declared with
//! the schema builder so the same migrations run on PostgreSQL and SQLite.

pub use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

mod m20261019_000001_ledger;
mod m20261019_000002_inventory;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261019_000001_ledger::Migration),
            Box::new(m20261019_000002_inventory::Migration),
        ]
    }
}

/// A `NUMERIC(20, scale)` column on PostgreSQL.
///
/// SQLite caps declared decimal precision at 16 and stores the value as
/// `REAL` regardless, so it gets an unsized decimal column instead.
pub(crate) fn decimal(column: impl IntoIden, backend: DatabaseBackend, scale: u32) -> ColumnDef {
    let mut def = ColumnDef::new(column);
    if backend == DatabaseBackend::Sqlite {
        def.decimal();
    } else {
        def.decimal_len(20, scale);
    }
    def
}
