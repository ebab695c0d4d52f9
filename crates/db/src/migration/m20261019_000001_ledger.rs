//! Ledger schema: chart of accounts, fiscal periods, journals.

use sea_orm_migration::prelude::*;

use super::decimal;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Accounts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Accounts::Code).string_len(32).not_null())
                    .col(ColumnDef::new(Accounts::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Accounts::AccountType).string_len(20).not_null())
                    .col(ColumnDef::new(Accounts::Category).string_len(32).not_null())
                    .col(ColumnDef::new(Accounts::ParentId).uuid().null())
                    .col(
                        ColumnDef::new(Accounts::IsCashAccount)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(timestamp(Accounts::CreatedAt))
                    .col(timestamp(Accounts::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_accounts_parent")
                            .from(Accounts::Table, Accounts::ParentId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("uq_accounts_code")
                    .table(Accounts::Table)
                    .col(Accounts::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FiscalPeriods::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(FiscalPeriods::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(FiscalPeriods::Year).integer().not_null())
                    .col(
                        ColumnDef::new(FiscalPeriods::Month)
                            .integer()
                            .not_null()
                            .check(
                                Expr::col(FiscalPeriods::Month)
                                    .gte(1)
                                    .and(Expr::col(FiscalPeriods::Month).lte(12)),
                            ),
                    )
                    .col(ColumnDef::new(FiscalPeriods::Name).string_len(50).not_null())
                    .col(ColumnDef::new(FiscalPeriods::StartDate).date().not_null())
                    .col(ColumnDef::new(FiscalPeriods::EndDate).date().not_null())
                    .col(ColumnDef::new(FiscalPeriods::Status).string_len(20).not_null())
                    .col(
                        ColumnDef::new(FiscalPeriods::ClosedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(timestamp(FiscalPeriods::CreatedAt))
                    .col(timestamp(FiscalPeriods::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("uq_fiscal_periods_year_month")
                    .table(FiscalPeriods::Table)
                    .col(FiscalPeriods::Year)
                    .col(FiscalPeriods::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_fiscal_periods_dates")
                    .table(FiscalPeriods::Table)
                    .col(FiscalPeriods::StartDate)
                    .col(FiscalPeriods::EndDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(JournalSequences::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JournalSequences::Year)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(JournalSequences::LastNumber)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(timestamp(JournalSequences::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(JournalEntries::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(JournalEntries::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(JournalEntries::EntryNumber).string_len(32).not_null())
                    .col(ColumnDef::new(JournalEntries::EntryDate).date().not_null())
                    .col(ColumnDef::new(JournalEntries::Description).text().not_null())
                    .col(ColumnDef::new(JournalEntries::Reference).string_len(100).null())
                    .col(ColumnDef::new(JournalEntries::ReferenceType).string_len(50).null())
                    .col(ColumnDef::new(JournalEntries::Status).string_len(20).not_null())
                    .col(
                        ColumnDef::new(JournalEntries::IsAutoGenerated)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(JournalEntries::SourceKey).string_len(160).null())
                    .col(ColumnDef::new(JournalEntries::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(JournalEntries::PostedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(JournalEntries::VoidedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(timestamp(JournalEntries::CreatedAt))
                    .col(timestamp(JournalEntries::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("uq_journal_entries_number")
                    .table(JournalEntries::Table)
                    .col(JournalEntries::EntryNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;
        // NULLs are distinct, so manual entries never collide.
        manager
            .create_index(
                Index::create()
                    .name("uq_journal_entries_source_key")
                    .table(JournalEntries::Table)
                    .col(JournalEntries::SourceKey)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_journal_entries_date_status")
                    .table(JournalEntries::Table)
                    .col(JournalEntries::EntryDate)
                    .col(JournalEntries::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(JournalLines::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(JournalLines::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(JournalLines::JournalEntryId).uuid().not_null())
                    .col(ColumnDef::new(JournalLines::LineNumber).integer().not_null())
                    .col(ColumnDef::new(JournalLines::AccountId).uuid().not_null())
                    .col(
                        decimal(JournalLines::Debit, backend, 2)
                            .not_null()
                            .default(0)
                            .check(Expr::col(JournalLines::Debit).gte(0)),
                    )
                    .col(
                        decimal(JournalLines::Credit, backend, 2)
                            .not_null()
                            .default(0)
                            .check(Expr::col(JournalLines::Credit).gte(0)),
                    )
                    .col(ColumnDef::new(JournalLines::Description).text().null())
                    .col(timestamp(JournalLines::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_journal_lines_entry")
                            .from(JournalLines::Table, JournalLines::JournalEntryId)
                            .to(JournalEntries::Table, JournalEntries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_journal_lines_account")
                            .from(JournalLines::Table, JournalLines::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_journal_lines_account")
                    .table(JournalLines::Table)
                    .col(JournalLines::AccountId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_journal_lines_entry")
                    .table(JournalLines::Table)
                    .col(JournalLines::JournalEntryId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            JournalLines::Table.into_iden(),
            JournalEntries::Table.into_iden(),
            JournalSequences::Table.into_iden(),
            FiscalPeriods::Table.into_iden(),
            Accounts::Table.into_iden(),
        ] {
            manager
                .drop_table(Table::drop().table(table).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}

fn timestamp(column: impl IntoIden) -> ColumnDef {
    ColumnDef::new(column)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
    Code,
    Name,
    AccountType,
    Category,
    ParentId,
    IsCashAccount,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum FiscalPeriods {
    Table,
    Id,
    Year,
    Month,
    Name,
    StartDate,
    EndDate,
    Status,
    ClosedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum JournalSequences {
    Table,
    Year,
    LastNumber,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum JournalEntries {
    Table,
    Id,
    EntryNumber,
    EntryDate,
    Description,
    Reference,
    ReferenceType,
    Status,
    IsAutoGenerated,
    SourceKey,
    CreatedBy,
    PostedAt,
    VoidedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum JournalLines {
    Table,
    Id,
    JournalEntryId,
    LineNumber,
    AccountId,
    Debit,
    Credit,
    Description,
    CreatedAt,
}
