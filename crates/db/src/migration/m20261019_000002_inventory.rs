//! Inventory schema: stock levels, movements, reservations, stock counts.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

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
                    .table(Inventories::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Inventories::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Inventories::LocationId).uuid().not_null())
                    .col(ColumnDef::new(Inventories::ProductVariantId).uuid().not_null())
                    .col(quantity(Inventories::Quantity, backend))
                    .col(quantity(Inventories::AverageCost, backend))
                    .col(timestamp(Inventories::CreatedAt))
                    .col(timestamp(Inventories::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("uq_inventories_location_variant")
                    .table(Inventories::Table)
                    .col(Inventories::LocationId)
                    .col(Inventories::ProductVariantId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StockMovements::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(StockMovements::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(StockMovements::MovementType).string_len(20).not_null())
                    .col(ColumnDef::new(StockMovements::ProductVariantId).uuid().not_null())
                    .col(ColumnDef::new(StockMovements::FromLocationId).uuid().null())
                    .col(ColumnDef::new(StockMovements::ToLocationId).uuid().null())
                    .col(
                        quantity(StockMovements::Quantity, backend)
                            .check(Expr::col(StockMovements::Quantity).gt(0))
                            .to_owned(),
                    )
                    .col(quantity(StockMovements::Cost, backend))
                    .col(ColumnDef::new(StockMovements::Reference).string_len(100).not_null())
                    .col(timestamp(StockMovements::CreatedAt))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_stock_movements_variant")
                    .table(StockMovements::Table)
                    .col(StockMovements::ProductVariantId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_stock_movements_reference")
                    .table(StockMovements::Table)
                    .col(StockMovements::Reference)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StockReservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StockReservations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StockReservations::ProductVariantId).uuid().not_null())
                    .col(ColumnDef::new(StockReservations::LocationId).uuid().not_null())
                    .col(quantity(StockReservations::Quantity, backend))
                    .col(ColumnDef::new(StockReservations::ReservedFor).string_len(20).not_null())
                    .col(ColumnDef::new(StockReservations::ReferenceId).string_len(100).not_null())
                    .col(ColumnDef::new(StockReservations::Status).string_len(20).not_null())
                    .col(
                        ColumnDef::new(StockReservations::ExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(timestamp(StockReservations::CreatedAt))
                    .col(timestamp(StockReservations::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_stock_reservations_stock_status")
                    .table(StockReservations::Table)
                    .col(StockReservations::LocationId)
                    .col(StockReservations::ProductVariantId)
                    .col(StockReservations::Status)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_stock_reservations_reference")
                    .table(StockReservations::Table)
                    .col(StockReservations::ReferenceId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StockOpnames::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(StockOpnames::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(StockOpnames::LocationId).uuid().not_null())
                    .col(ColumnDef::new(StockOpnames::Status).string_len(20).not_null())
                    .col(ColumnDef::new(StockOpnames::Notes).text().null())
                    .col(timestamp(StockOpnames::CreatedAt))
                    .col(
                        ColumnDef::new(StockOpnames::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_stock_opnames_location_status")
                    .table(StockOpnames::Table)
                    .col(StockOpnames::LocationId)
                    .col(StockOpnames::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StockOpnameItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StockOpnameItems::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StockOpnameItems::StockOpnameId).uuid().not_null())
                    .col(ColumnDef::new(StockOpnameItems::ProductVariantId).uuid().not_null())
                    .col(quantity(StockOpnameItems::SystemQuantity, backend))
                    .col(decimal(StockOpnameItems::CountedQuantity, backend, 4).null())
                    .col(ColumnDef::new(StockOpnameItems::Notes).text().null())
                    .col(timestamp(StockOpnameItems::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_opname_items_session")
                            .from(StockOpnameItems::Table, StockOpnameItems::StockOpnameId)
                            .to(StockOpnames::Table, StockOpnames::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("uq_stock_opname_items_session_variant")
                    .table(StockOpnameItems::Table)
                    .col(StockOpnameItems::StockOpnameId)
                    .col(StockOpnameItems::ProductVariantId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            StockOpnameItems::Table.into_iden(),
            StockOpnames::Table.into_iden(),
            StockReservations::Table.into_iden(),
            StockMovements::Table.into_iden(),
            Inventories::Table.into_iden(),
        ] {
            manager
                .drop_table(Table::drop().table(table).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}

fn quantity(column: impl IntoIden, backend: DatabaseBackend) -> ColumnDef {
    decimal(column, backend, 4).not_null().default(0).to_owned()
}

fn timestamp(column: impl IntoIden) -> ColumnDef {
    ColumnDef::new(column)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

#[derive(DeriveIden)]
enum Inventories {
    Table,
    Id,
    LocationId,
    ProductVariantId,
    Quantity,
    AverageCost,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StockMovements {
    Table,
    Id,
    MovementType,
    ProductVariantId,
    FromLocationId,
    ToLocationId,
    Quantity,
    Cost,
    Reference,
    CreatedAt,
}

#[derive(DeriveIden)]
enum StockReservations {
    Table,
    Id,
    ProductVariantId,
    LocationId,
    Quantity,
    ReservedFor,
    ReferenceId,
    Status,
    ExpiresAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StockOpnames {
    Table,
    Id,
    LocationId,
    Status,
    Notes,
    CreatedAt,
    CompletedAt,
}

#[derive(DeriveIden)]
enum StockOpnameItems {
    Table,
    Id,
    StockOpnameId,
    ProductVariantId,
    SystemQuantity,
    CountedQuantity,
    Notes,
    UpdatedAt,
}
