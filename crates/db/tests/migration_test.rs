//! Integration tests for the schema migrations.

mod common;

use neraca_core::inventory::{MovementInput, StockKey};
use neraca_db::entities::inventories;
use neraca_db::migration::{Migrator, MigratorTrait};
use neraca_db::repositories::InventoryRepository;
use neraca_shared::config::NegativeStockPolicy;
use neraca_shared::types::{LocationId, ProductVariantId};
use rust_decimal_macros::dec;
use sea_orm::{EntityTrait, PaginatorTrait};

use common::setup;

#[tokio::test]
async fn test_decimal_columns_keep_fractions() {
    let db = setup().await;
    let inventory = InventoryRepository::new(db.clone(), NegativeStockPolicy::Block);
    let key = StockKey::new(LocationId::new(), ProductVariantId::new());

    inventory
        .record_movement(MovementInput::receipt(
            key.product_variant_id,
            key.location_id,
            dec!(12.25),
            dec!(3.5),
            "PO-1",
        ))
        .await
        .unwrap();

    let level = inventory.get_stock_level(key).await.unwrap();
    assert_eq!(level.quantity, dec!(12.25));
    assert_eq!(level.average_cost, dec!(3.5));
}

#[tokio::test]
async fn test_migrations_roll_back_and_reapply() {
    let db = setup().await;

    Migrator::down(&db, None).await.unwrap();
    assert!(inventories::Entity::find().count(&db).await.is_err());

    Migrator::up(&db, None).await.unwrap();
    assert_eq!(inventories::Entity::find().count(&db).await.unwrap(), 0);
}
