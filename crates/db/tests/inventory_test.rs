//! Integration tests for stock movements and availability gating.

mod common;

use chrono::{Duration, Utc};
use neraca_core::inventory::{InventoryError, MovementInput, MovementType, StockKey};
use neraca_core::reservation::{ReserveInput, ReservedFor};
use neraca_db::RepositoryError;
use neraca_db::entities::sea_orm_active_enums::MovementType as StoredMovementType;
use neraca_db::entities::stock_movements;
use neraca_db::repositories::{InventoryRepository, ReservationRepository};
use neraca_shared::config::NegativeStockPolicy;
use neraca_shared::types::{LocationId, ProductVariantId};
use rust_decimal_macros::dec;
use sea_orm::{EntityTrait, PaginatorTrait};

use common::setup;

#[tokio::test]
async fn test_receipts_move_the_average_cost() {
    let db = setup().await;
    let repo = InventoryRepository::new(db, NegativeStockPolicy::Block);
    let warehouse = LocationId::new();
    let variant = ProductVariantId::new();

    repo.record_movement(MovementInput::receipt(variant, warehouse, dec!(100), dec!(10), "PO-1"))
        .await
        .unwrap();
    repo.record_movement(MovementInput::receipt(variant, warehouse, dec!(100), dec!(20), "PO-2"))
        .await
        .unwrap();

    let level = repo.get_stock_level(StockKey::new(warehouse, variant)).await.unwrap();
    assert_eq!(level.quantity, dec!(200));
    assert_eq!(level.average_cost, dec!(15));

    let issued = repo
        .record_movement(MovementInput::issue(variant, warehouse, dec!(50), "SO-1"))
        .await
        .unwrap();
    assert_eq!(issued.movement_type, StoredMovementType::Out);
    assert_eq!(issued.cost, dec!(15));

    let level = repo.get_stock_level(StockKey::new(warehouse, variant)).await.unwrap();
    assert_eq!(level.quantity, dec!(150));
    assert_eq!(level.average_cost, dec!(15));
}

#[tokio::test]
async fn test_transfer_carries_source_cost() {
    let db = setup().await;
    let repo = InventoryRepository::new(db, NegativeStockPolicy::Block);
    let warehouse = LocationId::new();
    let store = LocationId::new();
    let variant = ProductVariantId::new();

    repo.record_movement(MovementInput::receipt(variant, warehouse, dec!(40), dec!(8), "PO-1"))
        .await
        .unwrap();
    repo.record_movement(MovementInput::receipt(variant, store, dec!(10), dec!(20), "PO-2"))
        .await
        .unwrap();

    repo.record_movement(MovementInput::transfer(variant, warehouse, store, dec!(30), "TR-1"))
        .await
        .unwrap();

    assert_eq!(repo.get_on_hand(warehouse, variant).await.unwrap(), dec!(10));
    let store_level = repo.get_stock_level(StockKey::new(store, variant)).await.unwrap();
    assert_eq!(store_level.quantity, dec!(40));
    // (10 * 20 + 30 * 8) / 40
    assert_eq!(store_level.average_cost, dec!(11));
}

#[tokio::test]
async fn test_issue_beyond_on_hand_is_blocked() {
    let db = setup().await;
    let repo = InventoryRepository::new(db.clone(), NegativeStockPolicy::Block);
    let warehouse = LocationId::new();
    let variant = ProductVariantId::new();

    repo.record_movement(MovementInput::receipt(variant, warehouse, dec!(5), dec!(3), "PO-1"))
        .await
        .unwrap();

    let err = repo
        .record_movement(MovementInput::issue(variant, warehouse, dec!(6), "SO-9"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::Inventory(InventoryError::InsufficientStock { requested, available, .. })
            if requested == dec!(6) && available == dec!(5)
    ));

    assert_eq!(repo.get_on_hand(warehouse, variant).await.unwrap(), dec!(5));
    assert_eq!(stock_movements::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_allow_policy_lets_stock_go_negative() {
    let db = setup().await;
    let repo = InventoryRepository::new(db, NegativeStockPolicy::Allow);
    let warehouse = LocationId::new();
    let variant = ProductVariantId::new();

    repo.record_movement(MovementInput::issue(variant, warehouse, dec!(4), "SO-1"))
        .await
        .unwrap();
    assert_eq!(repo.get_on_hand(warehouse, variant).await.unwrap(), dec!(-4));
}

#[tokio::test]
async fn test_adjustment_decrease_is_not_gated() {
    let db = setup().await;
    let repo = InventoryRepository::new(db, NegativeStockPolicy::Block);
    let warehouse = LocationId::new();
    let variant = ProductVariantId::new();

    repo.record_movement(MovementInput::receipt(variant, warehouse, dec!(2), dec!(5), "PO-1"))
        .await
        .unwrap();
    let adjustment = repo
        .record_movement(MovementInput {
            movement_type: MovementType::Adjustment,
            product_variant_id: variant,
            quantity: dec!(3),
            from_location_id: Some(warehouse),
            to_location_id: None,
            unit_cost: None,
            reference: "DAMAGE-1".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(adjustment.movement_type, StoredMovementType::Adjustment);
    assert_eq!(repo.get_on_hand(warehouse, variant).await.unwrap(), dec!(-1));
}

#[tokio::test]
async fn test_invalid_movement_shape_is_rejected() {
    let db = setup().await;
    let repo = InventoryRepository::new(db, NegativeStockPolicy::Block);
    let warehouse = LocationId::new();
    let variant = ProductVariantId::new();

    let err = repo
        .record_movement(MovementInput::transfer(variant, warehouse, warehouse, dec!(1), "TR-1"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Inventory(InventoryError::SameLocationTransfer)));

    let err = repo
        .record_movement(MovementInput::issue(variant, warehouse, dec!(0), "SO-1"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Inventory(InventoryError::NonPositiveQuantity(_))));
}

#[tokio::test]
async fn test_reservations_of_other_documents_reduce_availability() {
    let db = setup().await;
    let inventory = InventoryRepository::new(db.clone(), NegativeStockPolicy::Block);
    let reservations = ReservationRepository::new(db.clone());
    let warehouse = LocationId::new();
    let variant = ProductVariantId::new();

    inventory
        .record_movement(MovementInput::receipt(variant, warehouse, dec!(150), dec!(2), "PO-1"))
        .await
        .unwrap();
    reservations
        .reserve(ReserveInput {
            product_variant_id: variant,
            location_id: warehouse,
            quantity: dec!(120),
            reserved_for: ReservedFor::SalesOrder,
            reference_id: "SO-1".to_string(),
            expires_at: None,
        })
        .await
        .unwrap();

    let err = inventory
        .record_movement(MovementInput::issue(variant, warehouse, dec!(40), "SO-2"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::Inventory(InventoryError::InsufficientStock { available, reserved, .. })
            if available == dec!(30) && reserved == dec!(120)
    ));

    // The holder's own reservation does not block it.
    inventory
        .record_movement(MovementInput::issue(variant, warehouse, dec!(40), "SO-1"))
        .await
        .unwrap();
    assert_eq!(inventory.get_on_hand(warehouse, variant).await.unwrap(), dec!(110));
}

#[tokio::test]
async fn test_expired_reservations_do_not_block() {
    let db = setup().await;
    let inventory = InventoryRepository::new(db.clone(), NegativeStockPolicy::Block);
    let reservations = ReservationRepository::new(db.clone());
    let warehouse = LocationId::new();
    let variant = ProductVariantId::new();

    inventory
        .record_movement(MovementInput::receipt(variant, warehouse, dec!(10), dec!(1), "PO-1"))
        .await
        .unwrap();
    reservations
        .reserve(ReserveInput {
            product_variant_id: variant,
            location_id: warehouse,
            quantity: dec!(10),
            reserved_for: ReservedFor::SalesOrder,
            reference_id: "SO-1".to_string(),
            expires_at: Some(Utc::now() + Duration::milliseconds(50)),
        })
        .await
        .unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    inventory
        .record_movement(MovementInput::issue(variant, warehouse, dec!(10), "SO-2"))
        .await
        .unwrap();
    assert_eq!(inventory.get_on_hand(warehouse, variant).await.unwrap(), dec!(0));
}

#[tokio::test]
async fn test_movements_for_reference() {
    let db = setup().await;
    let repo = InventoryRepository::new(db, NegativeStockPolicy::Block);
    let warehouse = LocationId::new();
    let variant = ProductVariantId::new();

    repo.record_movement(MovementInput::receipt(variant, warehouse, dec!(3), dec!(1), "PO-7"))
        .await
        .unwrap();
    repo.record_movement(MovementInput::receipt(variant, warehouse, dec!(4), dec!(1), "PO-8"))
        .await
        .unwrap();

    let movements = repo.movements_for_reference("PO-7").await.unwrap();
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0].quantity, dec!(3));
}
