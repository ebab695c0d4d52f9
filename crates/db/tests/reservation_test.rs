//! Integration tests for stock reservations.

mod common;

use chrono::{Duration, Utc};
use neraca_core::inventory::{InventoryError, MovementInput};
use neraca_core::reservation::{ReserveInput, ReservedFor};
use neraca_db::RepositoryError;
use neraca_db::entities::sea_orm_active_enums::ReservationStatus;
use neraca_db::repositories::{InventoryRepository, ReservationRepository};
use neraca_shared::config::NegativeStockPolicy;
use neraca_shared::types::{LocationId, ProductVariantId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;

use common::setup;

struct Stocked {
    reservations: ReservationRepository,
    inventory: InventoryRepository,
    location: LocationId,
    variant: ProductVariantId,
}

async fn stocked(db: &DatabaseConnection, on_hand: Decimal) -> Stocked {
    let inventory = InventoryRepository::new(db.clone(), NegativeStockPolicy::Block);
    let location = LocationId::new();
    let variant = ProductVariantId::new();
    inventory
        .record_movement(MovementInput::receipt(variant, location, on_hand, dec!(5), "PO-1"))
        .await
        .unwrap();
    Stocked {
        reservations: ReservationRepository::new(db.clone()),
        inventory,
        location,
        variant,
    }
}

fn hold(stock: &Stocked, reference: &str, quantity: Decimal) -> ReserveInput {
    ReserveInput {
        product_variant_id: stock.variant,
        location_id: stock.location,
        quantity,
        reserved_for: ReservedFor::SalesOrder,
        reference_id: reference.to_string(),
        expires_at: None,
    }
}

#[tokio::test]
async fn test_reserve_cannot_exceed_on_hand() {
    let db = setup().await;
    let stock = stocked(&db, dec!(100)).await;

    let held = stock.reservations.reserve(hold(&stock, "SO-1", dec!(70))).await.unwrap();
    assert_eq!(held.status, ReservationStatus::Active);
    // Reserving moves no stock.
    assert_eq!(
        stock.inventory.get_on_hand(stock.location, stock.variant).await.unwrap(),
        dec!(100)
    );

    let err = stock
        .reservations
        .reserve(hold(&stock, "SO-2", dec!(31)))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::Inventory(InventoryError::InsufficientStock { available, .. })
            if available == dec!(30)
    ));

    stock.reservations.reserve(hold(&stock, "SO-2", dec!(30))).await.unwrap();
}

#[tokio::test]
async fn test_reserve_requires_reference() {
    let db = setup().await;
    let stock = stocked(&db, dec!(10)).await;

    let err = stock.reservations.reserve(hold(&stock, "  ", dec!(1))).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Inventory(InventoryError::BlankReference)));
}

#[tokio::test]
async fn test_consume_is_fifo_and_partial() {
    let db = setup().await;
    let stock = stocked(&db, dec!(100)).await;

    let first = stock.reservations.reserve(hold(&stock, "SO-1", dec!(10))).await.unwrap();
    let second = stock.reservations.reserve(hold(&stock, "SO-1", dec!(20))).await.unwrap();

    let plan = stock
        .reservations
        .consume("SO-1", stock.variant, Some(stock.location), dec!(15))
        .await
        .unwrap();
    assert_eq!(plan.consumed, dec!(15));
    assert_eq!(plan.unbacked, dec!(0));

    let rows = stock.reservations.find_by_reference("SO-1").await.unwrap();
    let first_row = rows.iter().find(|r| r.id == first.id).unwrap();
    let second_row = rows.iter().find(|r| r.id == second.id).unwrap();
    assert_eq!(first_row.status, ReservationStatus::Fulfilled);
    assert_eq!(first_row.quantity, dec!(10));
    assert_eq!(second_row.status, ReservationStatus::Active);
    assert_eq!(second_row.quantity, dec!(15));

    let plan = stock
        .reservations
        .consume("SO-1", stock.variant, None, dec!(20))
        .await
        .unwrap();
    assert_eq!(plan.consumed, dec!(15));
    assert_eq!(plan.unbacked, dec!(5));
}

#[tokio::test]
async fn test_consume_only_touches_holds_at_location() {
    let db = setup().await;
    let stock = stocked(&db, dec!(10)).await;
    stock.reservations.reserve(hold(&stock, "SO-1", dec!(6))).await.unwrap();

    let plan = stock
        .reservations
        .consume("SO-1", stock.variant, Some(LocationId::new()), dec!(6))
        .await
        .unwrap();
    assert_eq!(plan.consumed, dec!(0));
    assert_eq!(plan.unbacked, dec!(6));

    let rows = stock.reservations.find_by_reference("SO-1").await.unwrap();
    assert_eq!(rows[0].status, ReservationStatus::Active);
    assert_eq!(rows[0].quantity, dec!(6));
}

#[tokio::test]
async fn test_cancel_releases_held_stock() {
    let db = setup().await;
    let stock = stocked(&db, dec!(10)).await;

    stock.reservations.reserve(hold(&stock, "SO-1", dec!(10))).await.unwrap();
    assert!(stock.reservations.reserve(hold(&stock, "SO-2", dec!(1))).await.is_err());

    let cancelled = stock.reservations.cancel("SO-1").await.unwrap();
    assert_eq!(cancelled, 1);
    assert_eq!(stock.reservations.cancel("SO-1").await.unwrap(), 0);

    stock.reservations.reserve(hold(&stock, "SO-2", dec!(10))).await.unwrap();
}

#[tokio::test]
async fn test_release_expired_only_touches_lapsed_holds() {
    let db = setup().await;
    let stock = stocked(&db, dec!(50)).await;

    let mut lapsed = hold(&stock, "SO-1", dec!(5));
    lapsed.expires_at = Some(Utc::now() - Duration::hours(1));
    let mut later = hold(&stock, "SO-2", dec!(5));
    later.expires_at = Some(Utc::now() + Duration::hours(1));

    stock.reservations.reserve(lapsed).await.unwrap();
    stock.reservations.reserve(later).await.unwrap();
    stock.reservations.reserve(hold(&stock, "SO-3", dec!(5))).await.unwrap();

    let released = stock.reservations.release_expired(Utc::now()).await.unwrap();
    assert_eq!(released, 1);

    let rows = stock.reservations.find_by_reference("SO-1").await.unwrap();
    assert_eq!(rows[0].status, ReservationStatus::Cancelled);
    let rows = stock.reservations.find_by_reference("SO-2").await.unwrap();
    assert_eq!(rows[0].status, ReservationStatus::Active);
}
