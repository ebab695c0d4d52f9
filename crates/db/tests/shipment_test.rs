//! Integration tests for order shipment and stock reconciliation.

mod common;

use neraca_core::inventory::{InventoryError, MovementInput};
use neraca_core::ledger::LedgerError;
use neraca_core::reservation::{ReserveInput, ReservedFor};
use neraca_db::RepositoryError;
use neraca_db::entities::sea_orm_active_enums::ReservationStatus;
use neraca_db::entities::{inventories, journal_entries, stock_movements};
use neraca_db::repositories::{
    DispatchOutcome, InventoryRepository, LedgerRepository, ReconciliationRepository,
    ReservationRepository, ShipOrderInput, ShipmentLine, ShipmentRepository,
};
use neraca_shared::config::{AccountMappingConfig, NegativeStockPolicy};
use neraca_shared::types::{LocationId, ProductVariantId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};

use common::{date, open_period_of, seed_chart, setup};

fn shipments(db: &sea_orm::DatabaseConnection) -> ShipmentRepository {
    ShipmentRepository::new(
        db.clone(),
        NegativeStockPolicy::Block,
        AccountMappingConfig::default(),
    )
}

fn order(
    reference: &str,
    delivery: &str,
    location_id: LocationId,
    lines: Vec<(ProductVariantId, Decimal)>,
) -> ShipOrderInput {
    ShipOrderInput {
        order_reference: reference.to_string(),
        shipment_reference: delivery.to_string(),
        location_id,
        shipment_date: date(2026, 11, 5),
        lines: lines
            .into_iter()
            .map(|(product_variant_id, quantity)| ShipmentLine {
                product_variant_id,
                quantity,
            })
            .collect(),
    }
}

#[tokio::test]
async fn test_ship_order_consumes_reservation_and_posts_cogs() {
    let db = setup().await;
    let chart = seed_chart(&db).await;
    open_period_of(&db, date(2026, 11, 1)).await;

    let inventory = InventoryRepository::new(db.clone(), NegativeStockPolicy::Block);
    let reservations = ReservationRepository::new(db.clone());
    let warehouse = LocationId::new();
    let shirt = ProductVariantId::new();
    let hat = ProductVariantId::new();

    inventory
        .record_movement(MovementInput::receipt(shirt, warehouse, dec!(10), dec!(12), "PO-1"))
        .await
        .unwrap();
    inventory
        .record_movement(MovementInput::receipt(hat, warehouse, dec!(4), dec!(5), "PO-1"))
        .await
        .unwrap();
    reservations
        .reserve(ReserveInput {
            product_variant_id: shirt,
            location_id: warehouse,
            quantity: dec!(10),
            reserved_for: ReservedFor::SalesOrder,
            reference_id: "SO-1".to_string(),
            expires_at: None,
        })
        .await
        .unwrap();

    let result = shipments(&db)
        .ship_order(order("SO-1", "DO-1", warehouse, vec![(shirt, dec!(10)), (hat, dec!(2))]))
        .await
        .unwrap();

    assert_eq!(result.movements.len(), 2);
    assert_eq!(result.cost_amount, dec!(130));
    let DispatchOutcome::Posted(journal) = &result.journal else {
        panic!("expected a posted journal, got {:?}", result.journal);
    };
    assert_eq!(journal.entry.source_key.as_deref(), Some("SALES_SHIPMENT:DO-1"));

    assert_eq!(inventory.get_on_hand(warehouse, shirt).await.unwrap(), dec!(0));
    assert_eq!(inventory.get_on_hand(warehouse, hat).await.unwrap(), dec!(2));

    let held = reservations.find_by_reference("SO-1").await.unwrap();
    assert_eq!(held[0].status, ReservationStatus::Fulfilled);

    let delivered = inventory.movements_for_reference("SO-1").await.unwrap();
    assert_eq!(delivered.len(), 2);

    let cogs = LedgerRepository::new(db.clone())
        .get_summary(chart.cogs, None, None)
        .await
        .unwrap();
    assert_eq!(cogs.closing_balance, dec!(130));
}

#[tokio::test]
async fn test_failed_line_rolls_back_whole_shipment() {
    let db = setup().await;
    seed_chart(&db).await;
    open_period_of(&db, date(2026, 11, 1)).await;

    let inventory = InventoryRepository::new(db.clone(), NegativeStockPolicy::Block);
    let warehouse = LocationId::new();
    let plenty = ProductVariantId::new();
    let scarce = ProductVariantId::new();

    inventory
        .record_movement(MovementInput::receipt(plenty, warehouse, dec!(50), dec!(1), "PO-1"))
        .await
        .unwrap();
    inventory
        .record_movement(MovementInput::receipt(scarce, warehouse, dec!(1), dec!(1), "PO-1"))
        .await
        .unwrap();

    let err = shipments(&db)
        .ship_order(order("SO-2", "DO-2", warehouse, vec![(plenty, dec!(5)), (scarce, dec!(2))]))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Inventory(InventoryError::InsufficientStock { .. })));

    assert_eq!(inventory.get_on_hand(warehouse, plenty).await.unwrap(), dec!(50));
    assert_eq!(stock_movements::Entity::find().count(&db).await.unwrap(), 2);
    assert_eq!(journal_entries::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_closed_period_rolls_back_stock() {
    let db = setup().await;
    seed_chart(&db).await;

    let inventory = InventoryRepository::new(db.clone(), NegativeStockPolicy::Block);
    let warehouse = LocationId::new();
    let variant = ProductVariantId::new();
    inventory
        .record_movement(MovementInput::receipt(variant, warehouse, dec!(3), dec!(2), "PO-1"))
        .await
        .unwrap();

    // No period covers the shipment date.
    let err = shipments(&db)
        .ship_order(order("SO-3", "DO-3", warehouse, vec![(variant, dec!(3))]))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Ledger(LedgerError::NoFiscalPeriod(_))));
    assert_eq!(inventory.get_on_hand(warehouse, variant).await.unwrap(), dec!(3));
}

#[tokio::test]
async fn test_empty_shipment_is_rejected() {
    let db = setup().await;
    let err = shipments(&db)
        .ship_order(order("SO-4", "DO-4", LocationId::new(), Vec::new()))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Inventory(InventoryError::EmptyShipment(_))));
}

#[tokio::test]
async fn test_concurrent_shipments_never_oversell() {
    let db = setup().await;
    seed_chart(&db).await;
    open_period_of(&db, date(2026, 11, 1)).await;

    let inventory = InventoryRepository::new(db.clone(), NegativeStockPolicy::Block);
    let warehouse = LocationId::new();
    let variant = ProductVariantId::new();
    inventory
        .record_movement(MovementInput::receipt(variant, warehouse, dec!(10), dec!(3), "PO-1"))
        .await
        .unwrap();

    let repo = shipments(&db);
    let first = order("SO-A", "DO-A", warehouse, vec![(variant, dec!(7))]);
    let second = order("SO-B", "DO-B", warehouse, vec![(variant, dec!(7))]);
    let (a, b) = futures::join!(repo.ship_order(first), repo.ship_order(second));

    assert_eq!(usize::from(a.is_ok()) + usize::from(b.is_ok()), 1);
    let failure = a.err().or(b.err()).unwrap();
    assert!(matches!(
        failure,
        RepositoryError::Inventory(InventoryError::InsufficientStock { .. })
    ));
    assert_eq!(inventory.get_on_hand(warehouse, variant).await.unwrap(), dec!(3));
    assert_eq!(journal_entries::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_stock_drift_reports_tampered_rows() {
    let db = setup().await;
    let inventory = InventoryRepository::new(db.clone(), NegativeStockPolicy::Block);
    let reconciliation = ReconciliationRepository::new(db.clone());
    let warehouse = LocationId::new();
    let store = LocationId::new();
    let variant = ProductVariantId::new();

    inventory
        .record_movement(MovementInput::receipt(variant, warehouse, dec!(20), dec!(1), "PO-1"))
        .await
        .unwrap();
    inventory
        .record_movement(MovementInput::transfer(variant, warehouse, store, dec!(5), "TR-1"))
        .await
        .unwrap();
    assert!(reconciliation.stock_drift().await.unwrap().is_empty());

    let row = inventories::Entity::find()
        .all(&db)
        .await
        .unwrap()
        .into_iter()
        .find(|row| row.location_id == store.into_inner())
        .unwrap();
    let mut tampered: inventories::ActiveModel = row.into();
    tampered.quantity = Set(dec!(9));
    tampered.update(&db).await.unwrap();

    let drifts = reconciliation.stock_drift().await.unwrap();
    assert_eq!(drifts.len(), 1);
    assert_eq!(drifts[0].location_id, store);
    assert_eq!(drifts[0].movement_quantity, dec!(5));
    assert_eq!(drifts[0].recorded_quantity, dec!(9));
    assert_eq!(drifts[0].drift, dec!(4));
}

#[tokio::test]
async fn test_each_delivery_of_an_order_posts_cogs() {
    let db = setup().await;
    let chart = seed_chart(&db).await;
    open_period_of(&db, date(2026, 11, 1)).await;

    let inventory = InventoryRepository::new(db.clone(), NegativeStockPolicy::Block);
    let warehouse = LocationId::new();
    let variant = ProductVariantId::new();
    inventory
        .record_movement(MovementInput::receipt(variant, warehouse, dec!(10), dec!(12), "PO-1"))
        .await
        .unwrap();

    let repo = shipments(&db);
    let first = repo
        .ship_order(order("SO-1", "DO-1", warehouse, vec![(variant, dec!(4))]))
        .await
        .unwrap();
    let second = repo
        .ship_order(order("SO-1", "DO-2", warehouse, vec![(variant, dec!(4))]))
        .await
        .unwrap();

    assert!(matches!(first.journal, DispatchOutcome::Posted(_)));
    assert!(matches!(second.journal, DispatchOutcome::Posted(_)));
    assert_eq!(second.cost_amount, dec!(48));
    assert_eq!(inventory.get_on_hand(warehouse, variant).await.unwrap(), dec!(2));

    let cogs = LedgerRepository::new(db.clone())
        .get_summary(chart.cogs, None, None)
        .await
        .unwrap();
    assert_eq!(cogs.closing_balance, dec!(96));
    assert_eq!(inventory.movements_for_reference("SO-1").await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_reshipping_a_delivery_is_rejected() {
    let db = setup().await;
    seed_chart(&db).await;
    open_period_of(&db, date(2026, 11, 1)).await;

    let inventory = InventoryRepository::new(db.clone(), NegativeStockPolicy::Block);
    let warehouse = LocationId::new();
    let variant = ProductVariantId::new();
    inventory
        .record_movement(MovementInput::receipt(variant, warehouse, dec!(10), dec!(12), "PO-1"))
        .await
        .unwrap();

    let repo = shipments(&db);
    repo.ship_order(order("SO-1", "DO-1", warehouse, vec![(variant, dec!(4))]))
        .await
        .unwrap();
    let err = repo
        .ship_order(order("SO-1", "DO-1", warehouse, vec![(variant, dec!(4))]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RepositoryError::Inventory(InventoryError::ShipmentAlreadyRecorded(ref delivery))
            if delivery == "DO-1"
    ));
    assert_eq!(inventory.get_on_hand(warehouse, variant).await.unwrap(), dec!(6));
    assert_eq!(journal_entries::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_shipment_consumes_reservations_at_its_location_only() {
    let db = setup().await;
    seed_chart(&db).await;
    open_period_of(&db, date(2026, 11, 1)).await;

    let inventory = InventoryRepository::new(db.clone(), NegativeStockPolicy::Block);
    let reservations = ReservationRepository::new(db.clone());
    let north = LocationId::new();
    let south = LocationId::new();
    let variant = ProductVariantId::new();

    for location in [north, south] {
        inventory
            .record_movement(MovementInput::receipt(variant, location, dec!(5), dec!(2), "PO-1"))
            .await
            .unwrap();
        reservations
            .reserve(ReserveInput {
                product_variant_id: variant,
                location_id: location,
                quantity: dec!(5),
                reserved_for: ReservedFor::SalesOrder,
                reference_id: "SO-1".to_string(),
                expires_at: None,
            })
            .await
            .unwrap();
    }

    shipments(&db)
        .ship_order(order("SO-1", "DO-1", north, vec![(variant, dec!(5))]))
        .await
        .unwrap();

    let held = reservations.find_by_reference("SO-1").await.unwrap();
    let at = |location: LocationId| {
        held.iter()
            .find(|r| r.location_id == location.into_inner())
            .unwrap()
            .status
    };
    assert_eq!(at(north), ReservationStatus::Fulfilled);
    assert_eq!(at(south), ReservationStatus::Active);
}
