//! Sales order shipment.
//!
//! Shipping an order consumes its reservations, draws the stock, and posts
//! the cost of goods sold in one transaction. Any failing line rolls back
//! the whole shipment, journal included.
//!
//! An order may leave in several deliveries. Each delivery carries its own
//! reference and gets its own journal; a delivery is shipped at most once.

use chrono::NaiveDate;
use neraca_core::autojournal::{BusinessEvent, SALES_SHIPMENT_REFERENCE_TYPE};
use neraca_core::inventory::{InventoryError, MovementInput, stock_value};
use neraca_core::ledger::{LedgerError, source_key};
use neraca_shared::config::{AccountMappingConfig, NegativeStockPolicy};
use neraca_shared::types::{LocationId, ProductVariantId};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::{info, instrument};

use super::auto_journal::{AutoJournalRepository, DispatchOutcome};
use super::inventory::InventoryRepository;
use super::journal::find_by_source_in;
use super::reservation::ReservationRepository;
use crate::entities::stock_movements;
use crate::error::{RepositoryError, RepositoryResult};

/// One shipped variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipmentLine {
    /// Variant shipped.
    pub product_variant_id: ProductVariantId,
    /// Quantity shipped.
    pub quantity: Decimal,
}

/// Input for shipping a sales order.
#[derive(Debug, Clone)]
pub struct ShipOrderInput {
    /// Sales order reference; reservations and movements carry it.
    pub order_reference: String,
    /// Delivery reference; keys the cost-of-goods journal.
    pub shipment_reference: String,
    /// Location the goods leave from.
    pub location_id: LocationId,
    /// Date of the cost-of-goods journal.
    pub shipment_date: NaiveDate,
    /// Shipped lines.
    pub lines: Vec<ShipmentLine>,
}

/// What a shipment recorded.
#[derive(Debug, Clone)]
pub struct ShipmentResult {
    /// One OUT movement per line, in input order.
    pub movements: Vec<stock_movements::Model>,
    /// Shipped quantity valued at average cost.
    pub cost_amount: Decimal,
    /// The SALES_SHIPMENT journal.
    pub journal: DispatchOutcome,
}

/// Sales shipment repository.
#[derive(Debug, Clone)]
pub struct ShipmentRepository {
    db: DatabaseConnection,
    inventory: InventoryRepository,
    accounts: AccountMappingConfig,
}

impl ShipmentRepository {
    /// Creates a new shipment repository.
    #[must_use]
    pub fn new(
        db: DatabaseConnection,
        policy: NegativeStockPolicy,
        accounts: AccountMappingConfig,
    ) -> Self {
        Self {
            inventory: InventoryRepository::new(db.clone(), policy),
            db,
            accounts,
        }
    }

    /// Ships a sales order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The order has no lines or a line quantity is invalid
    /// - The delivery was already shipped
    /// - A line needs more stock than is available to the order
    /// - The shipment date falls outside an OPEN period
    /// - A mapped account is missing
    #[instrument(
        skip(self, input),
        fields(
            order = %input.order_reference,
            shipment = %input.shipment_reference,
            lines = input.lines.len()
        )
    )]
    pub async fn ship_order(&self, input: ShipOrderInput) -> RepositoryResult<ShipmentResult> {
        if input.lines.is_empty() {
            return Err(InventoryError::EmptyShipment(input.order_reference).into());
        }
        if input.order_reference.trim().is_empty() || input.shipment_reference.trim().is_empty() {
            return Err(InventoryError::BlankReference.into());
        }

        let txn = self.db.begin().await?;
        ensure_not_shipped_in(&txn, &input.shipment_reference).await?;

        let mut movements = Vec::with_capacity(input.lines.len());
        let mut cost_amount = Decimal::ZERO;
        for line in &input.lines {
            ReservationRepository::consume_in(
                &txn,
                &input.order_reference,
                line.product_variant_id,
                Some(input.location_id),
                line.quantity,
            )
            .await?;

            let movement = self
                .inventory
                .record_movement_in(
                    &txn,
                    &MovementInput::issue(
                        line.product_variant_id,
                        input.location_id,
                        line.quantity,
                        input.order_reference.clone(),
                    ),
                )
                .await?;
            cost_amount += stock_value(movement.quantity, movement.cost);
            movements.push(movement);
        }

        let event = BusinessEvent::SalesShipmentExecuted {
            shipment_reference: input.shipment_reference.clone(),
            date: input.shipment_date,
            cost_amount,
        };
        let journal = match AutoJournalRepository::dispatch_in(&txn, &event, &self.accounts).await
        {
            Ok(DispatchOutcome::AlreadyProcessed(_))
            | Err(RepositoryError::Ledger(LedgerError::DuplicateSource(_))) => {
                return Err(
                    InventoryError::ShipmentAlreadyRecorded(input.shipment_reference).into(),
                );
            }
            other => other?,
        };

        txn.commit().await?;

        info!(
            order = %input.order_reference,
            shipment = %input.shipment_reference,
            cost_amount = %cost_amount,
            entry_number = journal.entry_number().unwrap_or("-"),
            "order shipped"
        );
        Ok(ShipmentResult {
            movements,
            cost_amount,
            journal,
        })
    }
}

/// Rejects a delivery whose journal already exists.
async fn ensure_not_shipped_in(
    txn: &DatabaseTransaction,
    shipment_reference: &str,
) -> RepositoryResult<()> {
    let key = source_key(SALES_SHIPMENT_REFERENCE_TYPE, shipment_reference);
    if find_by_source_in(txn, &key).await?.is_some() {
        return Err(InventoryError::ShipmentAlreadyRecorded(shipment_reference.to_string()).into());
    }
    Ok(())
}
