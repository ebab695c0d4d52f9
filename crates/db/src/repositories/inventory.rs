//! Inventory movement repository.
//!
//! Every movement locks the affected `inventories` rows for the rest of its
//! transaction, so concurrent movements on one (location, variant) apply one
//! after another. Outbound legs are gated on
//! `available = on_hand - reservations held by other documents`.

use chrono::Utc;
use neraca_core::inventory::{
    MovementInput, StockCheck, StockKey, StockLevel, apply_inbound, check_availability,
    plan_movement,
};
use neraca_shared::config::NegativeStockPolicy;
use neraca_shared::types::{LocationId, ProductVariantId};
use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::reservation::to_open_reservation;
use crate::entities::sea_orm_active_enums::{MovementType, ReservationStatus};
use crate::entities::{inventories, stock_movements, stock_reservations};
use crate::error::RepositoryResult;

/// An inventory row locked for update together with its availability check.
#[derive(Debug, Clone)]
pub struct LockedStock {
    /// The locked row.
    pub row: inventories::Model,
    /// The availability figures the check ran on.
    pub check: StockCheck,
}

/// Inventory repository.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    db: DatabaseConnection,
    policy: NegativeStockPolicy,
}

impl InventoryRepository {
    /// Creates a new inventory repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, policy: NegativeStockPolicy) -> Self {
        Self { db, policy }
    }

    /// Records a movement and applies it to stock in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The movement shape is invalid for its type
    /// - An outbound leg asks for more than is available and the policy blocks
    #[instrument(
        skip(self, input),
        fields(movement_type = %input.movement_type, reference = %input.reference)
    )]
    pub async fn record_movement(
        &self,
        input: MovementInput,
    ) -> RepositoryResult<stock_movements::Model> {
        let txn = self.db.begin().await?;
        let movement = self.record_movement_in(&txn, &input).await?;
        txn.commit().await?;
        Ok(movement)
    }

    /// Records a movement inside an open transaction.
    ///
    /// Reservations whose reference equals the movement's reference do not
    /// count against it. Outbound legs are valued at the source's average
    /// cost; transfers carry that cost into the destination.
    ///
    /// # Errors
    ///
    /// See [`Self::record_movement`].
    pub async fn record_movement_in(
        &self,
        txn: &DatabaseTransaction,
        input: &MovementInput,
    ) -> RepositoryResult<stock_movements::Model> {
        let plan = plan_movement(input)?;
        let mut valued_at = None;

        if let Some(outbound) = plan.outbound {
            let key = StockKey::new(outbound.location_id, input.product_variant_id);
            let row = if outbound.gated {
                self.validate_and_lock_in(txn, key, input.quantity, &input.reference)
                    .await?
                    .row
            } else {
                lock_or_create_in(txn, key).await?
            };
            let level = StockLevel {
                quantity: row.quantity - input.quantity,
                average_cost: row.average_cost,
            };
            valued_at = Some(row.average_cost);
            write_level_in(txn, row, level).await?;
        }

        if let Some(inbound) = plan.inbound {
            let key = StockKey::new(inbound.location_id, input.product_variant_id);
            let row = lock_or_create_in(txn, key).await?;
            let current = StockLevel {
                quantity: row.quantity,
                average_cost: row.average_cost,
            };
            let inbound_cost = if plan.outbound.is_some() {
                valued_at
            } else {
                input.unit_cost
            };
            let level = apply_inbound(current, input.quantity, inbound_cost);
            valued_at = valued_at.or(inbound_cost).or(Some(current.average_cost));
            write_level_in(txn, row, level).await?;
        }

        let movement = insert_movement_in(
            txn,
            NewMovement {
                movement_type: input.movement_type.into(),
                product_variant_id: input.product_variant_id,
                from_location_id: input.from_location_id,
                to_location_id: input.to_location_id,
                quantity: input.quantity,
                cost: valued_at.unwrap_or_default(),
                reference: input.reference.clone(),
            },
        )
        .await?;

        info!(
            movement_id = %movement.id,
            movement_type = %input.movement_type,
            variant = %input.product_variant_id,
            quantity = %input.quantity,
            "stock movement recorded"
        );
        Ok(movement)
    }

    /// Locks the (location, variant) row and checks that `quantity` can be
    /// drawn from it.
    ///
    /// Active, unexpired reservations count against availability unless
    /// their reference is `requesting_reference`.
    ///
    /// # Errors
    ///
    /// Returns an insufficient-stock error when the policy blocks.
    pub async fn validate_and_lock_in(
        &self,
        txn: &DatabaseTransaction,
        key: StockKey,
        quantity: Decimal,
        requesting_reference: &str,
    ) -> RepositoryResult<LockedStock> {
        let row = lock_or_create_in(txn, key).await?;
        let reserved = reserved_by_others_in(txn, key, Some(requesting_reference)).await?;
        let check = check_availability(key, row.quantity, reserved, quantity, self.policy)?;

        if check.shortfall() > Decimal::ZERO {
            warn!(
                location = %key.location_id,
                variant = %key.product_variant_id,
                requested = %check.requested,
                available = %check.available,
                "drawing stock below available quantity"
            );
        }
        Ok(LockedStock { row, check })
    }

    /// Quantity on hand at a location, zero if the variant was never stocked there.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_on_hand(
        &self,
        location_id: LocationId,
        product_variant_id: ProductVariantId,
    ) -> RepositoryResult<Decimal> {
        Ok(self
            .get_stock_level(StockKey::new(location_id, product_variant_id))
            .await?
            .quantity)
    }

    /// Quantity and average cost at a location.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_stock_level(&self, key: StockKey) -> RepositoryResult<StockLevel> {
        Ok(stock_row_query(key)
            .one(&self.db)
            .await?
            .map(|row| StockLevel {
                quantity: row.quantity,
                average_cost: row.average_cost,
            })
            .unwrap_or_default())
    }

    /// Movements recorded for a business document, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn movements_for_reference(
        &self,
        reference: &str,
    ) -> RepositoryResult<Vec<stock_movements::Model>> {
        Ok(stock_movements::Entity::find()
            .filter(stock_movements::Column::Reference.eq(reference))
            .order_by_asc(stock_movements::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }
}

/// Fields of a movement row about to be inserted.
pub(crate) struct NewMovement {
    pub movement_type: MovementType,
    pub product_variant_id: ProductVariantId,
    pub from_location_id: Option<LocationId>,
    pub to_location_id: Option<LocationId>,
    pub quantity: Decimal,
    pub cost: Decimal,
    pub reference: String,
}

pub(crate) async fn insert_movement_in(
    txn: &DatabaseTransaction,
    movement: NewMovement,
) -> RepositoryResult<stock_movements::Model> {
    let model = stock_movements::ActiveModel {
        id: Set(Uuid::now_v7()),
        movement_type: Set(movement.movement_type),
        product_variant_id: Set(movement.product_variant_id.into_inner()),
        from_location_id: Set(movement.from_location_id.map(LocationId::into_inner)),
        to_location_id: Set(movement.to_location_id.map(LocationId::into_inner)),
        quantity: Set(movement.quantity),
        cost: Set(movement.cost),
        reference: Set(movement.reference),
        created_at: Set(Utc::now().into()),
    };
    Ok(model.insert(txn).await?)
}

/// Locks the row for `key`, creating an empty one first if needed.
pub(crate) async fn lock_or_create_in(
    txn: &DatabaseTransaction,
    key: StockKey,
) -> RepositoryResult<inventories::Model> {
    let now = Utc::now().into();
    inventories::Entity::insert(inventories::ActiveModel {
        id: Set(Uuid::now_v7()),
        location_id: Set(key.location_id.into_inner()),
        product_variant_id: Set(key.product_variant_id.into_inner()),
        quantity: Set(Decimal::ZERO),
        average_cost: Set(Decimal::ZERO),
        created_at: Set(now),
        updated_at: Set(now),
    })
    .on_conflict(
        OnConflict::columns([
            inventories::Column::LocationId,
            inventories::Column::ProductVariantId,
        ])
        .do_nothing()
        .to_owned(),
    )
    .exec_without_returning(txn)
    .await?;

    Ok(stock_row_query(key)
        .lock_exclusive()
        .one(txn)
        .await?
        .ok_or_else(|| {
            DbErr::RecordNotFound(format!(
                "inventory row for variant {} at {}",
                key.product_variant_id, key.location_id
            ))
        })?)
}

pub(crate) async fn write_level_in(
    txn: &DatabaseTransaction,
    row: inventories::Model,
    level: StockLevel,
) -> RepositoryResult<inventories::Model> {
    let mut active: inventories::ActiveModel = row.into();
    active.quantity = Set(level.quantity);
    active.average_cost = Set(level.average_cost);
    active.updated_at = Set(Utc::now().into());
    Ok(active.update(txn).await?)
}

/// Live ACTIVE reservations at `key`, minus those of `excluding`.
pub(crate) async fn reserved_by_others_in<C: ConnectionTrait>(
    conn: &C,
    key: StockKey,
    excluding: Option<&str>,
) -> RepositoryResult<Decimal> {
    let now = Utc::now();
    let mut query = stock_reservations::Entity::find()
        .filter(stock_reservations::Column::LocationId.eq(key.location_id.into_inner()))
        .filter(
            stock_reservations::Column::ProductVariantId.eq(key.product_variant_id.into_inner()),
        )
        .filter(stock_reservations::Column::Status.eq(ReservationStatus::Active));
    if let Some(reference) = excluding {
        query = query.filter(stock_reservations::Column::ReferenceId.ne(reference));
    }
    let held: Decimal = query
        .all(conn)
        .await?
        .iter()
        .map(to_open_reservation)
        .filter(|reservation| reservation.is_live(now))
        .map(|reservation| reservation.quantity)
        .sum();
    Ok(held)
}

pub(crate) fn stock_row_query(key: StockKey) -> Select<inventories::Entity> {
    inventories::Entity::find()
        .filter(inventories::Column::LocationId.eq(key.location_id.into_inner()))
        .filter(inventories::Column::ProductVariantId.eq(key.product_variant_id.into_inner()))
}
