//! Stock opname (physical count) repository.
//!
//! A session snapshots the system quantities of one location, collects
//! counts, and on completion sets every counted row to its counted quantity,
//! records an ADJUSTMENT movement per difference, and posts the valued net
//! variance as one STOCK_OPNAME journal. Completion is one transaction.

use chrono::Utc;
use neraca_core::autojournal::BusinessEvent;
use neraca_core::inventory::{InventoryError, StockKey, StockLevel, stock_value};
use neraca_core::opname::{CountInput, CountedLine, plan_adjustments, validate_counts};
use neraca_shared::config::AccountMappingConfig;
use neraca_shared::types::{LocationId, ProductVariantId};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::auto_journal::{AutoJournalRepository, DispatchOutcome};
use super::inventory::{
    NewMovement, insert_movement_in, lock_or_create_in, stock_row_query, write_level_in,
};
use crate::entities::sea_orm_active_enums::{MovementType, OpnameStatus};
use crate::entities::{inventories, stock_movements, stock_opname_items, stock_opnames};
use crate::error::RepositoryResult;

/// A count session with its lines.
#[derive(Debug, Clone)]
pub struct OpnameWithItems {
    /// The session.
    pub session: stock_opnames::Model,
    /// Lines ordered by variant.
    pub items: Vec<stock_opname_items::Model>,
}

/// What completing a session changed.
#[derive(Debug, Clone)]
pub struct OpnameCompletion {
    /// The session, now COMPLETED.
    pub session: stock_opnames::Model,
    /// One ADJUSTMENT movement per counted difference.
    pub adjustments: Vec<stock_movements::Model>,
    /// Lines whose count equalled the snapshot.
    pub matched: usize,
    /// Lines never counted, left untouched.
    pub uncounted: usize,
    /// Net variance valued at average cost.
    pub value_delta: Decimal,
    /// The STOCK_OPNAME journal.
    pub journal: DispatchOutcome,
}

/// Stock opname repository.
#[derive(Debug, Clone)]
pub struct OpnameRepository {
    db: DatabaseConnection,
    accounts: AccountMappingConfig,
}

impl OpnameRepository {
    /// Creates a new opname repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, accounts: AccountMappingConfig) -> Self {
        Self { db, accounts }
    }

    /// Opens a count session, snapshotting every inventory row at the location.
    ///
    /// # Errors
    ///
    /// Returns an error if the location already has an OPEN session.
    #[instrument(skip(self, notes))]
    pub async fn start_session(
        &self,
        location_id: LocationId,
        notes: Option<String>,
    ) -> RepositoryResult<OpnameWithItems> {
        let txn = self.db.begin().await?;

        if let Some(open) = stock_opnames::Entity::find()
            .filter(stock_opnames::Column::LocationId.eq(location_id.into_inner()))
            .filter(stock_opnames::Column::Status.eq(OpnameStatus::Open))
            .lock_exclusive()
            .one(&txn)
            .await?
        {
            return Err(InventoryError::OpnameAlreadyOpen {
                location_id,
                session_id: open.id,
            }
            .into());
        }

        let now = Utc::now().into();
        let session = stock_opnames::ActiveModel {
            id: Set(Uuid::now_v7()),
            location_id: Set(location_id.into_inner()),
            status: Set(OpnameStatus::Open),
            notes: Set(notes),
            created_at: Set(now),
            completed_at: Set(None),
        }
        .insert(&txn)
        .await?;

        let rows = inventories::Entity::find()
            .filter(inventories::Column::LocationId.eq(location_id.into_inner()))
            .all(&txn)
            .await?;
        for row in rows {
            stock_opname_items::ActiveModel {
                id: Set(Uuid::now_v7()),
                stock_opname_id: Set(session.id),
                product_variant_id: Set(row.product_variant_id),
                system_quantity: Set(row.quantity),
                counted_quantity: Set(None),
                notes: Set(None),
                updated_at: Set(now),
            }
            .insert(&txn)
            .await?;
        }

        let items = load_items_in(&txn, session.id).await?;
        txn.commit().await?;

        info!(session_id = %session.id, lines = items.len(), "stock opname started");
        Ok(OpnameWithItems { session, items })
    }

    /// Records counted quantities. Re-recording a variant overwrites it.
    ///
    /// A variant missing from the snapshot is added with its current on-hand
    /// as the system quantity.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A count is negative or too precise
    /// - Session not found or already COMPLETED
    #[instrument(skip(self, counts))]
    pub async fn record_counts(
        &self,
        session_id: Uuid,
        counts: Vec<CountInput>,
    ) -> RepositoryResult<Vec<stock_opname_items::Model>> {
        validate_counts(&counts)?;

        let txn = self.db.begin().await?;
        let session = lock_open_session_in(&txn, session_id).await?;
        let location_id = LocationId::from_uuid(session.location_id);

        let now = Utc::now().into();
        for count in counts {
            let existing = stock_opname_items::Entity::find()
                .filter(stock_opname_items::Column::StockOpnameId.eq(session_id))
                .filter(
                    stock_opname_items::Column::ProductVariantId
                        .eq(count.product_variant_id.into_inner()),
                )
                .one(&txn)
                .await?;

            match existing {
                Some(item) => {
                    let mut active: stock_opname_items::ActiveModel = item.into();
                    active.counted_quantity = Set(Some(count.counted_quantity));
                    active.notes = Set(count.notes);
                    active.updated_at = Set(now);
                    active.update(&txn).await?;
                }
                None => {
                    let key = StockKey::new(location_id, count.product_variant_id);
                    let on_hand = stock_row_query(key)
                        .one(&txn)
                        .await?
                        .map_or(Decimal::ZERO, |row| row.quantity);
                    stock_opname_items::ActiveModel {
                        id: Set(Uuid::now_v7()),
                        stock_opname_id: Set(session_id),
                        product_variant_id: Set(count.product_variant_id.into_inner()),
                        system_quantity: Set(on_hand),
                        counted_quantity: Set(Some(count.counted_quantity)),
                        notes: Set(count.notes),
                        updated_at: Set(now),
                    }
                    .insert(&txn)
                    .await?;
                }
            }
        }

        let items = load_items_in(&txn, session_id).await?;
        txn.commit().await?;
        Ok(items)
    }

    /// Applies the counts and closes the session.
    ///
    /// Counted rows are set to the counted quantity regardless of movements
    /// since the snapshot. Uncounted lines are left as they are.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Session not found or already COMPLETED
    /// - The variance journal cannot be posted (missing account, closed period)
    #[instrument(skip(self))]
    pub async fn complete(&self, session_id: Uuid) -> RepositoryResult<OpnameCompletion> {
        let txn = self.db.begin().await?;
        let session = lock_open_session_in(&txn, session_id).await?;
        let location_id = LocationId::from_uuid(session.location_id);
        let reference = session.id.to_string();

        let items = load_items_in(&txn, session_id).await?;
        let lines: Vec<CountedLine> = items
            .iter()
            .map(|item| CountedLine {
                product_variant_id: ProductVariantId::from_uuid(item.product_variant_id),
                system_quantity: item.system_quantity,
                counted_quantity: item.counted_quantity,
            })
            .collect();
        let plan = plan_adjustments(&lines);

        let mut value_delta = Decimal::ZERO;
        let mut adjustments = Vec::with_capacity(plan.adjustments.len());
        for line in &plan.adjustments {
            let key = StockKey::new(location_id, line.product_variant_id);
            let row = lock_or_create_in(&txn, key).await?;
            let cost = row.average_cost;
            let surplus = line.variance > Decimal::ZERO;

            adjustments.push(
                insert_movement_in(
                    &txn,
                    NewMovement {
                        movement_type: MovementType::Adjustment,
                        product_variant_id: line.product_variant_id,
                        from_location_id: (!surplus).then_some(location_id),
                        to_location_id: surplus.then_some(location_id),
                        quantity: line.variance.abs(),
                        cost,
                        reference: reference.clone(),
                    },
                )
                .await?,
            );
            value_delta += stock_value(line.variance, cost);

            write_level_in(
                &txn,
                row,
                StockLevel {
                    quantity: line.counted_quantity,
                    average_cost: cost,
                },
            )
            .await?;
        }

        let mut active: stock_opnames::ActiveModel = session.into();
        active.status = Set(OpnameStatus::Completed);
        active.completed_at = Set(Some(Utc::now().into()));
        let session = active.update(&txn).await?;

        let event = BusinessEvent::StockOpnameCompleted {
            session_id: reference,
            date: Utc::now().date_naive(),
            value_delta,
        };
        let journal = AutoJournalRepository::dispatch_in(&txn, &event, &self.accounts).await?;

        txn.commit().await?;

        info!(
            session_id = %session.id,
            adjustments = adjustments.len(),
            matched = plan.matched,
            uncounted = plan.uncounted,
            value_delta = %value_delta,
            "stock opname completed"
        );
        Ok(OpnameCompletion {
            session,
            adjustments,
            matched: plan.matched,
            uncounted: plan.uncounted,
            value_delta,
            journal,
        })
    }

    /// Loads a session with its lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the session does not exist.
    pub async fn get_session(&self, session_id: Uuid) -> RepositoryResult<OpnameWithItems> {
        let session = stock_opnames::Entity::find_by_id(session_id)
            .one(&self.db)
            .await?
            .ok_or(InventoryError::OpnameNotFound(session_id))?;
        let items = load_items_in(&self.db, session_id).await?;
        Ok(OpnameWithItems { session, items })
    }
}

async fn lock_open_session_in(
    txn: &DatabaseTransaction,
    session_id: Uuid,
) -> RepositoryResult<stock_opnames::Model> {
    let session = stock_opnames::Entity::find_by_id(session_id)
        .lock_exclusive()
        .one(txn)
        .await?
        .ok_or(InventoryError::OpnameNotFound(session_id))?;
    if session.status == OpnameStatus::Completed {
        return Err(InventoryError::OpnameCompleted(session_id).into());
    }
    Ok(session)
}

async fn load_items_in<C: ConnectionTrait>(
    conn: &C,
    session_id: Uuid,
) -> RepositoryResult<Vec<stock_opname_items::Model>> {
    Ok(stock_opname_items::Entity::find()
        .filter(stock_opname_items::Column::StockOpnameId.eq(session_id))
        .order_by_asc(stock_opname_items::Column::ProductVariantId)
        .all(conn)
        .await?)
}
