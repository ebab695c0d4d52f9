//! Stock reservation repository.

use chrono::{DateTime, Utc};
use neraca_core::inventory::{InventoryError, StockKey};
use neraca_core::reservation::{
    ConsumptionPlan, OpenReservation, ReserveInput, ensure_reservable, plan_consumption,
};
use neraca_shared::types::{LocationId, ProductVariantId};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::inventory::{reserved_by_others_in, stock_row_query};
use crate::entities::sea_orm_active_enums::ReservationStatus;
use crate::entities::stock_reservations;
use crate::error::RepositoryResult;

/// Stock reservation repository.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    db: DatabaseConnection,
}

impl ReservationRepository {
    /// Creates a new reservation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Holds stock for a document. Moves nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Quantity is not positive or too precise
    /// - Reference is blank
    /// - Live reservations plus `quantity` would exceed on-hand
    #[instrument(skip(self, input), fields(reference = %input.reference_id))]
    pub async fn reserve(
        &self,
        input: ReserveInput,
    ) -> RepositoryResult<stock_reservations::Model> {
        if input.reference_id.trim().is_empty() {
            return Err(InventoryError::BlankReference.into());
        }
        let key = StockKey::new(input.location_id, input.product_variant_id);

        let txn = self.db.begin().await?;

        let on_hand = stock_row_query(key)
            .lock_exclusive()
            .one(&txn)
            .await?
            .map_or(Decimal::ZERO, |row| row.quantity);
        let held = reserved_by_others_in(&txn, key, None).await?;
        ensure_reservable(key, on_hand, held, input.quantity)?;

        let now = Utc::now().into();
        let reservation = stock_reservations::ActiveModel {
            id: Set(Uuid::now_v7()),
            product_variant_id: Set(input.product_variant_id.into_inner()),
            location_id: Set(input.location_id.into_inner()),
            quantity: Set(input.quantity),
            reserved_for: Set(input.reserved_for.into()),
            reference_id: Set(input.reference_id),
            status: Set(ReservationStatus::Active),
            expires_at: Set(input.expires_at.map(Into::into)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(
            reservation_id = %reservation.id,
            quantity = %reservation.quantity,
            "stock reserved"
        );
        Ok(reservation)
    }

    /// Consumes a document's reservations of one variant, oldest first.
    ///
    /// With `location_id` set, only reservations held at that location are
    /// consumed.
    ///
    /// # Errors
    ///
    /// Returns an error if `quantity` is not positive.
    pub async fn consume(
        &self,
        reference_id: &str,
        product_variant_id: ProductVariantId,
        location_id: Option<LocationId>,
        quantity: Decimal,
    ) -> RepositoryResult<ConsumptionPlan> {
        let txn = self.db.begin().await?;
        let plan =
            Self::consume_in(&txn, reference_id, product_variant_id, location_id, quantity).await?;
        txn.commit().await?;
        Ok(plan)
    }

    /// Consumes reservations inside an open transaction.
    ///
    /// Fully consumed reservations become FULFILLED; a partially consumed one
    /// keeps the remainder ACTIVE. Quantity beyond what was reserved is
    /// reported as `unbacked`.
    ///
    /// # Errors
    ///
    /// Returns an error if `quantity` is not positive.
    pub async fn consume_in(
        txn: &DatabaseTransaction,
        reference_id: &str,
        product_variant_id: ProductVariantId,
        location_id: Option<LocationId>,
        quantity: Decimal,
    ) -> RepositoryResult<ConsumptionPlan> {
        let mut query = stock_reservations::Entity::find()
            .filter(stock_reservations::Column::ReferenceId.eq(reference_id))
            .filter(
                stock_reservations::Column::ProductVariantId
                    .eq(product_variant_id.into_inner()),
            )
            .filter(stock_reservations::Column::Status.eq(ReservationStatus::Active));
        if let Some(location_id) = location_id {
            query = query
                .filter(stock_reservations::Column::LocationId.eq(location_id.into_inner()));
        }
        let open = query
            .order_by_asc(stock_reservations::Column::CreatedAt)
            .lock_exclusive()
            .all(txn)
            .await?;

        let candidates: Vec<OpenReservation> = open.iter().map(to_open_reservation).collect();
        let plan = plan_consumption(&candidates, quantity)?;

        let now = Utc::now().into();
        for step in &plan.steps {
            let Some(model) = open.iter().find(|r| r.id == step.reservation_id) else {
                continue;
            };
            let mut active: stock_reservations::ActiveModel = model.clone().into();
            if step.is_fulfilled() {
                active.status = Set(ReservationStatus::Fulfilled);
            } else {
                active.quantity = Set(step.remaining);
            }
            active.updated_at = Set(now);
            active.update(txn).await?;
        }

        if plan.unbacked > Decimal::ZERO {
            info!(
                reference = reference_id,
                variant = %product_variant_id,
                unbacked = %plan.unbacked,
                "consumed beyond reserved quantity"
            );
        }
        Ok(plan)
    }

    /// Cancels every ACTIVE reservation of a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn cancel(&self, reference_id: &str) -> RepositoryResult<u64> {
        let result = stock_reservations::Entity::update_many()
            .col_expr(
                stock_reservations::Column::Status,
                Expr::value(ReservationStatus::Cancelled),
            )
            .col_expr(
                stock_reservations::Column::UpdatedAt,
                Expr::value(sea_orm::prelude::DateTimeWithTimeZone::from(Utc::now())),
            )
            .filter(stock_reservations::Column::ReferenceId.eq(reference_id))
            .filter(stock_reservations::Column::Status.eq(ReservationStatus::Active))
            .exec(&self.db)
            .await?;

        info!(reference = reference_id, cancelled = result.rows_affected, "reservations cancelled");
        Ok(result.rows_affected)
    }

    /// Cancels ACTIVE reservations whose expiry is at or before `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn release_expired(&self, now: DateTime<Utc>) -> RepositoryResult<u64> {
        let txn = self.db.begin().await?;

        let expired: Vec<Uuid> = stock_reservations::Entity::find()
            .filter(stock_reservations::Column::Status.eq(ReservationStatus::Active))
            .filter(stock_reservations::Column::ExpiresAt.is_not_null())
            .lock_exclusive()
            .all(&txn)
            .await?
            .iter()
            .map(to_open_reservation)
            .filter(|reservation| !reservation.is_live(now))
            .map(|reservation| reservation.id)
            .collect();

        let released = if expired.is_empty() {
            0
        } else {
            stock_reservations::Entity::update_many()
                .col_expr(
                    stock_reservations::Column::Status,
                    Expr::value(ReservationStatus::Cancelled),
                )
                .col_expr(
                    stock_reservations::Column::UpdatedAt,
                    Expr::value(sea_orm::prelude::DateTimeWithTimeZone::from(Utc::now())),
                )
                .filter(stock_reservations::Column::Id.is_in(expired))
                .exec(&txn)
                .await?
                .rows_affected
        };

        txn.commit().await?;

        if released > 0 {
            info!(released, "expired reservations released");
        }
        Ok(released)
    }

    /// Reservations of a document, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_reference(
        &self,
        reference_id: &str,
    ) -> RepositoryResult<Vec<stock_reservations::Model>> {
        Ok(stock_reservations::Entity::find()
            .filter(stock_reservations::Column::ReferenceId.eq(reference_id))
            .order_by_asc(stock_reservations::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }
}

/// Stored reservation as the domain's consumption candidate.
pub(crate) fn to_open_reservation(model: &stock_reservations::Model) -> OpenReservation {
    OpenReservation {
        id: model.id,
        quantity: model.quantity,
        created_at: model.created_at.with_timezone(&Utc),
        expires_at: model.expires_at.map(|at| at.with_timezone(&Utc)),
    }
}
