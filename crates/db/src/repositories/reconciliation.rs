//! Consistency checks between the stock log, stock rows, and the journal.

use std::collections::{BTreeMap, HashSet};

use neraca_core::inventory::signed_effect;
use neraca_core::ledger::source_key;
use neraca_shared::types::{LocationId, ProductVariantId};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect};
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::entities::{inventories, journal_entries, stock_movements};
use crate::error::RepositoryResult;

/// A stock row that disagrees with the movements recorded against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockDrift {
    /// Location.
    pub location_id: LocationId,
    /// Variant.
    pub product_variant_id: ProductVariantId,
    /// Quantity on the inventory row, zero if there is none.
    pub recorded_quantity: Decimal,
    /// Sum of signed movements.
    pub movement_quantity: Decimal,
    /// `recorded_quantity - movement_quantity`.
    pub drift: Decimal,
}

/// Reconciliation repository.
#[derive(Debug, Clone)]
pub struct ReconciliationRepository {
    db: DatabaseConnection,
}

impl ReconciliationRepository {
    /// Creates a new reconciliation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Every (location, variant) whose stored quantity differs from the
    /// fold of its movements, ordered by location then variant.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    #[instrument(skip(self))]
    pub async fn stock_drift(&self) -> RepositoryResult<Vec<StockDrift>> {
        let mut folded: BTreeMap<(Uuid, Uuid), Decimal> = BTreeMap::new();
        for movement in stock_movements::Entity::find().all(&self.db).await? {
            let from = movement.from_location_id.map(LocationId::from_uuid);
            let to = movement.to_location_id.map(LocationId::from_uuid);
            for location in [from, to].into_iter().flatten() {
                *folded
                    .entry((location.into_inner(), movement.product_variant_id))
                    .or_default() += signed_effect(from, to, movement.quantity, location);
            }
        }

        let mut recorded: BTreeMap<(Uuid, Uuid), Decimal> = inventories::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| ((row.location_id, row.product_variant_id), row.quantity))
            .collect();

        let mut drifts = Vec::new();
        for (key, movement_quantity) in &folded {
            let recorded_quantity = recorded.remove(key).unwrap_or_default();
            push_drift(&mut drifts, *key, recorded_quantity, *movement_quantity);
        }
        for (key, recorded_quantity) in recorded {
            push_drift(&mut drifts, key, recorded_quantity, Decimal::ZERO);
        }
        drifts.sort_by_key(|d| (d.location_id.into_inner(), d.product_variant_id.into_inner()));

        if !drifts.is_empty() {
            warn!(rows = drifts.len(), "stock rows drift from movement log");
        }
        Ok(drifts)
    }

    /// The references of `reference_type` that have no automatic journal.
    ///
    /// A voided automatic entry still counts as the document's journal.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    #[instrument(skip(self, references), fields(count = references.len()))]
    pub async fn missing_journals(
        &self,
        reference_type: &str,
        references: &[String],
    ) -> RepositoryResult<Vec<String>> {
        if references.is_empty() {
            return Ok(Vec::new());
        }
        let keys: Vec<String> = references
            .iter()
            .map(|reference| source_key(reference_type, reference))
            .collect();

        let journaled: HashSet<String> = journal_entries::Entity::find()
            .select_only()
            .column(journal_entries::Column::SourceKey)
            .filter(journal_entries::Column::SourceKey.is_in(keys.clone()))
            .into_tuple::<Option<String>>()
            .all(&self.db)
            .await?
            .into_iter()
            .flatten()
            .collect();

        let missing: Vec<String> = references
            .iter()
            .zip(&keys)
            .filter(|(_, key)| !journaled.contains(*key))
            .map(|(reference, _)| reference.clone())
            .collect();

        if !missing.is_empty() {
            warn!(reference_type, missing = missing.len(), "documents without automatic journal");
        }
        Ok(missing)
    }
}

fn push_drift(
    drifts: &mut Vec<StockDrift>,
    (location_id, product_variant_id): (Uuid, Uuid),
    recorded_quantity: Decimal,
    movement_quantity: Decimal,
) {
    let drift = recorded_quantity - movement_quantity;
    if drift != Decimal::ZERO {
        drifts.push(StockDrift {
            location_id: LocationId::from_uuid(location_id),
            product_variant_id: ProductVariantId::from_uuid(product_variant_id),
            recorded_quantity,
            movement_quantity,
            drift,
        });
    }
}
