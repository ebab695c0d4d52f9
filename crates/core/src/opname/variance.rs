//! Count variance planning.

use neraca_shared::types::{ProductVariantId, QUANTITY_SCALE, fits_scale};
use rust_decimal::Decimal;

use super::types::{CountInput, CountedLine};
use crate::inventory::InventoryError;

/// How one line came out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountOutcome {
    /// Never counted; treated as matching.
    Uncounted,
    /// Count equals the system quantity.
    Matched,
    /// More found than expected.
    Surplus(Decimal),
    /// Less found than expected.
    Shortage(Decimal),
}

impl CountOutcome {
    /// Classifies a line.
    #[must_use]
    pub fn of(line: &CountedLine) -> Self {
        let Some(counted) = line.counted_quantity else {
            return Self::Uncounted;
        };
        let variance = counted - line.system_quantity;
        if variance > Decimal::ZERO {
            Self::Surplus(variance)
        } else if variance < Decimal::ZERO {
            Self::Shortage(-variance)
        } else {
            Self::Matched
        }
    }
}

/// A line that needs an adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarianceLine {
    /// Variant adjusted.
    pub product_variant_id: ProductVariantId,
    /// `counted - system`; positive is a surplus.
    pub variance: Decimal,
    /// Quantity the inventory row is set to.
    pub counted_quantity: Decimal,
}

/// Adjustments a completed session produces.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OpnamePlan {
    /// Lines with a non-zero variance.
    pub adjustments: Vec<VarianceLine>,
    /// Lines whose count matched.
    pub matched: usize,
    /// Lines never counted.
    pub uncounted: usize,
}

/// Splits session lines into adjustments and non-adjustments.
#[must_use]
pub fn plan_adjustments(lines: &[CountedLine]) -> OpnamePlan {
    let mut plan = OpnamePlan::default();
    for line in lines {
        match CountOutcome::of(line) {
            CountOutcome::Uncounted => plan.uncounted += 1,
            CountOutcome::Matched => plan.matched += 1,
            CountOutcome::Surplus(_) | CountOutcome::Shortage(_) => {
                if let Some(counted) = line.counted_quantity {
                    plan.adjustments.push(VarianceLine {
                        product_variant_id: line.product_variant_id,
                        variance: counted - line.system_quantity,
                        counted_quantity: counted,
                    });
                }
            }
        }
    }
    plan
}

/// Rejects negative or over-precise counts.
pub fn validate_counts(counts: &[CountInput]) -> Result<(), InventoryError> {
    for count in counts {
        if count.counted_quantity < Decimal::ZERO {
            return Err(InventoryError::NegativeCount {
                product_variant_id: count.product_variant_id,
                counted: count.counted_quantity,
            });
        }
        if !fits_scale(count.counted_quantity, QUANTITY_SCALE) {
            return Err(InventoryError::ExcessPrecision(count.counted_quantity));
        }
    }
    Ok(())
}
