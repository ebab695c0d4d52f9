//! Moving-average costing.
//!
//! ```text
//! new_cost = (old_qty * old_cost + in_qty * in_cost) / (old_qty + in_qty)
//! ```
//!
//! When nothing valid is on hand (old quantity zero or negative) the inbound
//! cost becomes the new average outright.

use neraca_shared::types::{AMOUNT_SCALE, COST_SCALE};
use rust_decimal::{Decimal, RoundingStrategy};

use super::types::StockLevel;

/// New average cost after receiving `in_qty` at `in_cost`.
#[must_use]
pub fn moving_average(current: StockLevel, in_qty: Decimal, in_cost: Decimal) -> Decimal {
    let total = current.quantity + in_qty;
    if current.quantity <= Decimal::ZERO || total <= Decimal::ZERO {
        return round_cost(in_cost);
    }
    round_cost((current.quantity * current.average_cost + in_qty * in_cost) / total)
}

/// Stock level after an inbound leg. A missing cost keeps the current average.
#[must_use]
pub fn apply_inbound(current: StockLevel, in_qty: Decimal, in_cost: Option<Decimal>) -> StockLevel {
    StockLevel {
        quantity: current.quantity + in_qty,
        average_cost: in_cost.map_or(current.average_cost, |cost| {
            moving_average(current, in_qty, cost)
        }),
    }
}

/// Monetary value of `quantity` units at `unit_cost`, in currency units.
#[must_use]
pub fn stock_value(quantity: Decimal, unit_cost: Decimal) -> Decimal {
    (quantity * unit_cost)
        .round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

fn round_cost(cost: Decimal) -> Decimal {
    cost.round_dp_with_strategy(COST_SCALE, RoundingStrategy::MidpointAwayFromZero)
}
