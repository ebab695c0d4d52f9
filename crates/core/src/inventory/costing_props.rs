//! Property-based tests for moving-average costing.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::costing::{apply_inbound, moving_average};
use super::types::StockLevel;

fn quantity() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|q| Decimal::new(q, 2))
}

fn cost() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|c| Decimal::new(c, 4))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The new average always lies between the old cost and the inbound cost.
    #[test]
    fn prop_average_between_costs(
        old_qty in quantity(),
        old_cost in cost(),
        in_qty in quantity(),
        in_cost in cost(),
    ) {
        let current = StockLevel { quantity: old_qty, average_cost: old_cost };
        let new_cost = moving_average(current, in_qty, in_cost);
        let low = old_cost.min(in_cost);
        let high = old_cost.max(in_cost);
        prop_assert!(
            new_cost >= low && new_cost <= high,
            "{} not in [{}, {}]",
            new_cost,
            low,
            high
        );
    }

    /// Receiving at the current cost never moves the average.
    #[test]
    fn prop_same_cost_is_stable(old_qty in quantity(), c in cost(), in_qty in quantity()) {
        let current = StockLevel { quantity: old_qty, average_cost: c };
        prop_assert_eq!(moving_average(current, in_qty, c), c);
    }

    /// Inbound quantity is always added in full.
    #[test]
    fn prop_inbound_adds_quantity(old_qty in quantity(), in_qty in quantity(), c in cost()) {
        let current = StockLevel { quantity: old_qty, average_cost: c };
        let after = apply_inbound(current, in_qty, Some(c));
        prop_assert_eq!(after.quantity, old_qty + in_qty);
    }

    /// With nothing on hand the inbound cost wins, whatever the old cost was.
    #[test]
    fn prop_empty_stock_takes_inbound_cost(
        old_cost in cost(),
        in_qty in quantity(),
        in_cost in cost(),
    ) {
        let current = StockLevel { quantity: Decimal::ZERO, average_cost: old_cost };
        prop_assert_eq!(moving_average(current, in_qty, in_cost), in_cost);
    }
}
