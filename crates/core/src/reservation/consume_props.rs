//! Property-based tests for FIFO reservation consumption.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::consume::plan_consumption;
use super::types::OpenReservation;

fn reservations() -> impl Strategy<Value = Vec<OpenReservation>> {
    prop::collection::vec((1i64..10_000, 0i64..1_000), 0..10).prop_map(|rows| {
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        rows.into_iter()
            .map(|(qty, minute)| OpenReservation {
                id: Uuid::new_v4(),
                quantity: Decimal::new(qty, 1),
                created_at: base + Duration::minutes(minute),
                expires_at: None,
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Consumed plus unbacked always equals the requested quantity, and no
    /// reservation gives more than it holds.
    #[test]
    fn prop_quantity_conserved(held in reservations(), want in 1i64..100_000) {
        let quantity = Decimal::new(want, 1);
        let plan = plan_consumption(&held, quantity).unwrap();

        prop_assert_eq!(plan.consumed + plan.unbacked, quantity);
        let stepped: Decimal = plan.steps.iter().map(|s| s.consumed).sum();
        prop_assert_eq!(stepped, plan.consumed);
        for step in &plan.steps {
            let source = held.iter().find(|r| r.id == step.reservation_id).unwrap();
            prop_assert_eq!(step.consumed + step.remaining, source.quantity);
            prop_assert!(step.remaining >= Decimal::ZERO);
        }
    }

    /// Only the last touched reservation may be left partially consumed, and
    /// nothing is unbacked while held stock remains.
    #[test]
    fn prop_fifo_shape(held in reservations(), want in 1i64..100_000) {
        let quantity = Decimal::new(want, 1);
        let plan = plan_consumption(&held, quantity).unwrap();

        if let Some((_, earlier)) = plan.steps.split_last() {
            prop_assert!(earlier.iter().all(|s| s.is_fulfilled()));
        }
        let total_held: Decimal = held.iter().map(|r| r.quantity).sum();
        if plan.unbacked > Decimal::ZERO {
            prop_assert_eq!(plan.consumed, total_held);
        }
    }
}
