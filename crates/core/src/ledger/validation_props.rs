//! Property-based tests for journal line validation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::LedgerError;
use super::reversal::ReversalService;
use super::types::JournalLineInput;
use super::validation::validate_lines;

/// Strategy to generate a valid positive amount (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a balanced line set: N debits, one credit for the sum.
fn balanced_lines() -> impl Strategy<Value = Vec<JournalLineInput>> {
    prop::collection::vec(positive_amount(), 1..8).prop_map(|amounts| {
        let total: Decimal = amounts.iter().copied().sum();
        let mut lines: Vec<JournalLineInput> = amounts
            .into_iter()
            .map(|amount| JournalLineInput::debit(Uuid::new_v4(), amount))
            .collect();
        lines.push(JournalLineInput::credit(Uuid::new_v4(), total));
        lines
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any balanced line set passes, and the totals agree with both sides.
    #[test]
    fn prop_balanced_entries_accepted(lines in balanced_lines()) {
        let totals = validate_lines(&lines).unwrap();
        prop_assert_eq!(totals.total_debit, totals.total_credit);
    }

    /// Nudging one line by a single cent always breaks the balance.
    #[test]
    fn prop_off_by_one_cent_rejected(lines in balanced_lines()) {
        let mut lines = lines;
        let last = lines.len() - 1;
        lines[last].credit += Decimal::new(1, 2);
        let result = validate_lines(&lines);
        prop_assert!(
            matches!(result, Err(LedgerError::Unbalanced { .. })),
            "expected unbalanced, got {:?}",
            result
        );
    }

    /// A line with both sides set is rejected even when totals balance.
    #[test]
    fn prop_both_sides_rejected(a in positive_amount(), b in positive_amount()) {
        let lines = vec![
            JournalLineInput {
                account_id: Uuid::new_v4(),
                debit: a,
                credit: b,
                description: None,
            },
            JournalLineInput::debit(Uuid::new_v4(), b),
            JournalLineInput::credit(Uuid::new_v4(), a),
        ];
        let rejected = matches!(
            validate_lines(&lines),
            Err(LedgerError::BothSidesSet { line: 1 })
        );
        prop_assert!(rejected);
    }

    /// The reversal of a valid entry is itself valid.
    #[test]
    fn prop_reversal_stays_balanced(lines in balanced_lines()) {
        let reversed = ReversalService::swap_lines(&lines);
        prop_assert_eq!(reversed.len(), lines.len());
        prop_assert!(validate_lines(&reversed).is_ok());
        for (original, mirror) in lines.iter().zip(&reversed) {
            prop_assert_eq!(original.debit, mirror.credit);
            prop_assert_eq!(original.credit, mirror.debit);
        }
    }
}
