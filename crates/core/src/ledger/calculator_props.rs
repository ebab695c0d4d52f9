//! Property-based tests for ledger folding.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::calculator::{LedgerCalculator, PostedLine};
use super::reversal::ReversalService;
use super::types::JournalLineInput;
use crate::account::{AccountType, NormalBalance};

fn account_type_strategy() -> impl Strategy<Value = AccountType> {
    prop_oneof![
        Just(AccountType::Asset),
        Just(AccountType::Liability),
        Just(AccountType::Equity),
        Just(AccountType::Revenue),
        Just(AccountType::Expense),
    ]
}

/// (day of year offset, debit?, amount in cents)
fn movements() -> impl Strategy<Value = Vec<(u32, bool, i64)>> {
    prop::collection::vec((0u32..365, any::<bool>(), 1i64..10_000_000), 0..40)
}

fn to_lines(movements: &[(u32, bool, i64)]) -> Vec<PostedLine> {
    let base = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    movements
        .iter()
        .enumerate()
        .map(|(i, &(offset, is_debit, cents))| {
            let amount = Decimal::new(cents, 2);
            PostedLine {
                entry_id: Uuid::new_v4(),
                entry_number: format!("JE-2026-{:05}", i + 1),
                entry_date: base + chrono::Days::new(u64::from(offset)),
                entry_description: String::new(),
                line_number: 1,
                line_description: None,
                debit: if is_debit { amount } else { Decimal::ZERO },
                credit: if is_debit { Decimal::ZERO } else { amount },
            }
        })
        .collect()
}

fn direct_sum(normal: NormalBalance, lines: &[PostedLine]) -> Decimal {
    lines
        .iter()
        .map(|l| normal.balance_change(l.debit, l.credit))
        .sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Running balance of the last row equals beginning balance plus the
    /// sign-adjusted fold of every line, for every account type.
    #[test]
    fn prop_running_balance_matches_fold(
        account_type in account_type_strategy(),
        movements in movements(),
        split in 0u32..365,
    ) {
        let normal = account_type.normal_balance();
        let lines = to_lines(&movements);
        let start =
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap() + chrono::Days::new(u64::from(split));

        let ledger = LedgerCalculator::build(normal, lines.clone(), Some(start), None);

        let before: Vec<PostedLine> =
            lines.iter().filter(|l| l.entry_date < start).cloned().collect();
        prop_assert_eq!(ledger.beginning_balance, direct_sum(normal, &before));
        prop_assert_eq!(ledger.ending_balance, direct_sum(normal, &lines));

        let mut running = ledger.beginning_balance;
        for row in &ledger.rows {
            running += normal.balance_change(row.debit, row.credit);
            prop_assert_eq!(row.balance, running);
        }
        prop_assert_eq!(running, ledger.ending_balance);
    }

    /// An entry plus its reversal contribute nothing to any balance.
    #[test]
    fn prop_reversal_nets_to_zero(
        account_type in account_type_strategy(),
        cents in 1i64..100_000_000,
    ) {
        let account = Uuid::new_v4();
        let amount = Decimal::new(cents, 2);
        let original = vec![JournalLineInput::debit(account, amount)];
        let reversed = ReversalService::swap_lines(&original);
        let date = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();

        let posted: Vec<PostedLine> = original
            .iter()
            .chain(&reversed)
            .enumerate()
            .map(|(i, l)| PostedLine {
                entry_id: Uuid::new_v4(),
                entry_number: format!("JE-2026-{:05}", i + 1),
                entry_date: date,
                entry_description: String::new(),
                line_number: 1,
                line_description: None,
                debit: l.debit,
                credit: l.credit,
            })
            .collect();

        let ledger = LedgerCalculator::build(account_type.normal_balance(), posted, None, None);
        prop_assert_eq!(ledger.ending_balance, Decimal::ZERO);
    }
}
