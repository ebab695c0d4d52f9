//! Reversing entries.
//!
//! A reversal mirrors a posted entry line for line with debit and credit
//! swapped, so the pair nets to zero on every account.

use super::types::{JournalLineInput, REVERSAL_REFERENCE_TYPE, source_key};

/// Header and lines for the reversal of one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReversalPlan {
    /// Description of the reversing entry.
    pub description: String,
    /// Reference to the original entry number.
    pub reference: String,
    /// Always [`REVERSAL_REFERENCE_TYPE`].
    pub reference_type: &'static str,
    /// Key that keeps an entry from being reversed twice.
    pub source_key: String,
    /// Swapped lines, in the original order.
    pub lines: Vec<JournalLineInput>,
}

/// Stateless builder for reversing entries.
pub struct ReversalService;

impl ReversalService {
    /// Builds the reversal of an entry.
    #[must_use]
    pub fn plan(
        original_number: &str,
        original_description: &str,
        original_lines: &[JournalLineInput],
    ) -> ReversalPlan {
        ReversalPlan {
            description: format!("Reversal of {original_number}: {original_description}"),
            reference: original_number.to_string(),
            reference_type: REVERSAL_REFERENCE_TYPE,
            source_key: source_key(REVERSAL_REFERENCE_TYPE, original_number),
            lines: Self::swap_lines(original_lines),
        }
    }

    /// Swaps debit and credit on every line.
    #[must_use]
    pub fn swap_lines(lines: &[JournalLineInput]) -> Vec<JournalLineInput> {
        lines
            .iter()
            .map(|line| JournalLineInput {
                account_id: line.account_id,
                debit: line.credit,
                credit: line.debit,
                description: Some(match &line.description {
                    Some(memo) => format!("Reversal: {memo}"),
                    None => "Reversal".to_string(),
                }),
            })
            .collect()
    }
}
