//! Journal entry numbers: `JE-<year>-<sequence>`.
//!
//! Sequences restart at 1 every calendar year. The sequence is zero-padded to
//! five digits and simply grows wider past 99999, so comparisons go through
//! [`EntryNumber`] rather than the rendered string.

use std::cmp::Ordering;
use std::str::FromStr;

use super::error::LedgerError;

const PREFIX: &str = "JE";

/// Parsed journal entry number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryNumber {
    /// Calendar year the sequence belongs to.
    pub year: i32,
    /// 1-based sequence within the year.
    pub sequence: i64,
}

impl EntryNumber {
    /// Creates an entry number.
    #[must_use]
    pub const fn new(year: i32, sequence: i64) -> Self {
        Self { year, sequence }
    }
}

impl std::fmt::Display for EntryNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{PREFIX}-{}-{:05}", self.year, self.sequence)
    }
}

impl FromStr for EntryNumber {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LedgerError::InvalidEntryNumber(s.to_string());
        let mut parts = s.splitn(3, '-');
        if parts.next() != Some(PREFIX) {
            return Err(invalid());
        }
        let year = parts
            .next()
            .and_then(|y| y.parse::<i32>().ok())
            .ok_or_else(invalid)?;
        let sequence = parts
            .next()
            .and_then(|n| n.parse::<i64>().ok())
            .filter(|n| *n > 0)
            .ok_or_else(invalid)?;
        Ok(Self { year, sequence })
    }
}

/// Orders two rendered entry numbers numerically, falling back to plain
/// string order for numbers that do not parse.
#[must_use]
pub fn compare_entry_numbers(a: &str, b: &str) -> Ordering {
    match (a.parse::<EntryNumber>(), b.parse::<EntryNumber>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        assert_eq!(EntryNumber::new(2026, 1).to_string(), "JE-2026-00001");
        assert_eq!(EntryNumber::new(2026, 123_456).to_string(), "JE-2026-123456");
    }

    #[test]
    fn test_parse() {
        let parsed: EntryNumber = "JE-2026-00042".parse().unwrap();
        assert_eq!(parsed, EntryNumber::new(2026, 42));
        assert!("JV-2026-00001".parse::<EntryNumber>().is_err());
        assert!("JE-2026".parse::<EntryNumber>().is_err());
        assert!("JE-2026-00000".parse::<EntryNumber>().is_err());
        assert!("JE-20x6-00001".parse::<EntryNumber>().is_err());
    }

    #[test]
    fn test_numeric_ordering_past_five_digits() {
        assert_eq!(
            compare_entry_numbers("JE-2026-99999", "JE-2026-100000"),
            Ordering::Less
        );
        assert_eq!(
            compare_entry_numbers("JE-2025-00009", "JE-2026-00001"),
            Ordering::Less
        );
    }
}
