//! Fiscal period types.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ledger::LedgerError;

/// Status of a fiscal period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FiscalPeriodStatus {
    /// Entries may be created, edited, posted, and voided.
    Open,
    /// Nothing dated inside the period may change.
    Closed,
}

impl FiscalPeriodStatus {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
        }
    }
}

/// A monthly fiscal period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalPeriod {
    /// Unique identifier.
    pub id: Uuid,
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Period name (e.g., "January 2026").
    pub name: String,
    /// Start date of the period.
    pub start_date: NaiveDate,
    /// End date of the period.
    pub end_date: NaiveDate,
    /// Current status.
    pub status: FiscalPeriodStatus,
}

impl FiscalPeriod {
    /// Returns true if entries dated in this period may change.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == FiscalPeriodStatus::Open
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// Calendar bounds of one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthBounds {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Display name, e.g. "March 2026".
    pub name: String,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
}

impl MonthBounds {
    /// Computes the bounds of `year`-`month`.
    ///
    /// # Errors
    ///
    /// `InvalidPeriod` for a month outside 1..=12 or an unrepresentable year.
    pub fn of(year: i32, month: u32) -> Result<Self, LedgerError> {
        let invalid = || LedgerError::InvalidPeriod { year, month };
        let start_date = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let end_date = next_month.and_then(|d| d.pred_opt()).ok_or_else(invalid)?;
        Ok(Self {
            year,
            month,
            name: format!("{} {year}", month_name(month)),
            start_date,
            end_date,
        })
    }

    /// Bounds of the month containing `date`.
    ///
    /// # Errors
    ///
    /// Only for dates at the very edge of the calendar range.
    pub fn containing(date: NaiveDate) -> Result<Self, LedgerError> {
        Self::of(date.year(), date.month())
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}

/// Stateless period gate.
pub struct PeriodGuard;

impl PeriodGuard {
    /// Checks that `date` lies in an OPEN period.
    ///
    /// `period` is the period covering `date`, if any.
    ///
    /// # Errors
    ///
    /// `NoFiscalPeriod` when nothing covers the date, `PeriodClosed` when the
    /// covering period is closed.
    pub fn ensure_open(period: Option<&FiscalPeriod>, date: NaiveDate) -> Result<(), LedgerError> {
        match period {
            Some(p) if p.contains_date(date) && p.is_open() => Ok(()),
            Some(p) if p.contains_date(date) => Err(LedgerError::PeriodClosed {
                period: p.name.clone(),
                date,
            }),
            _ => Err(LedgerError::NoFiscalPeriod(date)),
        }
    }

    /// Checks that a period can be closed.
    ///
    /// # Errors
    ///
    /// `PeriodAlreadyClosed` if it is not OPEN.
    pub fn ensure_closable(period: &FiscalPeriod) -> Result<(), LedgerError> {
        if period.is_open() {
            Ok(())
        } else {
            Err(LedgerError::PeriodAlreadyClosed(period.name.clone()))
        }
    }
}
