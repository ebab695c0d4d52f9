//! Monthly fiscal periods and the open/closed posting gate.

pub mod period;

pub use period::{FiscalPeriod, FiscalPeriodStatus, MonthBounds, PeriodGuard};
