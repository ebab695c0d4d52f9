//! Decimal helpers for amounts, quantities, and unit costs.
//!
//! CRITICAL: Never use floating-point for money calculations. Everything here
//! works on `rust_decimal::Decimal`.

use std::borrow::Borrow;

use rust_decimal::Decimal;

/// Decimal places of the smallest currency unit. Journal amounts must not be
/// more precise than this.
pub const AMOUNT_SCALE: u32 = 2;

/// Decimal places kept for stock quantities.
pub const QUANTITY_SCALE: u32 = 4;

/// Decimal places kept for moving-average unit costs.
pub const COST_SCALE: u32 = 4;

/// Returns true if `value` has no more than `scale` significant decimal places.
#[must_use]
pub fn fits_scale(value: Decimal, scale: u32) -> bool {
    value.normalize().scale() <= scale
}

/// Formats a decimal with thousands separators, for human-readable messages.
///
/// Trailing fractional zeros are dropped: `1000000.00` renders as `1,000,000`.
#[must_use]
pub fn format_amount(value: impl Borrow<Decimal>) -> String {
    let normalized = value.borrow().normalize();
    let digits = normalized.abs().to_string();
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if normalized.is_sign_negative() && !normalized.is_zero() {
        out.push('-');
    }
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}
