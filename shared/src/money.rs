//! Money helpers using rust_decimal for precision
//!
//! Amounts travel as `f64` on the wire and in the breakdowns handed to the
//! UI. Arithmetic goes through `Decimal` and the result is rounded back to
//! two places, half away from zero.

use rust_decimal::prelude::*;

/// Decimal places shown for any amount
pub const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert f64 to Decimal for calculation; NaN and infinities become zero
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Optional amount as a non-negative Decimal (missing or negative → 0)
#[inline]
pub fn non_negative(value: Option<f64>) -> Decimal {
    value.map(to_decimal).unwrap_or_default().max(Decimal::ZERO)
}

/// Render an amount with exactly two decimals (`45.5` → `"45.50"`)
pub fn format_money(value: f64) -> String {
    let rounded = to_decimal(value)
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Parse an amount as rendered by [`format_money`]
///
/// Accepts surrounding whitespace and thousands separators.
pub fn parse_money(text: &str) -> Option<f64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned).ok().map(to_f64)
}

/// Two amounts are equal once rounded to cents
pub fn money_eq(a: f64, b: f64) -> bool {
    (to_decimal(a) - to_decimal(b)).abs() < MONEY_TOLERANCE
}
