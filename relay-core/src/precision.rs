//! Price precision helpers
//!
//! Display precision for a symbol is derived from its point (the minimal
//! price increment) and ask prices are cut to that precision without
//! rounding.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Values below `1e-4` render in exponential form (`1e-5`, `2.5e-7`)
const MIN_POSITIONAL_EXPONENT: i32 = -4;

/// Number of significant decimal places for a tick size
///
/// `0.00001` gives 5, `0.01` gives 2 and integer-valued points give 0. Tiny
/// points use the exponent of their shortest rendering, so `1.5e-5` gives 5.
pub fn decimal_places(point: f64) -> u32 {
    if !point.is_finite() || point == 0.0 {
        return 0;
    }

    let exponent = decimal_exponent(point);
    if exponent < MIN_POSITIONAL_EXPONENT {
        return exponent.unsigned_abs();
    }

    fraction_digits(point)
}

/// Truncate `num` toward zero at `digits` decimal places
///
/// Returns `num` unchanged when it already has no more than `digits`
/// decimals. The cut is done on the exact decimal rendering of `num`, so
/// `truncate(1.084567, 5)` is exactly `1.08456`.
pub fn truncate(num: f64, digits: u32) -> f64 {
    if !num.is_finite() || fraction_digits(num) <= digits {
        return num;
    }

    match Decimal::from_str(&num.to_string()) {
        Ok(exact) => exact
            .round_dp_with_strategy(digits, RoundingStrategy::ToZero)
            .to_string()
            .parse()
            .unwrap_or_else(|_| truncate_scaled(num, digits)),
        // Too many digits for a 96-bit decimal
        Err(_) => truncate_scaled(num, digits),
    }
}

/// Multiply, drop the fraction, divide back
///
/// Subject to binary rounding noise; only used when the exact path can't
/// represent the value.
fn truncate_scaled(num: f64, digits: u32) -> f64 {
    let multiplier = 10f64.powi(digits as i32);
    (num * multiplier).trunc() / multiplier
}

/// Decimal exponent of the shortest round-trip rendering
fn decimal_exponent(value: f64) -> i32 {
    let rendered = format!("{:e}", value);
    rendered
        .rsplit_once('e')
        .and_then(|(_, exponent)| exponent.parse().ok())
        .unwrap_or(0)
}

/// Digits after the decimal point in the shortest positional rendering
fn fraction_digits(value: f64) -> u32 {
    let rendered = value.to_string();
    rendered
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.len() as u32)
}
