//! Monetary rounding.
//!
//! Payroll amounts are rounded to a coarse granularity (the nearest 100 by
//! default); everything else is rounded to cents. Both use round-half-up,
//! which for the non-negative amounts in this domain is the same as rounding
//! the midpoint away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds `value` to the nearest multiple of `granularity`, half-up.
///
/// A non-positive granularity leaves the value untouched.
///
/// # Examples
///
/// ```
/// use labor_engine::calculation::round_to_nearest;
/// use rust_decimal::Decimal;
///
/// let hundred = Decimal::from(100);
/// assert_eq!(round_to_nearest(hundred, Decimal::from(5502)), Decimal::from(5500));
/// assert_eq!(round_to_nearest(hundred, Decimal::from(5550)), Decimal::from(5600));
/// ```
pub fn round_to_nearest(granularity: Decimal, value: Decimal) -> Decimal {
    if granularity <= Decimal::ZERO {
        return value;
    }
    (value / granularity).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        * granularity
}

/// Rounds a monetary amount to two decimal places, half-up.
///
/// ```
/// use labor_engine::calculation::round_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_money(Decimal::new(12345, 3)), Decimal::new(1235, 2));
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_rounds_down_below_midpoint() {
        assert_eq!(round_to_nearest(dec("100"), dec("5549.99")), dec("5500"));
    }

    #[test]
    fn test_midpoint_rounds_up() {
        assert_eq!(round_to_nearest(dec("100"), dec("150")), dec("200"));
        assert_eq!(round_to_nearest(dec("100"), dec("50")), dec("100"));
    }

    #[test]
    fn test_exact_multiple_unchanged() {
        assert_eq!(round_to_nearest(dec("100"), dec("60000")), dec("60000"));
    }

    #[test]
    fn test_zero_granularity_is_identity() {
        assert_eq!(round_to_nearest(Decimal::ZERO, dec("123.45")), dec("123.45"));
    }

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(dec("10.005")), dec("10.01"));
        assert_eq!(round_money(dec("10.004")), dec("10.00"));
    }
}
