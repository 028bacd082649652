//! Common utility functions for tax calculations.
//!
//! This module provides the flooring and clamping helpers shared by the
//! HRA calculator, the deduction aggregator and the rebate adjuster.

use rust_decimal::Decimal;

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Returns the minimum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::min;
///
/// assert_eq!(min(dec!(100.00), dec!(200.00)), dec!(100.00));
/// ```
pub fn min(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a < b { a } else { b }
}

/// Floors a value at zero.
pub fn non_negative(value: Decimal) -> Decimal {
    max(value, Decimal::ZERO)
}

/// Clamps a submitted amount into `[0, cap]`.
///
/// Values below zero become zero, values above the cap become the cap and
/// everything in between passes through unchanged.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::clamp_to_cap;
///
/// assert_eq!(clamp_to_cap(dec!(999999), dec!(150000)), dec!(150000));
/// assert_eq!(clamp_to_cap(dec!(-5), dec!(150000)), dec!(0));
/// assert_eq!(clamp_to_cap(dec!(42000), dec!(150000)), dec!(42000));
/// ```
pub fn clamp_to_cap(
    value: Decimal,
    cap: Decimal,
) -> Decimal {
    min(non_negative(value), non_negative(cap))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // max / min tests
    // =========================================================================

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
        assert_eq!(max(dec!(200.00), dec!(100.00)), dec!(200.00));
    }

    #[test]
    fn max_handles_negative_values() {
        assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
    }

    #[test]
    fn min_returns_smaller_value() {
        assert_eq!(min(dec!(100.00), dec!(200.00)), dec!(100.00));
        assert_eq!(min(dec!(-1), dec!(0)), dec!(-1));
    }

    // =========================================================================
    // non_negative tests
    // =========================================================================

    #[test]
    fn non_negative_floors_at_zero() {
        assert_eq!(non_negative(dec!(-0.01)), dec!(0));
        assert_eq!(non_negative(dec!(12.5)), dec!(12.5));
    }

    // =========================================================================
    // clamp_to_cap tests
    // =========================================================================

    #[test]
    fn clamp_to_cap_passes_values_within_range() {
        assert_eq!(clamp_to_cap(dec!(100000), dec!(150000)), dec!(100000));
    }

    #[test]
    fn clamp_to_cap_caps_large_values() {
        assert_eq!(clamp_to_cap(dec!(999999), dec!(150000)), dec!(150000));
    }

    #[test]
    fn clamp_to_cap_floors_negative_values() {
        assert_eq!(clamp_to_cap(dec!(-25000), dec!(25000)), dec!(0));
    }

    #[test]
    fn clamp_to_cap_at_exact_cap() {
        assert_eq!(clamp_to_cap(dec!(200000), dec!(200000)), dec!(200000));
    }
}
