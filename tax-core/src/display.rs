//! Currency display contract.
//!
//! Wherever a total is shown to a person it is rounded to whole rupees and
//! grouped the Indian way: the last three digits, then groups of two
//! (`12,34,567`). The engine itself never rounds; only this module does.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::TaxSlab;

/// Rounds to whole rupees, half away from zero.
pub fn round_to_rupee(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount with Indian digit grouping and no decimal places.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::display::format_indian;
///
/// assert_eq!(format_indian(dec!(1234567.5)), "12,34,568");
/// assert_eq!(format_indian(dec!(999)), "999");
/// assert_eq!(format_indian(dec!(-150000)), "-1,50,000");
/// ```
pub fn format_indian(amount: Decimal) -> String {
    let rounded = round_to_rupee(amount);
    if rounded.is_zero() {
        return "0".to_string();
    }

    let digits = rounded.abs().trunc().to_string();
    let digits = digits.split('.').next().unwrap_or_default();
    let grouped = group_indian(digits);

    if rounded < Decimal::ZERO {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Formats an amount as rupees, e.g. `₹1,50,000`.
pub fn format_rupees(amount: Decimal) -> String {
    let formatted = format_indian(amount);
    match formatted.strip_prefix('-') {
        Some(magnitude) => format!("-₹{magnitude}"),
        None => format!("₹{formatted}"),
    }
}

/// Range label for a bracket, e.g. `"2,50,000 - 5,00,000"` or `"15,00,000 - ∞"`.
pub fn slab_range_label(slab: &TaxSlab) -> String {
    let upper = slab
        .max_income
        .map(format_indian)
        .unwrap_or_else(|| "∞".to_string());
    format!("{} - {}", format_indian(slab.min_income), upper)
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), last_three)
}
