//! Progressive slab tax.
//!
//! Brackets are walked in ascending order. Each bracket taxes the part of
//! income between its lower bound and `min(income, upper bound)`, and the
//! walk stops at the first bracket whose lower bound is at or above the
//! income. No rounding is applied.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::min;
use crate::display::slab_range_label;
use crate::models::{SlabBreakdown, SlabTable};

/// Total slab tax and its per-bracket breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabTaxOutcome {
    pub total_tax: Decimal,
    /// Brackets that taxed a non-zero amount, lowest first.
    pub breakdown: Vec<SlabBreakdown>,
}

/// Applies a slab table to taxable income.
///
/// Income at or below zero yields zero tax and an empty breakdown.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::calculate_slab_tax;
/// use tax_core::{AgeGroup, Regime, SlabSchedule};
///
/// let schedule = SlabSchedule::default();
/// let table = schedule.table(AgeGroup::Below60, Regime::New);
///
/// let outcome = calculate_slab_tax(dec!(725000), table);
///
/// // 5% × 3,00,000 + 10% × 1,25,000
/// assert_eq!(outcome.total_tax, dec!(27500));
/// assert_eq!(outcome.breakdown.len(), 3);
/// ```
pub fn calculate_slab_tax(
    taxable_income: Decimal,
    table: &SlabTable,
) -> SlabTaxOutcome {
    let mut outcome = SlabTaxOutcome::default();

    for slab in table.slabs() {
        if taxable_income <= slab.min_income {
            break;
        }

        let ceiling = match slab.max_income {
            Some(upper) => min(taxable_income, upper),
            None => taxable_income,
        };
        let taxable_amount = ceiling - slab.min_income;
        let tax = taxable_amount * slab.rate_percent / Decimal::ONE_HUNDRED;

        if taxable_amount > Decimal::ZERO {
            outcome.breakdown.push(SlabBreakdown {
                range: slab_range_label(slab),
                taxable_amount,
                rate_percent: slab.rate_percent,
                tax,
            });
        }
        outcome.total_tax += tax;
    }

    outcome
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{AgeGroup, Regime, SlabSchedule};

    fn table(
        age_group: AgeGroup,
        regime: Regime,
    ) -> SlabTable {
        SlabSchedule::default().table(age_group, regime).clone()
    }

    #[test]
    fn zero_income_has_no_tax_and_no_breakdown() {
        let outcome = calculate_slab_tax(dec!(0), &table(AgeGroup::Below60, Regime::Old));

        assert_eq!(outcome, SlabTaxOutcome::default());
    }

    #[test]
    fn income_inside_zero_rate_bracket_reports_that_bracket() {
        let outcome = calculate_slab_tax(dec!(200000), &table(AgeGroup::Below60, Regime::Old));

        assert_eq!(outcome.total_tax, dec!(0));
        assert_eq!(
            outcome.breakdown,
            vec![SlabBreakdown {
                range: "0 - 2,50,000".to_string(),
                taxable_amount: dec!(200000),
                rate_percent: dec!(0),
                tax: dec!(0),
            }]
        );
    }

    #[test]
    fn income_at_lower_bound_does_not_enter_next_bracket() {
        let outcome = calculate_slab_tax(dec!(250000), &table(AgeGroup::Below60, Regime::Old));

        assert_eq!(outcome.total_tax, dec!(0));
        assert_eq!(outcome.breakdown.len(), 1);
    }

    #[test]
    fn old_regime_below_60_second_bracket() {
        let outcome = calculate_slab_tax(dec!(450000), &table(AgeGroup::Below60, Regime::Old));

        // 5% × (4,50,000 - 2,50,000)
        assert_eq!(outcome.total_tax, dec!(10000));
        assert_eq!(outcome.breakdown[1].taxable_amount, dec!(200000));
        assert_eq!(outcome.breakdown[1].tax, dec!(10000));
    }

    #[test]
    fn old_regime_below_60_top_bracket() {
        let outcome = calculate_slab_tax(dec!(1200000), &table(AgeGroup::Below60, Regime::Old));

        // 12,500 + 1,00,000 + 30% × 2,00,000
        assert_eq!(outcome.total_tax, dec!(172500));
        assert_eq!(outcome.breakdown.len(), 4);
        assert_eq!(outcome.breakdown[3].range, "10,00,000 - ∞");
        assert_eq!(outcome.breakdown[3].tax, dec!(60000));
    }

    #[test]
    fn super_senior_jumps_from_zero_to_twenty_percent() {
        let outcome = calculate_slab_tax(dec!(600000), &table(AgeGroup::SuperSenior, Regime::Old));

        assert_eq!(outcome.total_tax, dec!(20000));
        assert_eq!(outcome.breakdown[1].rate_percent, dec!(20));
    }

    #[test]
    fn new_regime_all_brackets() {
        let outcome = calculate_slab_tax(dec!(1600000), &table(AgeGroup::Below60, Regime::New));

        // 15,000 + 30,000 + 45,000 + 60,000 + 30,000
        assert_eq!(outcome.total_tax, dec!(180000));
        let rates: Vec<_> = outcome.breakdown.iter().map(|b| b.rate_percent).collect();
        assert_eq!(
            rates,
            vec![dec!(0), dec!(5), dec!(10), dec!(15), dec!(20), dec!(30)]
        );
    }

    #[test]
    fn fractional_income_is_not_rounded() {
        let outcome = calculate_slab_tax(dec!(250000.50), &table(AgeGroup::Below60, Regime::Old));

        assert_eq!(outcome.total_tax, dec!(0.025));
    }

    #[test]
    fn negative_income_is_treated_as_zero() {
        let outcome = calculate_slab_tax(dec!(-100), &table(AgeGroup::Below60, Regime::New));

        assert_eq!(outcome.total_tax, dec!(0));
        assert!(outcome.breakdown.is_empty());
    }
}
