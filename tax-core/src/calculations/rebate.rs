//! Section 87A rebate and health-and-education cess.
//!
//! | Step | Amount |
//! |------|--------|
//! | 1    | Rebate: `min(tax, cap)` when taxable income ≤ threshold, else 0 |
//! | 2    | Tax after rebate: `max(0, tax - rebate)` |
//! | 3    | Cess: tax after rebate × cess rate |
//! | 4    | Final tax: tax after rebate + cess |
//! | 5    | Monthly take-home: (gross salary - final tax) / 12 |
//!
//! The rebate threshold is a cliff: one rupee above it the rebate is zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{min, non_negative};
use crate::rules::RebateRule;

/// Figures produced by the rebate and cess stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebateOutcome {
    pub rebate: Decimal,
    pub tax_after_rebate: Decimal,
    pub cess: Decimal,
    pub final_tax: Decimal,
    pub monthly_take_home: Decimal,
}

/// Section 87A rebate for the given tax and taxable income.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::rebate_87a;
/// use tax_core::{Regime, TaxRules};
///
/// let rules = TaxRules::default();
/// let old = &rules.regime(Regime::Old).rebate;
///
/// assert_eq!(rebate_87a(dec!(12500), dec!(500000), old), dec!(12500));
/// assert_eq!(rebate_87a(dec!(12500.05), dec!(500001), old), dec!(0));
/// ```
pub fn rebate_87a(
    tax: Decimal,
    taxable_income: Decimal,
    rule: &RebateRule,
) -> Decimal {
    if taxable_income > rule.income_threshold {
        return Decimal::ZERO;
    }

    let tax = non_negative(tax);
    match rule.max_rebate {
        Some(cap) => min(tax, cap),
        None => tax,
    }
}

/// Cess levied on tax after rebate.
pub fn cess(
    tax_after_rebate: Decimal,
    cess_rate: Decimal,
) -> Decimal {
    tax_after_rebate * cess_rate
}

/// Runs the whole rebate and cess stage.
pub fn apply_rebate_and_cess(
    tax_before_rebate: Decimal,
    taxable_income: Decimal,
    gross_salary: Decimal,
    rule: &RebateRule,
    cess_rate: Decimal,
) -> RebateOutcome {
    let rebate = rebate_87a(tax_before_rebate, taxable_income, rule);
    let tax_after_rebate = non_negative(tax_before_rebate - rebate);
    let cess = cess(tax_after_rebate, cess_rate);
    let final_tax = tax_after_rebate + cess;
    let monthly_take_home = (gross_salary - final_tax) / Decimal::from(12);

    RebateOutcome {
        rebate,
        tax_after_rebate,
        cess,
        final_tax,
        monthly_take_home,
    }
}
