//! Deduction aggregation.
//!
//! This is the only place where the regime decides which deductions count.
//! The old regime applies each category up to its cap plus the HRA
//! exemption; the new regime applies nothing beyond the standard deduction,
//! whatever the taxpayer submitted.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{clamp_to_cap, non_negative};
use crate::calculations::hra::hra_exemption;
use crate::models::{AgeGroup, AppliedDeductions, Deductions, HraDetails};
use crate::rules::{DeductionCaps, DeductionPolicy, HraRules};

/// Applies the regime's deduction policy.
///
/// HRA is only evaluated under a capped policy, so the new regime never runs
/// the HRA calculator and always reports a zero exemption.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::aggregate_deductions;
/// use tax_core::{AgeGroup, Deductions, HraDetails, Regime, TaxRules};
///
/// let rules = TaxRules::default();
/// let submitted = Deductions {
///     section_80c: dec!(999999),
///     section_80d: dec!(30000),
///     home_loan_interest: dec!(0),
/// };
///
/// let old = aggregate_deductions(
///     &rules.regime(Regime::Old).deductions,
///     AgeGroup::Below60,
///     &submitted,
///     &HraDetails::default(),
///     &rules.hra,
/// );
/// assert_eq!(old.section_80c, dec!(150000));
/// assert_eq!(old.section_80d, dec!(25000));
///
/// let new = aggregate_deductions(
///     &rules.regime(Regime::New).deductions,
///     AgeGroup::Below60,
///     &submitted,
///     &HraDetails::default(),
///     &rules.hra,
/// );
/// assert_eq!(new.total(), dec!(0));
/// ```
pub fn aggregate_deductions(
    policy: &DeductionPolicy,
    age_group: AgeGroup,
    deductions: &Deductions,
    hra_details: &HraDetails,
    hra_rules: &HraRules,
) -> AppliedDeductions {
    match policy {
        DeductionPolicy::StandardOnly => AppliedDeductions::default(),
        DeductionPolicy::Capped(caps) => {
            let exemption = hra_exemption(hra_details, hra_rules);
            apply_caps(caps, age_group, deductions, exemption)
        }
    }
}

/// Clamps every submitted category into `[0, cap]` and adds the HRA
/// exemption (floored at zero).
pub fn apply_caps(
    caps: &DeductionCaps,
    age_group: AgeGroup,
    deductions: &Deductions,
    hra_exemption: Decimal,
) -> AppliedDeductions {
    let applied = AppliedDeductions {
        section_80c: clamp_logged("section 80C", deductions.section_80c, caps.section_80c),
        section_80d: clamp_logged(
            "section 80D",
            deductions.section_80d,
            caps.section_80d_for(age_group),
        ),
        hra_exemption: non_negative(hra_exemption),
        home_loan_interest: clamp_logged(
            "home loan interest",
            deductions.home_loan_interest,
            caps.home_loan_interest,
        ),
    };

    debug!(total = %applied.total(), ?applied, "aggregated deductions");
    applied
}

fn clamp_logged(
    category: &'static str,
    submitted: Decimal,
    cap: Decimal,
) -> Decimal {
    let applied = clamp_to_cap(submitted, cap);
    if applied != submitted {
        debug!(category, %submitted, %cap, %applied, "clamped deduction");
    }
    applied
}
