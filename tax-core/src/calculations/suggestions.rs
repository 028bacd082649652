//! Tax-saving suggestions from unused deduction headroom.
//!
//! Categories are checked in a fixed order (80C, 80D, home-loan interest)
//! and a suggestion is emitted only when some of the limit is unused. The
//! savings estimate assumes a flat marginal rate rather than the taxpayer's
//! actual bracket.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::clamp_to_cap;
use crate::display::format_rupees;
use crate::models::{Deductions, Suggestion, SuggestionCategory};
use crate::rules::DeductionCaps;

/// Builds savings suggestions for the submitted deductions.
///
/// Submitted amounts are clamped into `[0, cap]` first, so an over-cap claim
/// produces no suggestion. The 80D check always uses the below-60 limit.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::suggest_savings;
/// use tax_core::{Deductions, DeductionCaps, SuggestionCategory};
///
/// let deductions = Deductions {
///     section_80c: dec!(100000),
///     section_80d: dec!(25000),
///     home_loan_interest: dec!(200000),
/// };
///
/// let suggestions = suggest_savings(
///     &deductions,
///     dec!(1200000),
///     &DeductionCaps::fy_2025_26(),
///     dec!(0.30),
/// );
///
/// assert_eq!(suggestions.len(), 1);
/// assert_eq!(suggestions[0].category, SuggestionCategory::Section80C);
/// assert_eq!(suggestions[0].potential_savings, dec!(15000));
/// ```
pub fn suggest_savings(
    deductions: &Deductions,
    annual_salary: Decimal,
    caps: &DeductionCaps,
    marginal_rate: Decimal,
) -> Vec<Suggestion> {
    let checks = [
        (
            SuggestionCategory::Section80C,
            deductions.section_80c,
            caps.section_80c,
        ),
        (
            SuggestionCategory::Section80D,
            deductions.section_80d,
            caps.section_80d,
        ),
        (
            SuggestionCategory::HomeLoanInterest,
            deductions.home_loan_interest,
            caps.home_loan_interest,
        ),
    ];

    let suggestions: Vec<Suggestion> = checks
        .into_iter()
        .filter_map(|(category, claimed, cap)| {
            let unused = cap - clamp_to_cap(claimed, cap);
            (unused > Decimal::ZERO).then(|| suggestion(category, unused, cap, marginal_rate))
        })
        .collect();

    debug!(
        %annual_salary,
        count = suggestions.len(),
        "built tax-saving suggestions"
    );
    suggestions
}

fn suggestion(
    category: SuggestionCategory,
    unused: Decimal,
    cap: Decimal,
    marginal_rate: Decimal,
) -> Suggestion {
    let (title, description) = match category {
        SuggestionCategory::Section80C => (
            "Maximize Section 80C",
            format!(
                "You can claim {} more by investing in ELSS, PPF, EPF or other 80C instruments.",
                format_rupees(unused)
            ),
        ),
        SuggestionCategory::Section80D => (
            "Health Insurance Premium",
            format!(
                "Consider health insurance to claim {} more under section 80D.",
                format_rupees(unused)
            ),
        ),
        SuggestionCategory::HomeLoanInterest => (
            "Home Loan Interest",
            format!(
                "If you have a home loan, you can claim up to {} in interest deduction.",
                format_rupees(cap)
            ),
        ),
    };

    Suggestion {
        category,
        title: title.to_string(),
        description,
        unused_limit: unused,
        potential_savings: unused * marginal_rate,
    }
}
