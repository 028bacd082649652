//! HRA exemption under the minimum-of-three rule.
//!
//! The exemption is the smallest of:
//!
//! | Term | Amount |
//! |------|--------|
//! | 1    | HRA actually received |
//! | 2    | 50% of basic salary (metro) or 40% (non-metro) |
//! | 3    | Rent paid minus 10% of basic salary |
//!
//! Every term is floored at zero before the minimum is taken, so rent below
//! 10% of basic yields no exemption rather than a negative one. All inputs
//! are annual figures.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{min, non_negative};
use crate::models::{HraDetails, Location};
use crate::rules::HraRules;

/// Computes the HRA exemption, or zero when HRA is not claimed (any of
/// basic salary, HRA received or rent paid is zero).
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::hra_exemption;
/// use tax_core::{HraDetails, Location, TaxRules};
///
/// let details = HraDetails {
///     basic_salary: dec!(600000),
///     hra_received: dec!(180000),
///     rent_paid: dec!(300000),
///     location: Location::Metro,
/// };
///
/// // min(1,80,000, 3,00,000, 3,00,000 - 60,000)
/// assert_eq!(hra_exemption(&details, &TaxRules::default().hra), dec!(180000));
/// ```
pub fn hra_exemption(
    details: &HraDetails,
    rules: &HraRules,
) -> Decimal {
    if !details.is_claimed() {
        return Decimal::ZERO;
    }

    let share = match details.location {
        Location::Metro => rules.metro_share,
        Location::NonMetro => rules.non_metro_share,
    };

    let received = non_negative(details.hra_received);
    let share_of_basic = non_negative(details.basic_salary * share);
    let rent_over_floor =
        non_negative(details.rent_paid - details.basic_salary * rules.rent_floor_share);

    let exemption = non_negative(min(received, min(share_of_basic, rent_over_floor)));

    debug!(
        %received,
        %share_of_basic,
        %rent_over_floor,
        %exemption,
        location = %details.location,
        "computed HRA exemption"
    );

    exemption
}
