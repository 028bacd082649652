use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::TaxError;
use crate::models::{AgeGroup, Regime};

/// Largest salary or HRA amount the engine accepts (₹10^15). Keeps every
/// intermediate product of the pipeline inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// City classification used by the HRA exemption formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Location {
    #[default]
    Metro,
    NonMetro,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metro => "metro",
            Self::NonMetro => "non-metro",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metro" => Some(Self::Metro),
            "non-metro" | "nonmetro" | "non_metro" => Some(Self::NonMetro),
            _ => None,
        }
    }
}

impl FromStr for Location {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TaxError::InvalidInput(format!("unknown location '{s}'")))
    }
}

impl fmt::Display for Location {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deductions as submitted by the taxpayer. Amounts may exceed the statutory
/// caps; the engine clamps them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deductions {
    pub section_80c: Decimal,
    pub section_80d: Decimal,
    pub home_loan_interest: Decimal,
}

/// Salary components used for the HRA exemption. All figures are annual.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HraDetails {
    pub basic_salary: Decimal,
    pub hra_received: Decimal,
    /// Annual rent paid, on the same basis as `basic_salary`.
    pub rent_paid: Decimal,
    pub location: Location,
}

impl HraDetails {
    /// HRA is only claimed when basic salary, HRA received and rent paid are
    /// all non-zero.
    pub fn is_claimed(&self) -> bool {
        !self.basic_salary.is_zero() && !self.hra_received.is_zero() && !self.rent_paid.is_zero()
    }
}

/// Everything the engine needs to compute one tax result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxpayerProfile {
    pub annual_salary: Decimal,
    pub age_group: AgeGroup,
    pub regime: Regime,
    #[serde(default)]
    pub deductions: Deductions,
    #[serde(default)]
    pub hra_details: HraDetails,
}

impl TaxpayerProfile {
    /// A profile with no deductions and no HRA claim.
    pub fn new(
        annual_salary: Decimal,
        age_group: AgeGroup,
        regime: Regime,
    ) -> Self {
        Self {
            annual_salary,
            age_group,
            regime,
            deductions: Deductions::default(),
            hra_details: HraDetails::default(),
        }
    }

    /// Returns a copy of this profile evaluated under another regime.
    pub fn with_regime(
        &self,
        regime: Regime,
    ) -> Self {
        Self {
            regime,
            ..self.clone()
        }
    }

    /// Rejects negative amounts that have no statutory cap to clamp them to,
    /// and amounts above [`MAX_AMOUNT`].
    ///
    /// Deduction amounts are deliberately not checked here: the deduction
    /// aggregator clamps them into `[0, cap]`.
    pub fn validate(&self) -> Result<(), TaxError> {
        let uncapped = [
            ("annual salary", self.annual_salary),
            ("basic salary", self.hra_details.basic_salary),
            ("HRA received", self.hra_details.hra_received),
            ("rent paid", self.hra_details.rent_paid),
        ];

        for (field, value) in uncapped {
            if value < Decimal::ZERO {
                return Err(TaxError::InvalidInput(format!(
                    "{field} must be non-negative, got {value}"
                )));
            }
            if value > MAX_AMOUNT {
                return Err(TaxError::InvalidInput(format!(
                    "{field} must not exceed {MAX_AMOUNT}, got {value}"
                )));
            }
        }
        Ok(())
    }
}
