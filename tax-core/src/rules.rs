//! Statutory constants for one financial year.
//!
//! Everything the engine treats as law (standard deductions, deduction caps,
//! HRA shares, rebate thresholds, cess and the slab tables) lives in a single
//! immutable [`TaxRules`] value that is handed to
//! [`TaxEngine::new`](crate::TaxEngine::new). Nothing here is mutated at
//! runtime.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{Regime, TaxRules};
//!
//! let rules = TaxRules::default();
//!
//! assert_eq!(rules.regime(Regime::Old).standard_deduction, dec!(50000));
//! assert_eq!(rules.regime(Regime::New).standard_deduction, dec!(75000));
//! assert_eq!(rules.cess_rate, dec!(0.04));
//! assert!(rules.validate().is_ok());
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RulesError;
use crate::models::{AgeGroup, Regime, SlabSchedule};

/// Caps on the deductions allowed under the old regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionCaps {
    pub section_80c: Decimal,
    /// 80D limit for taxpayers below 60.
    pub section_80d: Decimal,
    /// 80D limit for seniors and super seniors.
    pub section_80d_senior: Decimal,
    pub home_loan_interest: Decimal,
}

impl DeductionCaps {
    pub fn fy_2025_26() -> Self {
        Self {
            section_80c: dec!(150000),
            section_80d: dec!(25000),
            section_80d_senior: dec!(50000),
            home_loan_interest: dec!(200000),
        }
    }

    pub fn section_80d_for(
        &self,
        age_group: AgeGroup,
    ) -> Decimal {
        if age_group.is_senior() {
            self.section_80d_senior
        } else {
            self.section_80d
        }
    }
}

/// Which deductions a regime allows on top of its standard deduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeductionPolicy {
    /// Only the standard deduction; submitted deductions and HRA are ignored.
    StandardOnly,
    /// 80C, 80D, home-loan interest and HRA exemption, each capped.
    Capped(DeductionCaps),
}

/// Section 87A rebate rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebateRule {
    /// Rebate applies when taxable income is at or below this amount.
    pub income_threshold: Decimal,
    /// Largest rebate granted; `None` forgives the whole tax.
    pub max_rebate: Option<Decimal>,
}

/// Rules specific to one regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeRules {
    pub standard_deduction: Decimal,
    pub deductions: DeductionPolicy,
    pub rebate: RebateRule,
}

/// Parameters of the minimum-of-three HRA exemption formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HraRules {
    /// Share of basic salary allowed in metro cities.
    pub metro_share: Decimal,
    /// Share of basic salary allowed elsewhere.
    pub non_metro_share: Decimal,
    /// Share of basic salary subtracted from rent paid.
    pub rent_floor_share: Decimal,
}

/// The complete statutory configuration consumed by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRules {
    pub old: RegimeRules,
    pub new: RegimeRules,
    pub hra: HraRules,
    /// Health and education cess on tax after rebate.
    pub cess_rate: Decimal,
    /// Marginal rate assumed when estimating savings from unused limits.
    pub suggestion_marginal_rate: Decimal,
    pub slabs: SlabSchedule,
}

impl TaxRules {
    /// FY 2025-26 reference values.
    pub fn fy_2025_26() -> Self {
        Self {
            old: RegimeRules {
                standard_deduction: dec!(50000),
                deductions: DeductionPolicy::Capped(DeductionCaps::fy_2025_26()),
                rebate: RebateRule {
                    income_threshold: dec!(500000),
                    max_rebate: Some(dec!(12500)),
                },
            },
            new: RegimeRules {
                standard_deduction: dec!(75000),
                deductions: DeductionPolicy::StandardOnly,
                rebate: RebateRule {
                    income_threshold: dec!(700000),
                    max_rebate: None,
                },
            },
            hra: HraRules {
                metro_share: dec!(0.50),
                non_metro_share: dec!(0.40),
                rent_floor_share: dec!(0.10),
            },
            cess_rate: dec!(0.04),
            suggestion_marginal_rate: dec!(0.30),
            slabs: SlabSchedule::fy_2025_26(),
        }
    }

    pub fn regime(
        &self,
        regime: Regime,
    ) -> &RegimeRules {
        match regime {
            Regime::Old => &self.old,
            Regime::New => &self.new,
        }
    }

    /// Caps used for savings suggestions. Falls back to the reference caps
    /// when the old regime has been configured without deductions.
    pub fn suggestion_caps(&self) -> DeductionCaps {
        match &self.old.deductions {
            DeductionPolicy::Capped(caps) => caps.clone(),
            DeductionPolicy::StandardOnly => DeductionCaps::fy_2025_26(),
        }
    }

    /// Validates every amount, rate and slab table.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError`] if:
    /// - any standard deduction, cap or rebate amount is negative
    /// - `cess_rate`, `suggestion_marginal_rate` or an HRA share is outside `[0, 1]`
    /// - any slab table breaks the contiguity invariant
    pub fn validate(&self) -> Result<(), RulesError> {
        for rules in [&self.old, &self.new] {
            non_negative("standard deduction", rules.standard_deduction)?;
            non_negative("rebate income threshold", rules.rebate.income_threshold)?;
            if let Some(max_rebate) = rules.rebate.max_rebate {
                non_negative("maximum rebate", max_rebate)?;
            }
            if let DeductionPolicy::Capped(caps) = &rules.deductions {
                non_negative("80C cap", caps.section_80c)?;
                non_negative("80D cap", caps.section_80d)?;
                non_negative("senior 80D cap", caps.section_80d_senior)?;
                non_negative("home loan interest cap", caps.home_loan_interest)?;
            }
        }

        fraction("cess rate", self.cess_rate)?;
        fraction("suggestion marginal rate", self.suggestion_marginal_rate)?;
        fraction("HRA metro share", self.hra.metro_share)?;
        fraction("HRA non-metro share", self.hra.non_metro_share)?;
        fraction("HRA rent floor share", self.hra.rent_floor_share)?;

        self.slabs.validate()
    }
}

impl Default for TaxRules {
    fn default() -> Self {
        Self::fy_2025_26()
    }
}

fn non_negative(
    name: &'static str,
    value: Decimal,
) -> Result<(), RulesError> {
    if value < Decimal::ZERO {
        return Err(RulesError::NegativeAmount { name, value });
    }
    Ok(())
}

fn fraction(
    name: &'static str,
    value: Decimal,
) -> Result<(), RulesError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(RulesError::InvalidRate { name, value });
    }
    Ok(())
}
