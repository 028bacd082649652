//! The tax engine: a single pass through the calculation stages.
//!
//! # Pipeline
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Select the slab table for (age group, regime) |
//! | 2    | Aggregate regime-eligible deductions, including HRA |
//! | 3    | Taxable income: gross - standard deduction - deductions, floored at 0 |
//! | 4    | Progressive slab tax and breakdown |
//! | 5    | Section 87A rebate, cess, final tax and monthly take-home |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{AgeGroup, Regime, TaxEngine, TaxpayerProfile};
//!
//! let engine = TaxEngine::default();
//! let profile = TaxpayerProfile::new(dec!(800000), AgeGroup::Below60, Regime::New);
//!
//! let result = engine.compute_tax(&profile).unwrap();
//!
//! assert_eq!(result.taxable_income, dec!(725000));
//! assert_eq!(result.tax_before_rebate, dec!(27500));
//! assert_eq!(result.rebate, dec!(0));
//! assert_eq!(result.cess, dec!(1100));
//! assert_eq!(result.final_tax, dec!(28600));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::non_negative;
use crate::calculations::{
    aggregate_deductions, apply_rebate_and_cess, calculate_slab_tax, select_slab_table,
    suggest_savings,
};
use crate::error::{RulesError, TaxError};
use crate::models::{
    AgeGroup, Deductions, Regime, RegimeComparison, SlabTable, Suggestion, TaxResult,
    TaxpayerProfile,
};
use crate::rules::TaxRules;

/// Stateless tax calculator bound to one set of statutory rules.
///
/// The engine holds no per-request state and is `Send + Sync`; share it
/// freely between threads.
#[derive(Debug, Clone)]
pub struct TaxEngine {
    rules: TaxRules,
}

impl TaxEngine {
    /// Creates an engine after validating the rules.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError`] if any amount, rate or slab table is invalid.
    pub fn new(rules: TaxRules) -> Result<Self, RulesError> {
        rules.validate()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &TaxRules {
        &self.rules
    }

    /// The bracket table the engine uses for a combination.
    pub fn slab_table(
        &self,
        age_group: AgeGroup,
        regime: Regime,
    ) -> &SlabTable {
        select_slab_table(&self.rules.slabs, age_group, regime)
    }

    /// Computes the tax result for a profile under its own regime.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::InvalidInput`] if the salary or an HRA-detail
    /// amount is negative or above [`MAX_AMOUNT`](crate::models::MAX_AMOUNT).
    /// No partial result is produced.
    pub fn compute_tax(
        &self,
        profile: &TaxpayerProfile,
    ) -> Result<TaxResult, TaxError> {
        profile.validate()?;

        let regime_rules = self.rules.regime(profile.regime);

        // Step 1: slab table
        let table = self.slab_table(profile.age_group, profile.regime);

        // Step 2: deductions (HRA only under a capped policy)
        let applied = aggregate_deductions(
            &regime_rules.deductions,
            profile.age_group,
            &profile.deductions,
            &profile.hra_details,
            &self.rules.hra,
        );
        let total_deductions = applied.total();

        // Step 3: taxable income
        let gross_salary = profile.annual_salary;
        let standard_deduction = regime_rules.standard_deduction;
        let taxable_income = non_negative(gross_salary - standard_deduction - total_deductions);

        // Step 4: slab tax
        let slab_tax = calculate_slab_tax(taxable_income, table);

        // Step 5: rebate and cess
        let adjusted = apply_rebate_and_cess(
            slab_tax.total_tax,
            taxable_income,
            gross_salary,
            &regime_rules.rebate,
            self.rules.cess_rate,
        );

        debug!(
            regime = %profile.regime,
            age_group = %profile.age_group,
            %gross_salary,
            %standard_deduction,
            %total_deductions,
            hra_exemption = %applied.hra_exemption,
            %taxable_income,
            tax_before_rebate = %slab_tax.total_tax,
            rebate = %adjusted.rebate,
            tax_after_rebate = %adjusted.tax_after_rebate,
            cess = %adjusted.cess,
            final_tax = %adjusted.final_tax,
            monthly_take_home = %adjusted.monthly_take_home,
            "computed tax"
        );

        Ok(TaxResult {
            regime: profile.regime,
            age_group: profile.age_group,
            gross_salary,
            standard_deduction,
            total_deductions,
            taxable_income,
            tax_before_rebate: slab_tax.total_tax,
            rebate: adjusted.rebate,
            tax_after_rebate: adjusted.tax_after_rebate,
            cess: adjusted.cess,
            final_tax: adjusted.final_tax,
            monthly_take_home: adjusted.monthly_take_home,
            slab_breakdown: slab_tax.breakdown,
            hra_exemption: applied.hra_exemption,
            deductions: applied,
        })
    }

    /// Computes the profile under both regimes and recommends the cheaper
    /// one. The profile's own regime selector is ignored.
    pub fn compare_regimes(
        &self,
        profile: &TaxpayerProfile,
    ) -> Result<RegimeComparison, TaxError> {
        let old = self.compute_tax(&profile.with_regime(Regime::Old))?;
        let new = self.compute_tax(&profile.with_regime(Regime::New))?;
        Ok(RegimeComparison::from_results(old, new))
    }

    /// Suggestions for unused deduction limits, valued at the configured
    /// marginal rate.
    pub fn suggest_savings(
        &self,
        deductions: &Deductions,
        annual_salary: Decimal,
    ) -> Vec<Suggestion> {
        suggest_savings(
            deductions,
            annual_salary,
            &self.rules.suggestion_caps(),
            self.rules.suggestion_marginal_rate,
        )
    }
}

impl Default for TaxEngine {
    /// An engine over the FY 2025-26 reference rules.
    fn default() -> Self {
        Self {
            rules: TaxRules::default(),
        }
    }
}
