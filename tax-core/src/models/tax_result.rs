use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AgeGroup, Regime};

/// Tax attributable to one bracket of the slab table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabBreakdown {
    /// Human readable range, e.g. `"2,50,000 - 5,00,000"`.
    pub range: String,
    pub taxable_amount: Decimal,
    pub rate_percent: Decimal,
    pub tax: Decimal,
}

/// Deduction amounts actually applied, after caps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDeductions {
    pub section_80c: Decimal,
    pub section_80d: Decimal,
    pub hra_exemption: Decimal,
    pub home_loan_interest: Decimal,
}

impl AppliedDeductions {
    pub fn total(&self) -> Decimal {
        self.section_80c + self.section_80d + self.hra_exemption + self.home_loan_interest
    }
}

/// Outcome of one engine run for one regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub regime: Regime,
    pub age_group: AgeGroup,
    pub gross_salary: Decimal,
    pub standard_deduction: Decimal,
    /// Sum of the capped deductions, excluding the standard deduction.
    pub total_deductions: Decimal,
    pub taxable_income: Decimal,
    pub tax_before_rebate: Decimal,
    pub rebate: Decimal,
    pub tax_after_rebate: Decimal,
    pub cess: Decimal,
    pub final_tax: Decimal,
    pub monthly_take_home: Decimal,
    pub slab_breakdown: Vec<SlabBreakdown>,
    pub hra_exemption: Decimal,
    pub deductions: AppliedDeductions,
}

impl TaxResult {
    /// Final tax as a share of gross salary, in percent. Zero salary gives 0.
    pub fn effective_rate_percent(&self) -> Decimal {
        if self.gross_salary.is_zero() {
            return Decimal::ZERO;
        }
        self.final_tax * Decimal::ONE_HUNDRED / self.gross_salary
    }
}
