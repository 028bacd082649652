//! Income-tax engine for the old and new Indian tax regimes.
//!
//! The crate exposes two pure entry points, [`compute_tax`] and
//! [`suggest_savings`], both backed by a [`TaxEngine`] over the FY 2025-26
//! reference [`TaxRules`]. Build a [`TaxEngine`] directly to use other rules.

pub mod calculations;
pub mod display;
pub mod engine;
pub mod error;
pub mod models;
pub mod rules;

use std::sync::OnceLock;

use rust_decimal::Decimal;

pub use engine::TaxEngine;
pub use error::{RulesError, TaxError};
pub use models::*;
pub use rules::{DeductionCaps, DeductionPolicy, HraRules, RebateRule, RegimeRules, TaxRules};

static REFERENCE_ENGINE: OnceLock<TaxEngine> = OnceLock::new();

/// The engine behind the free functions, built on first use.
pub fn reference_engine() -> &'static TaxEngine {
    REFERENCE_ENGINE.get_or_init(TaxEngine::default)
}

/// Computes the tax result for a profile with the reference rules.
pub fn compute_tax(profile: &TaxpayerProfile) -> Result<TaxResult, TaxError> {
    reference_engine().compute_tax(profile)
}

/// Suggestions for unused deduction limits with the reference rules.
pub fn suggest_savings(
    deductions: &Deductions,
    annual_salary: Decimal,
) -> Vec<Suggestion> {
    reference_engine().suggest_savings(deductions, annual_salary)
}
