use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Regime, TaxResult};

/// Side-by-side outcome of both regimes for the same profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeComparison {
    pub old: TaxResult,
    pub new: TaxResult,
    /// The regime with the lower final tax; ties go to the old regime.
    pub recommended: Regime,
    pub annual_savings: Decimal,
    pub monthly_savings: Decimal,
}

impl RegimeComparison {
    pub fn from_results(
        old: TaxResult,
        new: TaxResult,
    ) -> Self {
        let recommended = if new.final_tax < old.final_tax {
            Regime::New
        } else {
            Regime::Old
        };
        let annual_savings = (old.final_tax - new.final_tax).abs();

        Self {
            old,
            new,
            recommended,
            annual_savings,
            monthly_savings: annual_savings / Decimal::from(12),
        }
    }

    pub fn result_for(
        &self,
        regime: Regime,
    ) -> &TaxResult {
        match regime {
            Regime::Old => &self.old,
            Regime::New => &self.new,
        }
    }

    pub fn recommended_result(&self) -> &TaxResult {
        self.result_for(self.recommended)
    }
}
