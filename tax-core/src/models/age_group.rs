use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TaxError;

/// Age bracket of the taxpayer at the end of the financial year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "below60")]
    Below60,
    #[serde(rename = "60-80")]
    Senior,
    #[serde(rename = "above80")]
    SuperSenior,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 3] = [AgeGroup::Below60, AgeGroup::Senior, AgeGroup::SuperSenior];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Below60 => "below60",
            Self::Senior => "60-80",
            Self::SuperSenior => "above80",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Below60 => "Below 60",
            Self::Senior => "60 to 80 (senior)",
            Self::SuperSenior => "Above 80 (super senior)",
        }
    }

    /// Seniors and super seniors share the higher 80D limit.
    pub fn is_senior(&self) -> bool {
        !matches!(self, Self::Below60)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "below60" | "below-60" | "below_60" => Some(Self::Below60),
            "60-80" | "senior" => Some(Self::Senior),
            "above80" | "above-80" | "above_80" | "super-senior" | "supersenior" => {
                Some(Self::SuperSenior)
            }
            _ => None,
        }
    }
}

impl FromStr for AgeGroup {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TaxError::InvalidInput(format!("unknown age group '{s}'")))
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
