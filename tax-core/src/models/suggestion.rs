use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionCategory {
    Section80C,
    Section80D,
    HomeLoanInterest,
}

impl fmt::Display for SuggestionCategory {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(match self {
            Self::Section80C => "section80C",
            Self::Section80D => "section80D",
            Self::HomeLoanInterest => "homeLoan",
        })
    }
}

/// A tax-saving hint for a deduction category with unused headroom.
///
/// `title` and `description` are presentation text; callers that render
/// their own copy should key off `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: SuggestionCategory,
    pub title: String,
    pub description: String,
    pub unused_limit: Decimal,
    pub potential_savings: Decimal,
}
