//! Error types for the tax engine.
//!
//! The engine distinguishes between bad caller input, which can only be
//! detected per request, and bad statutory configuration, which is caught
//! once when a [`TaxEngine`](crate::TaxEngine) is constructed.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{AgeGroup, Regime};

/// Errors raised while computing tax for a single profile.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaxError {
    /// An enumerated code was not recognised, or a currency field that has no
    /// statutory cap was negative or above
    /// [`MAX_AMOUNT`](crate::models::MAX_AMOUNT).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors raised when validating [`TaxRules`](crate::TaxRules) or a
/// [`SlabTable`](crate::SlabTable).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("slab table has no brackets")]
    EmptySlabTable,

    #[error("first bracket must start at 0, got {0}")]
    FirstBracketNotZero(Decimal),

    #[error("bracket {index} has upper bound {upper} not above its lower bound {lower}")]
    NonIncreasingBounds {
        index: usize,
        lower: Decimal,
        upper: Decimal,
    },

    #[error("bracket {index} starts at {found} but the previous bracket ends at {expected}")]
    NotContiguous {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("bracket {0} is unbounded but is not the last bracket")]
    UnboundedBracketNotLast(usize),

    #[error("last bracket must be unbounded")]
    LastBracketBounded,

    #[error("bracket {index} has a negative rate {rate}")]
    NegativeRate { index: usize, rate: Decimal },

    #[error("bracket {index} has a rate {rate} above 100%")]
    RateAbove100 { index: usize, rate: Decimal },

    #[error("{name} must be between 0 and 1, got {value}")]
    InvalidRate { name: &'static str, value: Decimal },

    #[error("{name} must be non-negative, got {value}")]
    NegativeAmount { name: &'static str, value: Decimal },

    #[error("invalid slab table for {age_group} / {regime} regime: {source}")]
    InvalidSchedule {
        age_group: AgeGroup,
        regime: Regime,
        #[source]
        source: Box<RulesError>,
    },
}
