use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RulesError;
use crate::models::{AgeGroup, Regime};

/// One progressive bracket: `[min_income, max_income)` taxed at `rate_percent`.
///
/// `max_income` is `None` for the open-ended top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    /// Marginal rate as a percentage (`5` means 5%).
    pub rate_percent: Decimal,
}

impl TaxSlab {
    pub fn new(
        min_income: Decimal,
        max_income: Option<Decimal>,
        rate_percent: Decimal,
    ) -> Self {
        Self {
            min_income,
            max_income,
            rate_percent,
        }
    }
}

/// An ordered, contiguous sequence of brackets covering `[0, ∞)`.
///
/// Construction through [`SlabTable::new`] guarantees the invariant, so the
/// slab tax calculator never has to handle gaps or overlaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlabTable {
    slabs: Vec<TaxSlab>,
}

impl SlabTable {
    /// Builds a table after checking that bounds start at 0, are strictly
    /// increasing and contiguous, that only the last bracket is unbounded,
    /// and that every rate lies in `[0, 100]`.
    pub fn new(slabs: Vec<TaxSlab>) -> Result<Self, RulesError> {
        let first = slabs.first().ok_or(RulesError::EmptySlabTable)?;
        if first.min_income != Decimal::ZERO {
            return Err(RulesError::FirstBracketNotZero(first.min_income));
        }

        let last_index = slabs.len() - 1;
        for (index, slab) in slabs.iter().enumerate() {
            if slab.rate_percent < Decimal::ZERO {
                return Err(RulesError::NegativeRate {
                    index,
                    rate: slab.rate_percent,
                });
            }
            if slab.rate_percent > Decimal::ONE_HUNDRED {
                return Err(RulesError::RateAbove100 {
                    index,
                    rate: slab.rate_percent,
                });
            }

            match slab.max_income {
                Some(upper) if upper <= slab.min_income => {
                    return Err(RulesError::NonIncreasingBounds {
                        index,
                        lower: slab.min_income,
                        upper,
                    });
                }
                Some(_) if index == last_index => return Err(RulesError::LastBracketBounded),
                None if index != last_index => {
                    return Err(RulesError::UnboundedBracketNotLast(index));
                }
                _ => {}
            }

            if let (Some(upper), Some(next)) = (slab.max_income, slabs.get(index + 1)) {
                if next.min_income != upper {
                    return Err(RulesError::NotContiguous {
                        index: index + 1,
                        expected: upper,
                        found: next.min_income,
                    });
                }
            }
        }

        Ok(Self { slabs })
    }

    pub fn slabs(&self) -> &[TaxSlab] {
        &self.slabs
    }

    pub fn len(&self) -> usize {
        self.slabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slabs.is_empty()
    }

    /// Builds a table from `(lower, upper, rate%)` triples. Only used for the
    /// built-in reference tables, which are known to be well formed.
    fn reference(rows: &[(Decimal, Option<Decimal>, Decimal)]) -> Self {
        Self {
            slabs: rows
                .iter()
                .map(|&(min, max, rate)| TaxSlab::new(min, max, rate))
                .collect(),
        }
    }
}

impl<'de> Deserialize<'de> for SlabTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            slabs: Vec<TaxSlab>,
        }

        let raw = Raw::deserialize(deserializer)?;
        SlabTable::new(raw.slabs).map_err(serde::de::Error::custom)
    }
}

/// Slab tables for one regime, keyed by age group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeGroupSlabs {
    pub below_60: SlabTable,
    pub senior: SlabTable,
    pub super_senior: SlabTable,
}

impl AgeGroupSlabs {
    pub fn for_age_group(
        &self,
        age_group: AgeGroup,
    ) -> &SlabTable {
        match age_group {
            AgeGroup::Below60 => &self.below_60,
            AgeGroup::Senior => &self.senior,
            AgeGroup::SuperSenior => &self.super_senior,
        }
    }

    fn for_age_group_mut(
        &mut self,
        age_group: AgeGroup,
    ) -> &mut SlabTable {
        match age_group {
            AgeGroup::Below60 => &mut self.below_60,
            AgeGroup::Senior => &mut self.senior,
            AgeGroup::SuperSenior => &mut self.super_senior,
        }
    }
}

/// The full set of 3 age groups × 2 regimes slab tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabSchedule {
    pub old: AgeGroupSlabs,
    pub new: AgeGroupSlabs,
}

impl SlabSchedule {
    /// Returns the table for the given combination.
    pub fn table(
        &self,
        age_group: AgeGroup,
        regime: Regime,
    ) -> &SlabTable {
        match regime {
            Regime::Old => self.old.for_age_group(age_group),
            Regime::New => self.new.for_age_group(age_group),
        }
    }

    /// Replaces a single table, e.g. when loading overrides from a file.
    pub fn set_table(
        &mut self,
        age_group: AgeGroup,
        regime: Regime,
        table: SlabTable,
    ) {
        let slot = match regime {
            Regime::Old => self.old.for_age_group_mut(age_group),
            Regime::New => self.new.for_age_group_mut(age_group),
        };
        *slot = table;
    }

    /// Re-checks every table. Tables built through [`SlabTable::new`] always
    /// pass; this exists for schedules assembled field by field.
    pub fn validate(&self) -> Result<(), RulesError> {
        for regime in Regime::ALL {
            for age_group in AgeGroup::ALL {
                let table = self.table(age_group, regime);
                SlabTable::new(table.slabs.clone()).map_err(|source| {
                    RulesError::InvalidSchedule {
                        age_group,
                        regime,
                        source: Box::new(source),
                    }
                })?;
            }
        }
        Ok(())
    }

    /// FY 2025-26 reference tables.
    ///
    /// The super-senior old-regime table has no 5% bracket: it goes straight
    /// from 0% to 20% at 5,00,000.
    pub fn fy_2025_26() -> Self {
        let new_regime = SlabTable::reference(&[
            (dec!(0), Some(dec!(300000)), dec!(0)),
            (dec!(300000), Some(dec!(600000)), dec!(5)),
            (dec!(600000), Some(dec!(900000)), dec!(10)),
            (dec!(900000), Some(dec!(1200000)), dec!(15)),
            (dec!(1200000), Some(dec!(1500000)), dec!(20)),
            (dec!(1500000), None, dec!(30)),
        ]);

        Self {
            old: AgeGroupSlabs {
                below_60: SlabTable::reference(&[
                    (dec!(0), Some(dec!(250000)), dec!(0)),
                    (dec!(250000), Some(dec!(500000)), dec!(5)),
                    (dec!(500000), Some(dec!(1000000)), dec!(20)),
                    (dec!(1000000), None, dec!(30)),
                ]),
                senior: SlabTable::reference(&[
                    (dec!(0), Some(dec!(300000)), dec!(0)),
                    (dec!(300000), Some(dec!(500000)), dec!(5)),
                    (dec!(500000), Some(dec!(1000000)), dec!(20)),
                    (dec!(1000000), None, dec!(30)),
                ]),
                super_senior: SlabTable::reference(&[
                    (dec!(0), Some(dec!(500000)), dec!(0)),
                    (dec!(500000), Some(dec!(1000000)), dec!(20)),
                    (dec!(1000000), None, dec!(30)),
                ]),
            },
            new: AgeGroupSlabs {
                below_60: new_regime.clone(),
                senior: new_regime.clone(),
                super_senior: new_regime,
            },
        }
    }
}

impl Default for SlabSchedule {
    fn default() -> Self {
        Self::fy_2025_26()
    }
}
