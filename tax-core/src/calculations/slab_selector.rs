//! Slab table selection by age group and regime.

use crate::error::TaxError;
use crate::models::{AgeGroup, Regime, SlabSchedule, SlabTable};

/// Returns the bracket table for an age group and regime.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::select_slab_table;
/// use tax_core::{AgeGroup, Regime, SlabSchedule};
///
/// let schedule = SlabSchedule::default();
/// let table = select_slab_table(&schedule, AgeGroup::Senior, Regime::Old);
///
/// assert_eq!(table.slabs()[0].max_income, Some(dec!(300000)));
/// ```
pub fn select_slab_table(
    schedule: &SlabSchedule,
    age_group: AgeGroup,
    regime: Regime,
) -> &SlabTable {
    schedule.table(age_group, regime)
}

/// Like [`select_slab_table`] but takes the textual codes used at the input
/// boundary.
///
/// # Errors
///
/// Returns [`TaxError::InvalidInput`] when either code is not recognised.
/// There is no fallback table.
pub fn select_slab_table_by_code<'a>(
    schedule: &'a SlabSchedule,
    age_group: &str,
    regime: &str,
) -> Result<&'a SlabTable, TaxError> {
    let age_group: AgeGroup = age_group.parse()?;
    let regime: Regime = regime.parse()?;
    Ok(select_slab_table(schedule, age_group, regime))
}
