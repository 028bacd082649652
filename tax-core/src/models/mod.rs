mod age_group;
mod comparison;
mod regime;
mod slab_table;
mod suggestion;
mod tax_result;
mod taxpayer_profile;

pub use age_group::AgeGroup;
pub use comparison::RegimeComparison;
pub use regime::Regime;
pub use slab_table::{AgeGroupSlabs, SlabSchedule, SlabTable, TaxSlab};
pub use suggestion::{Suggestion, SuggestionCategory};
pub use tax_result::{AppliedDeductions, SlabBreakdown, TaxResult};
pub use taxpayer_profile::{Deductions, HraDetails, Location, MAX_AMOUNT, TaxpayerProfile};
