//! CSV input for the tax engine: batches of taxpayer profiles and slab
//! schedule overrides.

mod profile_loader;
mod slab_loader;

pub use profile_loader::{LabeledProfile, ProfileLoadError, ProfileLoader, ProfileRecord};
pub use slab_loader::{SlabLoadError, SlabRecord, SlabScheduleLoader};
