//! The five stages of the tax pipeline.
//!
//! Slab table selection → (HRA exemption, deduction aggregation) → taxable
//! income → slab tax → rebate and cess. Every function here is pure; the
//! stages are composed by [`TaxEngine`](crate::TaxEngine).

pub mod common;
pub mod deductions;
pub mod hra;
pub mod rebate;
pub mod slab_selector;
pub mod slab_tax;
pub mod suggestions;

pub use deductions::{aggregate_deductions, apply_caps};
pub use hra::hra_exemption;
pub use rebate::{RebateOutcome, apply_rebate_and_cess, cess, rebate_87a};
pub use slab_selector::{select_slab_table, select_slab_table_by_code};
pub use slab_tax::{SlabTaxOutcome, calculate_slab_tax};
pub use suggestions::suggest_savings;
