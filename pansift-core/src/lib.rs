#![forbid(unsafe_code)]

pub mod domain;
pub mod error;
pub mod filter;
pub mod plan;
pub mod policy;
pub mod selection;
pub mod stats;

// Re-exports: stable API surface
pub use domain::{Classification, FileEntry, FileId};
pub use error::{Result, SiftError};
pub use filter::{AdFilter, Partition};
pub use plan::{EXCLUDE_RATIO_THRESHOLD, PlanOutcome, TransferPlan, TransferPlanner, plan_transfer};
pub use policy::{AdRule, FilterPolicy};
pub use selection::{IndexSelection, SelectionSet, SelectionSource};
pub use stats::PlanStats;
