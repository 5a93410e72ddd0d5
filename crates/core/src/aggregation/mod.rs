//! Unified-mode plumbing: concurrent fan-out, reconciliation and merging.

mod fan_out;
mod merge_policy;
mod sourced;

pub use fan_out::{reconcile, settle_all, with_deadline, LegOutcome};
pub use merge_policy::{MergePolicy, MergePolicyTable};
pub use sourced::{SourceTag, Sourced};
