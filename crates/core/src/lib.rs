//! VNStock Core - aggregation services over the market-data adapters.
//!
//! This crate decides which provider answers a request. Single-source
//! requests go to one adapter; unified company requests fan out to every
//! adapter and merge what comes back. It holds no I/O of its own and is
//! driven through the `ProviderFactoryTrait` from `vnstock-market-data`.

pub mod aggregation;
pub mod company;
pub mod constants;
pub mod errors;
pub mod financial;
pub mod listing;
pub mod sources;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregation::{MergePolicy, MergePolicyTable, SourceTag, Sourced};
pub use company::{CompanyService, CompanyServiceTrait};
pub use financial::{FinancialService, FinancialServiceTrait};
pub use listing::{ListingPage, ListingService, ListingServiceTrait};
pub use sources::{coerce_single, parse_source, SourceMode};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
