//! Source adapter abstractions and implementations.
//!
//! This module contains:
//! - The `CompanyProvider`, `FinancialProvider` and `ListingProvider` traits
//! - The static capability matrix each adapter declares
//! - The TCBS and VCI adapters
//! - The adapter factory
//!
//! # Architecture
//!
//! Adapters are selected through a closed [`ProviderId`](crate::models::ProviderId),
//! never by free-form strings. String identifiers from requests go through
//! [`resolve_provider`], which warns and falls back to TCBS on unknown input.
//! The virtual "unified" source is handled by the aggregation layer above.

mod capabilities;
mod factory;
mod traits;

pub mod http;
pub mod tcbs;
pub mod vci;

// Re-exports
pub use capabilities::{ListingCapability, ProviderCapabilities};
pub use factory::{
    resolve_provider, ProviderFactory, ProviderFactoryTrait, ResolvedProvider, DEFAULT_PROVIDER,
};
pub use traits::{CategoryResults, CompanyProvider, FinancialProvider, ListingProvider};
