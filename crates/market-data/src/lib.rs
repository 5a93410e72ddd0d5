//! VNStock Market Data Crate
//!
//! Source adapters for Vietnamese stock-market reference data.
//!
//! # Overview
//!
//! The crate supports:
//! - Two upstream providers: TCBS and VCI (Vietcap)
//! - Company data: profile, officers, shareholders, insider dealing,
//!   subsidiaries, events, news, dividends
//! - Financial statements: balance sheet, income statement, cash flow, ratios
//! - Listings: symbols, industries, groups, derivatives, warrants, bonds
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |  Request source  | --> | resolve_provider |  (unknown -> TCBS, with warning)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | ProviderFactory  |  (ProviderId -> adapter)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |     Adapter      |  (TcbsProvider, VciProvider)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  Record / Rows   |  (provider field names)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Symbol`] - Upper-cased, validated ticker
//! - [`ProviderId`] - Concrete provider (TCBS or VCI)
//! - [`Source`] - Request directive (TCBS, VCI or unified)
//! - [`Record`] - One provider row as a JSON object
//! - [`CompanyInfo`] - Per-symbol company aggregate
//! - [`ListingTable`] - Provider-native listing payload

pub mod errors;
pub mod models;
pub mod provider;
pub mod utils;

// Re-export all public types from models
pub use models::{
    drop_empty_rows, CategoryData, CompanyCategory, CompanyInfo, Language, ListingKind,
    ListingTable, Period, ProviderId, Record, Rows, Source, StatementKind, StatementQuery, Symbol,
    DEFAULT_SYMBOL_GROUP,
};

// Re-export provider types
pub use provider::tcbs::TcbsProvider;
pub use provider::vci::VciProvider;
pub use provider::{
    resolve_provider, CategoryResults, CompanyProvider, FinancialProvider, ListingProvider, ProviderCapabilities,
    ProviderFactory, ProviderFactoryTrait, ResolvedProvider, DEFAULT_PROVIDER,
};

// Re-export error types
pub use errors::{ErrorClass, MarketDataError};
