//! Market data models
//!
//! This module contains the data types shared by adapters and services:
//! - `types` - The working record representation (Record, Rows)
//! - `symbol` - Canonical ticker (Symbol)
//! - `source` - Concrete providers (ProviderId) and request directives (Source)
//! - `company` - Company categories and the company aggregate (CompanyInfo)
//! - `financial` - Statement kinds, periods and query parameters
//! - `listing` - Listing operations and provider-native listing tables

mod company;
mod financial;
mod listing;
mod source;
mod symbol;
mod types;

pub use company::{CategoryData, CompanyCategory, CompanyInfo};
pub use financial::{
    drop_empty_rows, is_empty_row, Language, Period, StatementKind, StatementQuery,
};
pub use listing::{ListingKind, ListingTable, DEFAULT_SYMBOL_GROUP};
pub use source::{ProviderId, Source};
pub use symbol::Symbol;
pub use types::{records_from_values, Record, Rows};
