//! Provider capability matrix.
//!
//! Capabilities are declared statically per adapter. They are part of the
//! adapter contract and are never discovered at runtime.

use crate::models::{CompanyCategory, ListingKind, StatementKind};

/// Listing operations, without the group argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListingCapability {
    AllSymbols,
    SymbolsByIndustries,
    SymbolsByExchange,
    SymbolsByGroup,
    IndustriesIcb,
    FutureIndices,
    CoveredWarrants,
    Bonds,
    GovernmentBonds,
}

impl From<&ListingKind> for ListingCapability {
    fn from(kind: &ListingKind) -> Self {
        match kind {
            ListingKind::AllSymbols => ListingCapability::AllSymbols,
            ListingKind::SymbolsByIndustries => ListingCapability::SymbolsByIndustries,
            ListingKind::SymbolsByExchange => ListingCapability::SymbolsByExchange,
            ListingKind::SymbolsByGroup(_) => ListingCapability::SymbolsByGroup,
            ListingKind::IndustriesIcb => ListingCapability::IndustriesIcb,
            ListingKind::FutureIndices => ListingCapability::FutureIndices,
            ListingKind::CoveredWarrants => ListingCapability::CoveredWarrants,
            ListingKind::Bonds => ListingCapability::Bonds,
            ListingKind::GovernmentBonds => ListingCapability::GovernmentBonds,
        }
    }
}

/// Describes what an adapter can serve.
#[derive(Clone, Debug)]
pub struct ProviderCapabilities {
    /// Company categories with a real upstream endpoint.
    pub company: &'static [CompanyCategory],

    /// Statement families with a real upstream endpoint.
    pub statements: &'static [StatementKind],

    /// Listing operations with a real upstream endpoint.
    pub listing: &'static [ListingCapability],
}

impl ProviderCapabilities {
    pub fn supports_company(&self, category: CompanyCategory) -> bool {
        self.company.contains(&category)
    }

    pub fn supports_statement(&self, kind: StatementKind) -> bool {
        self.statements.contains(&kind)
    }

    pub fn supports_listing(&self, kind: &ListingKind) -> bool {
        self.listing.contains(&ListingCapability::from(kind))
    }
}
