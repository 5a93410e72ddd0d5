use async_trait::async_trait;
use vnstock_market_data::{ListingKind, Source};

use super::listing_model::ListingPage;
use crate::aggregation::Sourced;
use crate::errors::Result;

/// Listing operations. Listings are never merged across providers.
#[async_trait]
pub trait ListingServiceTrait: Send + Sync {
    async fn get_listing(&self, kind: &ListingKind, source: Source) -> Result<Sourced<ListingPage>>;

    async fn get_all_symbols(&self, source: Source) -> Result<Sourced<ListingPage>> {
        self.get_listing(&ListingKind::AllSymbols, source).await
    }

    async fn get_symbols_by_industries(&self, source: Source) -> Result<Sourced<ListingPage>> {
        self.get_listing(&ListingKind::SymbolsByIndustries, source)
            .await
    }

    async fn get_symbols_by_exchange(&self, source: Source) -> Result<Sourced<ListingPage>> {
        self.get_listing(&ListingKind::SymbolsByExchange, source)
            .await
    }

    async fn get_symbols_by_group(
        &self,
        group: &str,
        source: Source,
    ) -> Result<Sourced<ListingPage>> {
        self.get_listing(&ListingKind::SymbolsByGroup(group.to_string()), source)
            .await
    }

    async fn get_industries_icb(&self, source: Source) -> Result<Sourced<ListingPage>> {
        self.get_listing(&ListingKind::IndustriesIcb, source).await
    }

    async fn get_all_future_indices(&self, source: Source) -> Result<Sourced<ListingPage>> {
        self.get_listing(&ListingKind::FutureIndices, source).await
    }

    async fn get_all_covered_warrant(&self, source: Source) -> Result<Sourced<ListingPage>> {
        self.get_listing(&ListingKind::CoveredWarrants, source).await
    }

    async fn get_all_bonds(&self, source: Source) -> Result<Sourced<ListingPage>> {
        self.get_listing(&ListingKind::Bonds, source).await
    }

    async fn get_all_government_bonds(&self, source: Source) -> Result<Sourced<ListingPage>> {
        self.get_listing(&ListingKind::GovernmentBonds, source).await
    }
}
