use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use vnstock_market_data::{ListingKind, ProviderFactoryTrait, ProviderId, Source};

use super::listing_model::ListingPage;
use super::listing_traits::ListingServiceTrait;
use crate::aggregation::{with_deadline, SourceTag, Sourced};
use crate::constants::{DEFAULT_LEG_TIMEOUT, DEFAULT_LISTING_PROVIDER};
use crate::errors::Result;
use crate::sources::coerce_single;

pub struct ListingService {
    factory: Arc<dyn ProviderFactoryTrait>,
    leg_timeout: Duration,
    unified_fallback: ProviderId,
}

impl ListingService {
    pub fn new(factory: Arc<dyn ProviderFactoryTrait>) -> Self {
        Self {
            factory,
            leg_timeout: DEFAULT_LEG_TIMEOUT,
            unified_fallback: DEFAULT_LISTING_PROVIDER,
        }
    }

    pub fn with_leg_timeout(mut self, leg_timeout: Duration) -> Self {
        self.leg_timeout = leg_timeout;
        self
    }
}

#[async_trait]
impl ListingServiceTrait for ListingService {
    async fn get_listing(&self, kind: &ListingKind, source: Source) -> Result<Sourced<ListingPage>> {
        let provider = coerce_single(source, self.unified_fallback, kind.operation());
        let adapter = self.factory.listing(provider);
        let table = with_deadline(provider, self.leg_timeout, adapter.get_listing(kind)).await?;

        let page = ListingPage::from(table);
        debug!("{} from {}: {} records", kind, provider, page.total_count);
        Ok(Sourced::new(page, SourceTag::Provider(provider)))
    }
}
