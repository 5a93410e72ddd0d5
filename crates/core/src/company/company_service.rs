use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, warn};
use vnstock_market_data::{
    CategoryData, CategoryResults, CompanyCategory, CompanyInfo, ErrorClass, MarketDataError,
    ProviderFactoryTrait, ProviderId, Source, Symbol,
};

use super::company_traits::CompanyServiceTrait;
use crate::aggregation::{
    reconcile, settle_all, with_deadline, LegOutcome, MergePolicyTable, SourceTag, Sourced,
};
use crate::constants::DEFAULT_LEG_TIMEOUT;
use crate::errors::{Error, Result};

/// Company data over the TCBS and VCI adapters.
pub struct CompanyService {
    factory: Arc<dyn ProviderFactoryTrait>,
    merge_policies: MergePolicyTable,
    leg_timeout: Duration,
}

impl CompanyService {
    pub fn new(factory: Arc<dyn ProviderFactoryTrait>) -> Self {
        Self {
            factory,
            merge_policies: MergePolicyTable::default(),
            leg_timeout: DEFAULT_LEG_TIMEOUT,
        }
    }

    pub fn with_merge_policies(mut self, merge_policies: MergePolicyTable) -> Self {
        self.merge_policies = merge_policies;
        self
    }

    pub fn with_leg_timeout(mut self, leg_timeout: Duration) -> Self {
        self.leg_timeout = leg_timeout;
        self
    }

    async fn fetch_single(
        &self,
        provider: ProviderId,
        symbol: &Symbol,
        category: CompanyCategory,
    ) -> Result<Sourced<CategoryData>> {
        let adapter = self.factory.company(provider);
        let data = with_deadline(
            provider,
            self.leg_timeout,
            adapter.get_category(symbol, category),
        )
        .await?;
        debug!(
            "{} for {} from {}: {} entries",
            category.operation(),
            symbol,
            provider,
            data.len()
        );
        Ok(Sourced::new(data, SourceTag::Provider(provider)))
    }

    async fn fetch_unified(
        &self,
        symbol: &Symbol,
        category: CompanyCategory,
    ) -> Result<Sourced<CategoryData>> {
        let legs = ProviderId::ALL.into_iter().map(|provider| {
            let adapter = self.factory.company(provider);
            (provider, async move {
                adapter.get_category(symbol, category).await
            })
        });
        let outcomes = settle_all(legs, self.leg_timeout).await;
        reconcile(category.operation(), outcomes, |parts| {
            self.merge_policies.merge(category, parts)
        })
    }

    /// Every category from one provider in a single batch under the leg
    /// deadline. A batch-wide failure is charged to each category.
    async fn fetch_batch(&self, provider: ProviderId, symbol: &Symbol) -> CategoryResults {
        let adapter = self.factory.company(provider);
        let batch = adapter.get_categories(symbol, &CompanyCategory::ALL);
        match with_deadline(provider, self.leg_timeout, batch).await {
            Ok(results) => results,
            Err(e) => CompanyCategory::ALL
                .into_iter()
                .map(|category| (category, Err(e.clone())))
                .collect(),
        }
    }

    /// Settles one category of a company-info batch the way `get_category`
    /// would have: `single` propagates that provider's error unchanged.
    fn settle_category(
        &self,
        category: CompanyCategory,
        mut outcomes: Vec<LegOutcome<CategoryData>>,
        single: Option<ProviderId>,
    ) -> Result<Sourced<CategoryData>> {
        if let Some(provider) = single {
            let data = match outcomes.pop() {
                Some(outcome) => outcome.result?,
                None => {
                    return Err(MarketDataError::not_supported(
                        category.operation(),
                        provider.as_str(),
                    )
                    .into())
                }
            };
            return Ok(Sourced::new(data, SourceTag::Provider(provider)));
        }
        reconcile(category.operation(), outcomes, |parts| {
            self.merge_policies.merge(category, parts)
        })
    }
}

/// Unified when categories disagree or any was merged, else the one provider.
fn combined_tag(tags: &[SourceTag]) -> Option<SourceTag> {
    let first = *tags.first()?;
    if tags.iter().all(|tag| *tag == first) {
        Some(first)
    } else {
        Some(SourceTag::Unified)
    }
}

#[async_trait]
impl CompanyServiceTrait for CompanyService {
    async fn get_category(
        &self,
        symbol: &Symbol,
        source: Source,
        category: CompanyCategory,
    ) -> Result<Sourced<CategoryData>> {
        match source.single() {
            Some(provider) => self.fetch_single(provider, symbol, category).await,
            None => self.fetch_unified(symbol, category).await,
        }
    }

    async fn get_company_info(
        &self,
        symbol: &Symbol,
        source: Source,
    ) -> Result<Sourced<CompanyInfo>> {
        let providers = match source.single() {
            Some(provider) => vec![provider],
            None => ProviderId::ALL.to_vec(),
        };
        let batches = join_all(
            providers
                .iter()
                .map(|&provider| async move { (provider, self.fetch_batch(provider, symbol).await) }),
        )
        .await;

        let mut legs: HashMap<CompanyCategory, Vec<LegOutcome<CategoryData>>> = HashMap::new();
        for (provider, results) in batches {
            for (category, result) in results {
                legs.entry(category)
                    .or_default()
                    .push(LegOutcome { provider, result });
            }
        }
        let results: Vec<_> = CompanyCategory::ALL
            .into_iter()
            .map(|category| {
                let outcomes = legs.remove(&category).unwrap_or_default();
                (category, self.settle_category(category, outcomes, source.single()))
            })
            .collect();

        let mut info = CompanyInfo::default();
        let mut tags = Vec::with_capacity(results.len());
        let mut profile_error = None;

        for (category, result) in results {
            match result {
                Ok(sourced) => {
                    tags.push(sourced.source);
                    info.set(category, sourced.data);
                }
                Err(e) => {
                    if e.class() == Some(ErrorClass::NotSupported) {
                        debug!("{} unavailable for {} ({}): {}", category, symbol, source, e);
                    } else {
                        warn!("{} unavailable for {} ({}): {}", category, symbol, source, e);
                    }
                    info.unavailable.push(category);
                    if category == CompanyCategory::Profile {
                        profile_error = Some(e);
                    }
                }
            }
        }

        match combined_tag(&tags) {
            Some(tag) => Ok(Sourced::new(info, tag)),
            None => Err(profile_error.unwrap_or_else(|| Error::AggregateFailure {
                operation: "get_company_info".to_string(),
                failures: Vec::new(),
            })),
        }
    }
}
