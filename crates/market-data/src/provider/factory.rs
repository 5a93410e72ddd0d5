//! Adapter factory.
//!
//! Maps a [`ProviderId`] to its adapter. Adapters are built once and shared;
//! they hold no per-request state, so handing the same instance to
//! concurrent requests is safe.

use std::sync::Arc;

use tracing::warn;

use crate::models::ProviderId;

use super::tcbs::TcbsProvider;
use super::traits::{CompanyProvider, FinancialProvider, ListingProvider};
use super::vci::VciProvider;

/// Provider substituted for unrecognized source identifiers.
pub const DEFAULT_PROVIDER: ProviderId = ProviderId::Tcbs;

/// Outcome of resolving a raw source identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedProvider {
    pub provider: ProviderId,
    /// True when the input was not recognized and the default was used.
    pub fell_back: bool,
}

/// Resolves `raw` to a provider, falling back to [`DEFAULT_PROVIDER`].
///
/// `unified` is not a provider and also falls back here; the aggregation
/// services intercept it before calling the factory.
pub fn resolve_provider(raw: &str) -> ResolvedProvider {
    match raw.parse::<ProviderId>() {
        Ok(provider) => ResolvedProvider {
            provider,
            fell_back: false,
        },
        Err(_) => {
            warn!(
                "Unknown data source '{}', defaulting to '{}'",
                raw, DEFAULT_PROVIDER
            );
            ResolvedProvider {
                provider: DEFAULT_PROVIDER,
                fell_back: true,
            }
        }
    }
}

/// Hands out adapters by provider.
pub trait ProviderFactoryTrait: Send + Sync {
    fn company(&self, provider: ProviderId) -> Arc<dyn CompanyProvider>;
    fn financial(&self, provider: ProviderId) -> Arc<dyn FinancialProvider>;
    fn listing(&self, provider: ProviderId) -> Arc<dyn ListingProvider>;
}

/// Factory over the real TCBS and VCI adapters.
#[derive(Clone)]
pub struct ProviderFactory {
    tcbs: Arc<TcbsProvider>,
    vci: Arc<VciProvider>,
}

impl Default for ProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderFactory {
    pub fn new() -> Self {
        Self {
            tcbs: Arc::new(TcbsProvider::new()),
            vci: Arc::new(VciProvider::new()),
        }
    }
}

impl ProviderFactoryTrait for ProviderFactory {
    fn company(&self, provider: ProviderId) -> Arc<dyn CompanyProvider> {
        match provider {
            ProviderId::Tcbs => self.tcbs.clone(),
            ProviderId::Vci => self.vci.clone(),
        }
    }

    fn financial(&self, provider: ProviderId) -> Arc<dyn FinancialProvider> {
        match provider {
            ProviderId::Tcbs => self.tcbs.clone(),
            ProviderId::Vci => self.vci.clone(),
        }
    }

    fn listing(&self, provider: ProviderId) -> Arc<dyn ListingProvider> {
        match provider {
            ProviderId::Tcbs => self.tcbs.clone(),
            ProviderId::Vci => self.vci.clone(),
        }
    }
}
