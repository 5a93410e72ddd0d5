use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use vnstock_core::{
    CompanyService, CompanyServiceTrait, FinancialService, FinancialServiceTrait, ListingService,
    ListingServiceTrait, SourceMode,
};
use vnstock_market_data::{ProviderFactory, ProviderFactoryTrait};

use crate::config::Config;

pub struct AppState {
    pub company_service: Arc<dyn CompanyServiceTrait>,
    pub financial_service: Arc<dyn FinancialServiceTrait>,
    pub listing_service: Arc<dyn ListingServiceTrait>,
    pub source_mode: SourceMode,
    pub api_version: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("VNSTOCK_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    build_state_with_factory(config, Arc::new(ProviderFactory::new()))
}

/// Wires the services over an arbitrary adapter factory.
pub fn build_state_with_factory(
    config: &Config,
    factory: Arc<dyn ProviderFactoryTrait>,
) -> anyhow::Result<Arc<AppState>> {
    if config.api_version.trim().is_empty() {
        anyhow::bail!("API version must not be empty");
    }

    let company_service =
        CompanyService::new(factory.clone()).with_leg_timeout(config.provider_timeout);
    let financial_service =
        FinancialService::new(factory.clone()).with_leg_timeout(config.provider_timeout);
    let listing_service = ListingService::new(factory).with_leg_timeout(config.provider_timeout);

    tracing::info!(
        "Services ready (source mode: {:?}, provider timeout: {:?})",
        config.source_mode,
        config.provider_timeout
    );

    Ok(Arc::new(AppState {
        company_service: Arc::new(company_service),
        financial_service: Arc::new(financial_service),
        listing_service: Arc::new(listing_service),
        source_mode: config.source_mode,
        api_version: config.api_version.clone(),
    }))
}
