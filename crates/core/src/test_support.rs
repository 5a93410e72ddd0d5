//! Scriptable in-memory providers shared by the service tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use serde_json::Value;
use vnstock_market_data::provider::{ListingCapability, ProviderCapabilities};
use vnstock_market_data::{
    CategoryData, CategoryResults, CompanyCategory, CompanyProvider, FinancialProvider, ListingKind,
    ListingProvider, ListingTable, MarketDataError, ProviderFactoryTrait, ProviderId, Record,
    Rows, StatementKind, StatementQuery, Symbol,
};

pub fn record(value: Value) -> Record {
    value.as_object().cloned().unwrap_or_default()
}

pub fn rows(values: Vec<Value>) -> Rows {
    values.into_iter().map(record).collect()
}

pub fn symbol(raw: &str) -> Symbol {
    Symbol::parse(raw).unwrap()
}

#[derive(Clone)]
pub struct MockProvider {
    id: ProviderId,
    company: HashMap<CompanyCategory, CategoryData>,
    failing: HashSet<CompanyCategory>,
    batched: bool,
    failing_document: bool,
    statements: Option<Rows>,
    listing: Option<ListingTable>,
    delay: Option<Duration>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub queries: Arc<Mutex<Vec<StatementQuery>>>,
}

impl MockProvider {
    pub fn new(id: ProviderId) -> Self {
        Self {
            id,
            company: HashMap::new(),
            failing: HashSet::new(),
            batched: false,
            failing_document: false,
            statements: None,
            listing: None,
            delay: None,
            calls: Arc::new(Mutex::new(Vec::new())),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_profile(mut self, value: Value) -> Self {
        self.company
            .insert(CompanyCategory::Profile, CategoryData::Profile(record(value)));
        self
    }

    pub fn with_rows(mut self, category: CompanyCategory, values: Vec<Value>) -> Self {
        self.company
            .insert(category, CategoryData::Rows(rows(values)));
        self
    }

    pub fn failing(mut self, category: CompanyCategory) -> Self {
        self.failing.insert(category);
        self
    }

    /// Serves every company category from one shared document fetch.
    pub fn batched(mut self) -> Self {
        self.batched = true;
        self
    }

    /// The shared document fetch fails, taking every category with it.
    pub fn failing_document(mut self) -> Self {
        self.batched = true;
        self.failing_document = true;
        self
    }

    pub fn with_statements(mut self, values: Vec<Value>) -> Self {
        self.statements = Some(rows(values));
        self
    }

    pub fn with_listing(mut self, table: ListingTable) -> Self {
        self.listing = Some(table);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record_call(&self, operation: String) {
        self.calls.lock().unwrap().push(operation);
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn lookup(&self, category: CompanyCategory) -> Result<CategoryData, MarketDataError> {
        if self.failing.contains(&category) {
            return Err(self.upstream_error());
        }
        self.company.get(&category).cloned().ok_or_else(|| {
            MarketDataError::not_supported(category.operation(), self.id.as_str())
        })
    }

    fn upstream_error(&self) -> MarketDataError {
        MarketDataError::ProviderError {
            provider: self.id.as_str().to_string(),
            message: "HTTP 500".to_string(),
        }
    }
}

fn mock_capabilities() -> ProviderCapabilities {
    ProviderCapabilities {
        company: &CompanyCategory::ALL,
        statements: &StatementKind::ALL,
        listing: &[ListingCapability::AllSymbols],
    }
}

#[async_trait]
impl CompanyProvider for MockProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn capabilities(&self) -> ProviderCapabilities {
        mock_capabilities()
    }

    async fn get_category(
        &self,
        _symbol: &Symbol,
        category: CompanyCategory,
    ) -> Result<CategoryData, MarketDataError> {
        self.record_call(category.operation().to_string());
        self.pause().await;
        self.lookup(category)
    }

    async fn get_categories(
        &self,
        symbol: &Symbol,
        categories: &[CompanyCategory],
    ) -> Result<CategoryResults, MarketDataError> {
        if !self.batched {
            return Ok(join_all(categories.iter().map(|&category| async move {
                (category, self.get_category(symbol, category).await)
            }))
            .await);
        }
        self.record_call("get_categories".to_string());
        self.pause().await;
        if self.failing_document {
            return Err(self.upstream_error());
        }
        Ok(categories
            .iter()
            .map(|&category| (category, self.lookup(category)))
            .collect())
    }
}

#[async_trait]
impl FinancialProvider for MockProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn capabilities(&self) -> ProviderCapabilities {
        mock_capabilities()
    }

    async fn get_statement(
        &self,
        kind: StatementKind,
        _symbol: &Symbol,
        query: &StatementQuery,
    ) -> Result<Rows, MarketDataError> {
        self.record_call(kind.operation().to_string());
        self.queries.lock().unwrap().push(*query);
        self.pause().await;
        self.statements
            .clone()
            .ok_or_else(|| MarketDataError::not_supported(kind.operation(), self.id.as_str()))
    }
}

#[async_trait]
impl ListingProvider for MockProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn capabilities(&self) -> ProviderCapabilities {
        mock_capabilities()
    }

    async fn get_listing(&self, kind: &ListingKind) -> Result<ListingTable, MarketDataError> {
        self.record_call(kind.to_string());
        self.pause().await;
        self.listing
            .clone()
            .ok_or_else(|| MarketDataError::not_supported(kind.operation(), self.id.as_str()))
    }
}

pub struct MockFactory {
    pub tcbs: Arc<MockProvider>,
    pub vci: Arc<MockProvider>,
}

impl MockFactory {
    pub fn new(tcbs: MockProvider, vci: MockProvider) -> Arc<Self> {
        Arc::new(Self {
            tcbs: Arc::new(tcbs),
            vci: Arc::new(vci),
        })
    }

    fn pick(&self, provider: ProviderId) -> Arc<MockProvider> {
        match provider {
            ProviderId::Tcbs => self.tcbs.clone(),
            ProviderId::Vci => self.vci.clone(),
        }
    }
}

impl ProviderFactoryTrait for MockFactory {
    fn company(&self, provider: ProviderId) -> Arc<dyn CompanyProvider> {
        self.pick(provider)
    }

    fn financial(&self, provider: ProviderId) -> Arc<dyn FinancialProvider> {
        self.pick(provider)
    }

    fn listing(&self, provider: ProviderId) -> Arc<dyn ListingProvider> {
        self.pick(provider)
    }
}
