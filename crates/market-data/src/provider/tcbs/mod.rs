//! TCBS (Techcombank Securities) adapter.
//!
//! Company and financial data come from the public `tcanalysis` API:
//! - Company overview, officers, shareholders, insider dealing, subsidiaries,
//!   events, news and dividend history under `/tcanalysis/v1/{ticker|company}/{symbol}/...`
//! - Balance sheet, income statement, cash flow and ratios under
//!   `/tcanalysis/v1/finance/{symbol}/...`
//!
//! TCBS has no listing endpoints; every listing operation is `NotSupported`.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::{
    CompanyCategory, Period, ProviderId, Record, Rows, StatementKind, StatementQuery, Symbol,
};
use crate::provider::http::HttpClient;
use crate::provider::{CompanyProvider, FinancialProvider, ListingProvider, ProviderCapabilities};
use crate::utils::headers::tcbs_headers;
use crate::utils::json::{extract_record, extract_rows, overlay};

const BASE_URL: &str = "https://apipubaws.tcbs.com.vn";
const PROVIDER_ID: ProviderId = ProviderId::Tcbs;

const CAPABILITIES: ProviderCapabilities = ProviderCapabilities {
    company: &CompanyCategory::ALL,
    statements: &StatementKind::ALL,
    listing: &[],
};

// ============================================================================
// Endpoint table
// ============================================================================

/// Path template, rows key and page size of one list category.
struct ListEndpoint {
    path: &'static str,
    key: &'static str,
    size: &'static str,
}

fn list_endpoint(category: CompanyCategory) -> Option<ListEndpoint> {
    let endpoint = match category {
        CompanyCategory::Profile => return None,
        CompanyCategory::Officers => ListEndpoint {
            path: "company/{symbol}/key-officers",
            key: "listKeyOfficer",
            size: "20",
        },
        CompanyCategory::Shareholders => ListEndpoint {
            path: "company/{symbol}/large-share-holders",
            key: "listShareHolder",
            size: "50",
        },
        CompanyCategory::InsiderTrading => ListEndpoint {
            path: "company/{symbol}/insider-dealing",
            key: "listInsiderDealing",
            size: "20",
        },
        CompanyCategory::Subsidiaries => ListEndpoint {
            path: "company/{symbol}/sub-companies",
            key: "listSubCompany",
            size: "100",
        },
        CompanyCategory::Events => ListEndpoint {
            path: "ticker/{symbol}/events-news",
            key: "listEventNews",
            size: "15",
        },
        CompanyCategory::News => ListEndpoint {
            path: "ticker/{symbol}/activity-news",
            key: "listActivityNews",
            size: "15",
        },
        CompanyCategory::Dividends => ListEndpoint {
            path: "company/{symbol}/dividend-payment-histories",
            key: "listDividendPaymentHis",
            size: "15",
        },
    };
    Some(endpoint)
}

fn statement_path(kind: StatementKind) -> &'static str {
    match kind {
        StatementKind::BalanceSheet => "balancesheet",
        StatementKind::IncomeStatement => "incomestatement",
        StatementKind::CashFlow => "cashflow",
        StatementKind::Ratios => "financialratio",
    }
}

fn yearly_flag(period: Period) -> &'static str {
    match period {
        Period::Year => "1",
        Period::Quarter => "0",
    }
}

// ============================================================================
// Provider
// ============================================================================

/// TCBS adapter. Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct TcbsProvider {
    http: HttpClient,
    base_url: String,
}

impl Default for TcbsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TcbsProvider {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Points the adapter at another host, e.g. a local replay server.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            http: HttpClient::new(PROVIDER_ID, tcbs_headers()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn analysis_url(&self, template: &str, symbol: &Symbol) -> String {
        format!(
            "{}/tcanalysis/v1/{}",
            self.base_url,
            template.replace("{symbol}", symbol.as_str())
        )
    }

    async fn fetch_list(&self, symbol: &Symbol, category: CompanyCategory) -> Result<Rows, MarketDataError> {
        let endpoint = list_endpoint(category).ok_or_else(|| {
            MarketDataError::not_supported(category.operation(), PROVIDER_ID.as_str())
        })?;
        let url = self.analysis_url(endpoint.path, symbol);
        let payload = self
            .http
            .get_json(&url, &[("page", "0"), ("size", endpoint.size)])
            .await?;
        let rows = extract_rows(payload, PROVIDER_ID, &[endpoint.key])?;
        debug!("TCBS {} for {}: {} rows", category, symbol, rows.len());
        Ok(rows)
    }

    async fn fetch_statement(
        &self,
        kind: StatementKind,
        symbol: &Symbol,
        query: &StatementQuery,
    ) -> Result<Rows, MarketDataError> {
        let url = format!(
            "{}/tcanalysis/v1/finance/{}/{}",
            self.base_url,
            symbol,
            statement_path(kind)
        );
        let payload = self
            .http
            .get_json(
                &url,
                &[("yearly", yearly_flag(query.period)), ("isAll", "true")],
            )
            .await?;
        extract_rows(payload, PROVIDER_ID, &[])
    }
}

#[async_trait]
impl CompanyProvider for TcbsProvider {
    fn id(&self) -> ProviderId {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        CAPABILITIES
    }

    /// Ticker overview, enriched with the company overview when available.
    async fn get_company_profile(&self, symbol: &Symbol) -> Result<Record, MarketDataError> {
        let ticker = self
            .http
            .get_json(&self.analysis_url("ticker/{symbol}/overview", symbol), &[])
            .await?;
        let profile = extract_record(ticker, PROVIDER_ID)?;

        let company_url = self.analysis_url("company/{symbol}/overview", symbol);
        match self.http.get_json(&company_url, &[]).await {
            Ok(payload) => match extract_record(payload, PROVIDER_ID) {
                Ok(company) => Ok(overlay(profile, company)),
                Err(e) => {
                    warn!("TCBS company overview for {} unreadable: {}", symbol, e);
                    Ok(profile)
                }
            },
            Err(e) => {
                warn!("TCBS company overview for {} failed: {}", symbol, e);
                Ok(profile)
            }
        }
    }

    async fn get_company_officers(&self, symbol: &Symbol) -> Result<Rows, MarketDataError> {
        self.fetch_list(symbol, CompanyCategory::Officers).await
    }

    async fn get_shareholders(&self, symbol: &Symbol) -> Result<Rows, MarketDataError> {
        self.fetch_list(symbol, CompanyCategory::Shareholders).await
    }

    async fn get_insider_trading(&self, symbol: &Symbol) -> Result<Rows, MarketDataError> {
        self.fetch_list(symbol, CompanyCategory::InsiderTrading).await
    }

    async fn get_subsidiaries(&self, symbol: &Symbol) -> Result<Rows, MarketDataError> {
        self.fetch_list(symbol, CompanyCategory::Subsidiaries).await
    }

    async fn get_company_events(&self, symbol: &Symbol) -> Result<Rows, MarketDataError> {
        self.fetch_list(symbol, CompanyCategory::Events).await
    }

    async fn get_company_news(&self, symbol: &Symbol) -> Result<Rows, MarketDataError> {
        self.fetch_list(symbol, CompanyCategory::News).await
    }

    async fn get_dividends(&self, symbol: &Symbol) -> Result<Rows, MarketDataError> {
        self.fetch_list(symbol, CompanyCategory::Dividends).await
    }
}

#[async_trait]
impl FinancialProvider for TcbsProvider {
    fn id(&self) -> ProviderId {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        CAPABILITIES
    }

    async fn get_balance_sheet(
        &self,
        symbol: &Symbol,
        query: &StatementQuery,
    ) -> Result<Rows, MarketDataError> {
        self.fetch_statement(StatementKind::BalanceSheet, symbol, query)
            .await
    }

    async fn get_income_statement(
        &self,
        symbol: &Symbol,
        query: &StatementQuery,
    ) -> Result<Rows, MarketDataError> {
        self.fetch_statement(StatementKind::IncomeStatement, symbol, query)
            .await
    }

    async fn get_cash_flow(
        &self,
        symbol: &Symbol,
        query: &StatementQuery,
    ) -> Result<Rows, MarketDataError> {
        self.fetch_statement(StatementKind::CashFlow, symbol, query)
            .await
    }

    async fn get_ratios(
        &self,
        symbol: &Symbol,
        query: &StatementQuery,
    ) -> Result<Rows, MarketDataError> {
        self.fetch_statement(StatementKind::Ratios, symbol, query)
            .await
    }
}

#[async_trait]
impl ListingProvider for TcbsProvider {
    fn id(&self) -> ProviderId {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        CAPABILITIES
    }
}
