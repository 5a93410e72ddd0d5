//! VCI (Vietcap) adapter.
//!
//! - Company data: one GraphQL document from the `data-mt` endpoint
//! - Financial statements: the IQ insight service
//! - Listings: the trading price API and, for industry data, GraphQL
//!
//! VCI has no insider-dealing or dividend-history endpoint.

mod graphql;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::{
    CompanyCategory, CompanyInfo, ListingTable, Period, ProviderId, Record, Rows, StatementKind,
    StatementQuery, Symbol,
};
use crate::provider::capabilities::ListingCapability;
use crate::provider::http::HttpClient;
use crate::provider::traits::CategoryResults;
use crate::provider::{CompanyProvider, FinancialProvider, ListingProvider, ProviderCapabilities};
use crate::utils::headers::vci_headers;
use crate::utils::json::{extract_rows, pointer};

use graphql::{
    categories_from_document, category_from_document, into_data, GraphqlRequest, ICB_QUERY,
    INDUSTRIES_QUERY,
};

const TRADING_URL: &str = "https://trading.vietcap.com.vn/api";
const GRAPHQL_URL: &str = "https://trading.vietcap.com.vn/data-mt/graphql";
const IQ_URL: &str = "https://iq.vietcap.com.vn/api/iq-insight-service/v1";
const PROVIDER_ID: ProviderId = ProviderId::Vci;

const CAPABILITIES: ProviderCapabilities = ProviderCapabilities {
    company: &[
        CompanyCategory::Profile,
        CompanyCategory::Officers,
        CompanyCategory::Shareholders,
        CompanyCategory::Subsidiaries,
        CompanyCategory::Events,
        CompanyCategory::News,
    ],
    statements: &StatementKind::ALL,
    listing: &[
        ListingCapability::AllSymbols,
        ListingCapability::SymbolsByIndustries,
        ListingCapability::SymbolsByExchange,
        ListingCapability::SymbolsByGroup,
        ListingCapability::IndustriesIcb,
        ListingCapability::FutureIndices,
        ListingCapability::CoveredWarrants,
        ListingCapability::Bonds,
        ListingCapability::GovernmentBonds,
    ],
};

// ============================================================================
// Response shaping
// ============================================================================

fn statement_section(kind: StatementKind) -> Option<&'static str> {
    match kind {
        StatementKind::BalanceSheet => Some("BALANCE_SHEET"),
        StatementKind::IncomeStatement => Some("INCOME_STATEMENT"),
        StatementKind::CashFlow => Some("CASH_FLOW"),
        StatementKind::Ratios => None,
    }
}

/// Keeps the rows of the requested period, judged by `lengthReport`.
///
/// Annual rows carry `lengthReport` 5 (or 0 on older reports), quarterly
/// rows 1 to 4. Rows without the column are kept.
fn select_period(rows: Rows, period: Period) -> Rows {
    rows.into_iter()
        .filter(|row| match row.get("lengthReport").and_then(Value::as_i64) {
            Some(length) => match period {
                Period::Year => length == 5 || length == 0,
                Period::Quarter => (1..=4).contains(&length),
            },
            None => true,
        })
        .collect()
}

/// Reads a statement payload: either `data.{years,quarters}` or a flat table.
fn statement_rows(payload: Value, period: Period) -> Result<Rows, MarketDataError> {
    let split_key = match period {
        Period::Year => "years",
        Period::Quarter => "quarters",
    };
    if let Some(table) = pointer(&payload, &["data", split_key]) {
        return extract_rows(table.clone(), PROVIDER_ID, &[]);
    }
    let rows = extract_rows(payload, PROVIDER_ID, &[])?;
    Ok(select_period(rows, period))
}

/// Orders symbols by exchange board and counts them per board.
fn group_by_board(rows: Rows) -> ListingTable {
    let mut boards: BTreeMap<String, Rows> = BTreeMap::new();
    for row in rows {
        let board = row
            .get("board")
            .and_then(Value::as_str)
            .unwrap_or("UNKNOWN")
            .to_string();
        boards.entry(board).or_default().push(row);
    }

    let counts: serde_json::Map<String, Value> = boards
        .iter()
        .map(|(board, rows)| (board.clone(), json!(rows.len())))
        .collect();
    let records: Rows = boards.into_values().flatten().collect();

    ListingTable::Wrapped {
        total_count: Some(records.len()),
        records,
        metadata: Some(json!({ "exchanges": counts })),
    }
}

// ============================================================================
// Provider
// ============================================================================

/// VCI adapter. Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct VciProvider {
    http: HttpClient,
}

impl Default for VciProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl VciProvider {
    pub fn new() -> Self {
        Self {
            http: HttpClient::new(PROVIDER_ID, vci_headers()),
        }
    }

    async fn graphql(&self, request: &GraphqlRequest<'_>) -> Result<Value, MarketDataError> {
        let response = self.http.post_json(GRAPHQL_URL, request).await?;
        into_data(response)
    }

    async fn company_document(&self, symbol: &Symbol) -> Result<Value, MarketDataError> {
        self.graphql(&GraphqlRequest::company(symbol.as_str())).await
    }

    async fn company_category(
        &self,
        symbol: &Symbol,
        category: CompanyCategory,
    ) -> Result<Rows, MarketDataError> {
        if !CAPABILITIES.supports_company(category) {
            return Err(MarketDataError::not_supported(
                category.operation(),
                PROVIDER_ID.as_str(),
            ));
        }
        let document = self.company_document(symbol).await?;
        let rows = category_from_document(&document, category)?
            .into_rows()
            .unwrap_or_default();
        debug!("VCI {} for {}: {} rows", category, symbol, rows.len());
        Ok(rows)
    }

    async fn fetch_statement(
        &self,
        kind: StatementKind,
        symbol: &Symbol,
        query: &StatementQuery,
    ) -> Result<Rows, MarketDataError> {
        let payload = match statement_section(kind) {
            Some(section) => {
                let url = format!("{}/company/{}/financial-statement", IQ_URL, symbol);
                self.http.get_json(&url, &[("section", section)]).await?
            }
            None => {
                let url = format!("{}/company/{}/statistics-financial", IQ_URL, symbol);
                self.http.get_json(&url, &[]).await?
            }
        };
        statement_rows(payload, query.period)
    }

    async fn symbols_in_group(&self, group: &str) -> Result<ListingTable, MarketDataError> {
        let url = format!("{}/price/symbols/getByGroup", TRADING_URL);
        let payload = self.http.get_json(&url, &[("group", group)]).await?;
        extract_rows(payload, PROVIDER_ID, &[]).map(ListingTable::Rows)
    }

    async fn all_symbol_rows(&self) -> Result<Rows, MarketDataError> {
        let url = format!("{}/price/symbols/getAll", TRADING_URL);
        let payload = self.http.get_json(&url, &[]).await?;
        extract_rows(payload, PROVIDER_ID, &[])
    }
}

#[async_trait]
impl CompanyProvider for VciProvider {
    fn id(&self) -> ProviderId {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        CAPABILITIES
    }

    async fn get_company_profile(&self, symbol: &Symbol) -> Result<Record, MarketDataError> {
        let document = self.company_document(symbol).await?;
        category_from_document(&document, CompanyCategory::Profile)?
            .into_profile()
            .ok_or_else(|| MarketDataError::ParseError {
                provider: PROVIDER_ID.as_str().to_string(),
                message: "profile is not an object".to_string(),
            })
    }

    async fn get_company_officers(&self, symbol: &Symbol) -> Result<Rows, MarketDataError> {
        self.company_category(symbol, CompanyCategory::Officers).await
    }

    async fn get_shareholders(&self, symbol: &Symbol) -> Result<Rows, MarketDataError> {
        self.company_category(symbol, CompanyCategory::Shareholders)
            .await
    }

    async fn get_subsidiaries(&self, symbol: &Symbol) -> Result<Rows, MarketDataError> {
        self.company_category(symbol, CompanyCategory::Subsidiaries)
            .await
    }

    async fn get_company_events(&self, symbol: &Symbol) -> Result<Rows, MarketDataError> {
        self.company_category(symbol, CompanyCategory::Events).await
    }

    async fn get_company_news(&self, symbol: &Symbol) -> Result<Rows, MarketDataError> {
        self.company_category(symbol, CompanyCategory::News).await
    }

    /// One GraphQL round-trip shared by every requested category.
    async fn get_categories(
        &self,
        symbol: &Symbol,
        categories: &[CompanyCategory],
    ) -> Result<CategoryResults, MarketDataError> {
        let unsupported = |category: CompanyCategory| {
            MarketDataError::not_supported(category.operation(), PROVIDER_ID.as_str())
        };
        if !categories
            .iter()
            .any(|category| CAPABILITIES.supports_company(*category))
        {
            return Ok(categories
                .iter()
                .map(|&category| (category, Err(unsupported(category))))
                .collect());
        }
        match self.company_document(symbol).await {
            Ok(document) => Ok(categories_from_document(&document, categories)),
            Err(e) => Ok(categories
                .iter()
                .map(|&category| {
                    let result = if CAPABILITIES.supports_company(category) {
                        Err(e.clone())
                    } else {
                        Err(unsupported(category))
                    };
                    (category, result)
                })
                .collect()),
        }
    }

    /// One GraphQL round-trip for every supported category; still atomic.
    async fn get_company_info(&self, symbol: &Symbol) -> Result<CompanyInfo, MarketDataError> {
        let document = self.company_document(symbol).await?;
        let mut info = CompanyInfo::default();
        for category in CAPABILITIES.company {
            let data = category_from_document(&document, *category)?;
            info.set(*category, data);
        }
        Ok(info)
    }
}

#[async_trait]
impl FinancialProvider for VciProvider {
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
impl ListingProvider for VciProvider {
    fn id(&self) -> ProviderId {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        CAPABILITIES
    }

    async fn get_all_symbols(&self) -> Result<ListingTable, MarketDataError> {
        self.all_symbol_rows().await.map(ListingTable::Rows)
    }

    async fn get_symbols_by_industries(&self) -> Result<ListingTable, MarketDataError> {
        let data = self
            .graphql(&GraphqlRequest::without_variables(INDUSTRIES_QUERY))
            .await?;
        let table = data.get("CompaniesListingInfo").cloned().unwrap_or(Value::Null);
        extract_rows(table, PROVIDER_ID, &[]).map(ListingTable::Rows)
    }

    async fn get_symbols_by_exchange(&self) -> Result<ListingTable, MarketDataError> {
        let rows = self.all_symbol_rows().await?;
        Ok(group_by_board(rows))
    }

    async fn get_symbols_by_group(&self, group: &str) -> Result<ListingTable, MarketDataError> {
        let group = group.trim().to_ascii_uppercase();
        if group.is_empty() {
            return Err(MarketDataError::InvalidRequest(
                "group must not be empty".to_string(),
            ));
        }
        self.symbols_in_group(&group).await
    }

    async fn get_industries_icb(&self) -> Result<ListingTable, MarketDataError> {
        let data = self
            .graphql(&GraphqlRequest::without_variables(ICB_QUERY))
            .await?;
        let table = data.get("ListIcbCode").cloned().unwrap_or(Value::Null);
        extract_rows(table, PROVIDER_ID, &[]).map(ListingTable::Rows)
    }

    async fn get_all_future_indices(&self) -> Result<ListingTable, MarketDataError> {
        self.symbols_in_group("FU_INDEX").await
    }

    async fn get_all_covered_warrant(&self) -> Result<ListingTable, MarketDataError> {
        self.symbols_in_group("CW").await
    }

    async fn get_all_bonds(&self) -> Result<ListingTable, MarketDataError> {
        self.symbols_in_group("BOND").await
    }

    async fn get_all_government_bonds(&self) -> Result<ListingTable, MarketDataError> {
        self.symbols_in_group("FU_BOND").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(value: Value) -> Rows {
        extract_rows(value, PROVIDER_ID, &[]).unwrap()
    }

    #[test]
    fn test_capabilities_lack_insider_and_dividends() {
        assert!(!CAPABILITIES.supports_company(CompanyCategory::InsiderTrading));
        assert!(!CAPABILITIES.supports_company(CompanyCategory::Dividends));
        assert!(CAPABILITIES.supports_company(CompanyCategory::Profile));
        for kind in StatementKind::ALL {
            assert!(CAPABILITIES.supports_statement(kind));
        }
    }

    #[tokio::test]
    async fn test_unsupported_company_categories() {
        let provider = VciProvider::new();
        let symbol = Symbol::parse("FPT").unwrap();
        assert!(provider
            .get_insider_trading(&symbol)
            .await
            .unwrap_err()
            .is_not_supported());
        assert!(provider
            .get_dividends(&symbol)
            .await
            .unwrap_err()
            .is_not_supported());

        let results = provider
            .get_categories(
                &symbol,
                &[CompanyCategory::InsiderTrading, CompanyCategory::Dividends],
            )
            .await
            .unwrap();
        assert_eq!(results.len(), 2);
        for (_, result) in results {
            assert!(result.unwrap_err().is_not_supported());
        }
    }

    #[test]
    fn test_select_period() {
        let table = rows(json!([
            {"yearReport": 2023, "lengthReport": 5, "revenue": 1},
            {"yearReport": 2023, "lengthReport": 4, "revenue": 2},
            {"yearReport": 2023, "lengthReport": 3, "revenue": 3},
            {"yearReport": 2022, "lengthReport": 0, "revenue": 4}
        ]));

        let annual = select_period(table.clone(), Period::Year);
        assert_eq!(annual.len(), 2);
        assert_eq!(annual[1]["revenue"], 4);

        let quarterly = select_period(table, Period::Quarter);
        assert_eq!(quarterly.len(), 2);
    }

    #[test]
    fn test_statement_rows_prefers_split_payload() {
        let payload = json!({"data": {"years": [{"yearReport": 2023}], "quarters": [{"q": 1}, {"q": 2}]}});
        assert_eq!(statement_rows(payload.clone(), Period::Year).unwrap().len(), 1);
        assert_eq!(statement_rows(payload, Period::Quarter).unwrap().len(), 2);
    }

    #[test]
    fn test_group_by_board() {
        let table = group_by_board(rows(json!([
            {"symbol": "FPT", "board": "HSX"},
            {"symbol": "SHS", "board": "HNX"},
            {"symbol": "VNM", "board": "HSX"}
        ])));

        match table {
            ListingTable::Wrapped {
                records,
                total_count,
                metadata,
            } => {
                assert_eq!(total_count, Some(3));
                assert_eq!(records[0]["symbol"], "SHS");
                assert_eq!(records[1]["symbol"], "FPT");
                assert_eq!(records[2]["symbol"], "VNM");
                assert_eq!(metadata.unwrap()["exchanges"]["HSX"], 2);
            }
            other => panic!("expected a wrapped table, got {other:?}"),
        }
    }
}
