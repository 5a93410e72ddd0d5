use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;
use vnstock_market_data::provider::{ListingCapability, ProviderCapabilities};
use vnstock_market_data::{
    CompanyCategory, CompanyProvider, FinancialProvider, ListingProvider, ListingTable,
    MarketDataError, ProviderFactoryTrait, ProviderId, Record, Rows, StatementKind,
    StatementQuery, Symbol,
};
use vnstock_core::SourceMode;
use vnstock_server::{api::app_router, build_state_with_factory, config::Config};

fn record(value: Value) -> Record {
    value.as_object().cloned().unwrap()
}

struct StubProvider {
    id: ProviderId,
}

#[async_trait]
impl CompanyProvider for StubProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            company: &[CompanyCategory::Profile, CompanyCategory::Officers],
            statements: &[],
            listing: &[],
        }
    }

    async fn get_company_profile(&self, symbol: &Symbol) -> Result<Record, MarketDataError> {
        match self.id {
            ProviderId::Tcbs => Ok(record(json!({"ticker": symbol.as_str(), "exchange": "HOSE"}))),
            ProviderId::Vci => Err(MarketDataError::ProviderError {
                provider: "vci".to_string(),
                message: "HTTP 503".to_string(),
            }),
        }
    }

    async fn get_company_officers(&self, _symbol: &Symbol) -> Result<Rows, MarketDataError> {
        let name = match self.id {
            ProviderId::Tcbs => "Truong Gia Binh",
            ProviderId::Vci => "Nguyen Van Khoa",
        };
        Ok(vec![record(json!({"name": name}))])
    }
}

#[async_trait]
impl FinancialProvider for StubProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            company: &[],
            statements: &StatementKind::ALL,
            listing: &[],
        }
    }

    async fn get_statement(
        &self,
        _kind: StatementKind,
        symbol: &Symbol,
        query: &StatementQuery,
    ) -> Result<Rows, MarketDataError> {
        Ok(vec![
            record(json!({
                "ticker": symbol.as_str(),
                "period": query.period.as_str(),
                "lang": query.lang.as_str(),
                "revenue": 52618
            })),
            record(json!({"ticker": symbol.as_str(), "year": 2019, "revenue": null})),
        ])
    }
}

#[async_trait]
impl ListingProvider for StubProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            company: &[],
            statements: &[],
            listing: &[ListingCapability::AllSymbols],
        }
    }

    async fn get_all_symbols(&self) -> Result<ListingTable, MarketDataError> {
        match self.id {
            ProviderId::Vci => Ok(ListingTable::Rows(vec![
                record(json!({"symbol": "FPT"})),
                record(json!({"symbol": "VNM"})),
            ])),
            ProviderId::Tcbs => Err(MarketDataError::not_supported("get_all_symbols", "tcbs")),
        }
    }
}

struct StubFactory {
    tcbs: Arc<StubProvider>,
    vci: Arc<StubProvider>,
}

impl StubFactory {
    fn pick(&self, provider: ProviderId) -> Arc<StubProvider> {
        match provider {
            ProviderId::Tcbs => self.tcbs.clone(),
            ProviderId::Vci => self.vci.clone(),
        }
    }
}

impl ProviderFactoryTrait for StubFactory {
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

fn build_test_router(source_mode: SourceMode) -> axum::Router {
    let config = Config {
        source_mode,
        ..Config::default()
    };
    let factory = Arc::new(StubFactory {
        tcbs: Arc::new(StubProvider { id: ProviderId::Tcbs }),
        vci: Arc::new(StubProvider { id: ProviderId::Vci }),
    });
    let state = build_state_with_factory(&config, factory).unwrap();
    app_router(state, &config)
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

#[tokio::test]
async fn root_and_health_respond() {
    let app = build_test_router(SourceMode::Lenient);

    let (status, body) = get_json(app.clone(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "Welcome to VNStock API");
    assert_eq!(body["version"], "1.0");

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/v1/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let (status, body) = get_json(app, "/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/companies/{symbol}"].is_object());
}

#[tokio::test]
async fn unified_profile_survives_one_failing_source() {
    let app = build_test_router(SourceMode::Lenient);

    let (status, body) = get_json(app, "/api/v1/companies/fpt/profile").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["ticker"], "FPT");
    assert_eq!(body["meta"]["source"], "tcbs");
    assert_eq!(body["meta"]["symbol"], "FPT");
    assert_eq!(body["meta"]["version"], "1.0");
    assert!(body["meta"]["timestamp"].is_string());
}

#[tokio::test]
async fn unified_officers_are_merged_and_tagged() {
    let app = build_test_router(SourceMode::Lenient);

    let (status, body) = get_json(app, "/api/v1/companies/FPT/officers?source=all").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["source"], "unified");
    let officers = body["data"].as_array().unwrap();
    assert_eq!(officers.len(), 2);
    assert_eq!(officers[0]["dataSource"], "vci");
    assert_eq!(officers[1]["dataSource"], "tcbs");
}

#[tokio::test]
async fn unsupported_category_is_not_implemented() {
    let app = build_test_router(SourceMode::Lenient);

    let (status, body) = get_json(app, "/api/v1/companies/FPT/dividends?source=vci").await;

    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body["error"]["code"], "NOT_IMPLEMENTED");
    assert_eq!(body["meta"]["symbol"], "FPT");
}

#[tokio::test]
async fn single_source_upstream_failure_is_bad_gateway() {
    let app = build_test_router(SourceMode::Lenient);

    let (status, body) = get_json(app, "/api/v1/companies/FPT/profile?source=vci").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "COMPANY_PROFILE_ERROR");
    assert!(body["error"]["message"].as_str().unwrap().contains("HTTP 503"));
}

#[tokio::test]
async fn company_info_lists_unavailable_categories() {
    let app = build_test_router(SourceMode::Lenient);

    let (status, body) = get_json(app, "/api/v1/companies/FPT").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["profile"]["exchange"], "HOSE");
    assert_eq!(body["data"]["listKeyOfficer"].as_array().unwrap().len(), 2);
    let unavailable = body["data"]["unavailable"].as_array().unwrap();
    assert!(unavailable.contains(&json!("dividends")));
    assert!(!unavailable.contains(&json!("profile")));
}

#[tokio::test]
async fn invalid_symbol_is_bad_request() {
    let app = build_test_router(SourceMode::Lenient);

    let (status, body) = get_json(app, "/api/v1/companies/F$T/profile").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn unknown_source_depends_on_mode() {
    let (status, body) = get_json(
        build_test_router(SourceMode::Lenient),
        "/api/v1/companies/FPT/profile?source=foo",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["source"], "tcbs");

    let (status, body) = get_json(
        build_test_router(SourceMode::Strict),
        "/api/v1/companies/FPT/profile?source=foo",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_SOURCE");
    assert_eq!(body["meta"]["source"], "foo");
}

#[tokio::test]
async fn financial_statement_applies_query() {
    let app = build_test_router(SourceMode::Lenient);

    let (status, body) = get_json(
        app.clone(),
        "/api/v1/financial/fpt/income-statements?period=quarter&lang=en",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["source"], "tcbs");
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["period"], "quarter");
    assert_eq!(rows[0]["lang"], "en");

    let (_, body) = get_json(
        app.clone(),
        "/api/v1/financial/FPT/ratios?source=unified&dropna=false",
    )
    .await;
    assert_eq!(body["meta"]["source"], "tcbs");
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, body) = get_json(app, "/api/v1/financial/FPT/cash-flows?period=month").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn listing_defaults_to_vci() {
    let app = build_test_router(SourceMode::Lenient);

    let (status, body) = get_json(app.clone(), "/api/v1/listing/symbols").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["source"], "vci");
    assert_eq!(body["data"]["totalCount"], 2);
    assert!(body["meta"].get("symbol").is_none());

    let (status, body) = get_json(app, "/api/v1/listing/bonds").await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body["error"]["code"], "NOT_IMPLEMENTED");
}

#[tokio::test]
async fn unknown_category_is_not_found() {
    let app = build_test_router(SourceMode::Lenient);

    let (status, body) = get_json(app, "/api/v1/companies/FPT/ceo").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

async fn post_graphql(app: axum::Router, query: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/graphql")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "query": query }).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

#[tokio::test]
async fn graphql_profile_defaults_to_all_sources() {
    let app = build_test_router(SourceMode::Lenient);

    let (status, body) = post_graphql(
        app.clone(),
        r#"{ companyProfile(symbol: "fpt") { data source } }"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("errors").is_none());
    assert_eq!(body["data"]["companyProfile"]["source"], "tcbs");
    assert_eq!(body["data"]["companyProfile"]["data"]["ticker"], "FPT");

    let (_, body) = post_graphql(
        app,
        r#"{ companyOfficers(symbol: "FPT", source: ALL) { data source } }"#,
    )
    .await;
    assert_eq!(body["data"]["companyOfficers"]["source"], "unified");
    assert_eq!(body["data"]["companyOfficers"]["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn graphql_errors_carry_rest_codes() {
    let app = build_test_router(SourceMode::Lenient);

    let (status, body) = post_graphql(
        app.clone(),
        r#"{ dividends(symbol: "FPT", source: VCI) { data source } }"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let error = &body["errors"][0];
    assert_eq!(error["path"][0], "dividends");
    assert_eq!(error["extensions"]["code"], "NOT_IMPLEMENTED");
    assert_eq!(error["extensions"]["status"], 501);
    assert_eq!(error["extensions"]["class"], "not_supported");

    let (_, body) = post_graphql(
        app.clone(),
        r#"{ companyProfile(symbol: "FPT", source: VCI) { data } }"#,
    )
    .await;
    let error = &body["errors"][0];
    assert_eq!(error["extensions"]["code"], "COMPANY_PROFILE_ERROR");
    assert_eq!(error["extensions"]["status"], 502);
    assert_eq!(error["extensions"]["class"], "upstream");

    let (_, body) = post_graphql(app, r#"{ companyInfo(symbol: "F$T") { source } }"#).await;
    let error = &body["errors"][0];
    assert_eq!(error["extensions"]["code"], "INVALID_REQUEST");
    assert_eq!(error["extensions"]["status"], 400);
}
