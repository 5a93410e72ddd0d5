use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use utoipa::IntoParams;
use vnstock_core::constants::DEFAULT_COMPANY_SOURCE;
use vnstock_market_data::{CategoryData, CompanyCategory, CompanyInfo};

use crate::{
    envelope::{Envelope, ErrorEnvelope, RequestScope},
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

pub(crate) const COMPANY_INFO_ERROR: &str = "COMPANY_INFO_ERROR";

/// `?source=` for endpoints that accept a data source.
#[derive(Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct SourceParams {
    /// `tcbs`, `vci` or `unified` (alias `all`)
    pub source: Option<String>,
}

/// Path segment, category and error code for each company endpoint.
const CATEGORY_ROUTES: [(&str, CompanyCategory, &str); 8] = [
    ("profile", CompanyCategory::Profile, "COMPANY_PROFILE_ERROR"),
    ("officers", CompanyCategory::Officers, "COMPANY_OFFICERS_ERROR"),
    ("shareholders", CompanyCategory::Shareholders, "SHAREHOLDERS_ERROR"),
    ("insider-trading", CompanyCategory::InsiderTrading, "INSIDER_TRADING_ERROR"),
    ("subsidiaries", CompanyCategory::Subsidiaries, "SUBSIDIARIES_ERROR"),
    ("events", CompanyCategory::Events, "COMPANY_EVENTS_ERROR"),
    ("news", CompanyCategory::News, "COMPANY_NEWS_ERROR"),
    ("dividends", CompanyCategory::Dividends, "DIVIDENDS_ERROR"),
];

fn category_route(segment: &str) -> Option<(CompanyCategory, &'static str)> {
    CATEGORY_ROUTES
        .iter()
        .find(|(name, _, _)| *name == segment)
        .map(|(_, category, code)| (*category, *code))
}

/// Error code of a category's endpoint family.
pub(crate) fn category_code(category: CompanyCategory) -> &'static str {
    CATEGORY_ROUTES
        .iter()
        .find(|(_, c, _)| *c == category)
        .map(|(_, _, code)| *code)
        .unwrap_or(COMPANY_INFO_ERROR)
}

pub(crate) fn category_value(data: CategoryData) -> Value {
    match data {
        CategoryData::Profile(record) => Value::Object(record),
        CategoryData::Rows(rows) => Value::Array(rows.into_iter().map(Value::Object).collect()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/companies/{symbol}",
    params(("symbol" = String, Path, description = "Ticker, case-insensitive"), SourceParams),
    responses(
        (status = 200, description = "All company categories; failed ones listed in `unavailable`"),
        (status = 500, description = "Every category failed", body = ErrorEnvelope)
    ),
    tag = "companies"
)]
pub async fn get_company_info(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(params): Query<SourceParams>,
) -> ApiResult<Json<Envelope<CompanyInfo>>> {
    let mut scope = RequestScope::new(COMPANY_INFO_ERROR, &state.api_version).with_symbol(&symbol);
    let source = scope.source(
        params.source.as_deref(),
        DEFAULT_COMPANY_SOURCE,
        state.source_mode,
    )?;
    let symbol = scope.symbol(&symbol)?;

    let result = state
        .company_service
        .get_company_info(&symbol, source)
        .await
        .map_err(|e| scope.fail(e))?;
    Ok(scope.ok(result))
}

#[utoipa::path(
    get,
    path = "/api/v1/companies/{symbol}/{category}",
    params(
        ("symbol" = String, Path, description = "Ticker, case-insensitive"),
        ("category" = String, Path, description = "profile, officers, shareholders, insider-trading, subsidiaries, events, news or dividends"),
        SourceParams
    ),
    responses(
        (status = 200, description = "Profile object or list of rows"),
        (status = 501, description = "Source has no such endpoint", body = ErrorEnvelope)
    ),
    tag = "companies"
)]
pub async fn get_company_category(
    State(state): State<Arc<AppState>>,
    Path((symbol, segment)): Path<(String, String)>,
    Query(params): Query<SourceParams>,
) -> ApiResult<Json<Envelope<Value>>> {
    let Some((category, code)) = category_route(&segment) else {
        let scope = RequestScope::new(COMPANY_INFO_ERROR, &state.api_version).with_symbol(&symbol);
        return Err(ApiError::not_found(
            format!("Unknown company category '{}'", segment),
            scope.meta(),
        ));
    };

    let mut scope = RequestScope::new(code, &state.api_version).with_symbol(&symbol);
    let source = scope.source(
        params.source.as_deref(),
        DEFAULT_COMPANY_SOURCE,
        state.source_mode,
    )?;
    let symbol = scope.symbol(&symbol)?;

    let result = state
        .company_service
        .get_category(&symbol, source, category)
        .await
        .map_err(|e| scope.fail(e))?;
    Ok(scope.ok(result.map(category_value)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/companies/{symbol}", get(get_company_info))
        .route("/companies/{symbol}/{category}", get(get_company_category))
}
