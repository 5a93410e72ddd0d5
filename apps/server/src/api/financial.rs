use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use utoipa::IntoParams;
use vnstock_market_data::{Language, Period, Rows, Source, StatementKind, StatementQuery};

use crate::{
    envelope::{Envelope, ErrorEnvelope, RequestScope},
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

const FINANCIAL_ERROR: &str = "FINANCIAL_ERROR";

/// Statement query string. Values are parsed by hand so that bad input
/// still gets the error envelope.
#[derive(Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct StatementParams {
    /// `tcbs` (default) or `vci`; `unified` is served by TCBS
    pub source: Option<String>,
    /// `year` (default) or `quarter`
    pub period: Option<String>,
    /// `vi` (default) or `en`
    pub lang: Option<String>,
    /// Drop rows with no figures, default `true`
    pub dropna: Option<String>,
    /// Log request parameters at info level, default `false`
    pub show_log: Option<String>,
}

fn statement_route(segment: &str) -> Option<StatementKind> {
    match segment {
        "balance-sheets" => Some(StatementKind::BalanceSheet),
        "income-statements" => Some(StatementKind::IncomeStatement),
        "cash-flows" => Some(StatementKind::CashFlow),
        "ratios" => Some(StatementKind::Ratios),
        _ => None,
    }
}

fn parse_flag(raw: Option<&str>, name: &str, default: bool) -> Result<bool, String> {
    match raw.map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) if v.is_empty() => Ok(default),
        Some(v) => match v.as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(format!("{} must be true or false, got '{}'", name, v)),
        },
    }
}

fn statement_query(params: &StatementParams, scope: &RequestScope) -> Result<StatementQuery, ApiError> {
    let defaults = StatementQuery::default();
    let period = match params.period.as_deref() {
        Some(raw) if !raw.trim().is_empty() => raw
            .parse::<Period>()
            .map_err(|e| scope.fail(e.into()))?,
        _ => defaults.period,
    };
    let lang = match params.lang.as_deref() {
        Some(raw) if !raw.trim().is_empty() => raw
            .parse::<Language>()
            .map_err(|e| scope.fail(e.into()))?,
        _ => defaults.lang,
    };
    let dropna =
        parse_flag(params.dropna.as_deref(), "dropna", defaults.dropna).map_err(|m| scope.invalid(m))?;
    let show_log = parse_flag(params.show_log.as_deref(), "show_log", defaults.show_log)
        .map_err(|m| scope.invalid(m))?;
    Ok(StatementQuery {
        period,
        lang,
        dropna,
        show_log,
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/financial/{symbol}/{statement}",
    params(
        ("symbol" = String, Path, description = "Ticker, case-insensitive"),
        ("statement" = String, Path, description = "balance-sheets, income-statements, cash-flows or ratios"),
        StatementParams
    ),
    responses(
        (status = 200, description = "Statement rows in provider field names"),
        (status = 400, description = "Bad period, language or flag", body = ErrorEnvelope)
    ),
    tag = "financial"
)]
pub async fn get_statement(
    State(state): State<Arc<AppState>>,
    Path((symbol, segment)): Path<(String, String)>,
    Query(params): Query<StatementParams>,
) -> ApiResult<Json<Envelope<Rows>>> {
    let mut scope = RequestScope::new(FINANCIAL_ERROR, &state.api_version).with_symbol(&symbol);
    let Some(kind) = statement_route(&segment) else {
        return Err(ApiError::not_found(
            format!("Unknown statement '{}'", segment),
            scope.meta(),
        ));
    };

    let source = scope.source(params.source.as_deref(), Source::Tcbs, state.source_mode)?;
    let symbol = scope.symbol(&symbol)?;
    let query = statement_query(&params, &scope)?;

    let result = state
        .financial_service
        .get_statement(kind, &symbol, source, &query)
        .await
        .map_err(|e| scope.fail(e))?;
    Ok(scope.ok(result))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/financial/{symbol}/{statement}", get(get_statement))
}
