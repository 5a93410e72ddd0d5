use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use vnstock_core::constants::DEFAULT_LISTING_PROVIDER;
use vnstock_core::ListingPage;
use vnstock_market_data::ListingKind;

use super::companies::SourceParams;
use crate::{
    envelope::{Envelope, RequestScope},
    error::ApiResult,
    main_lib::AppState,
};

const LISTING_ERROR: &str = "LISTING_ERROR";

async fn listing_response(
    state: &AppState,
    kind: ListingKind,
    params: SourceParams,
) -> ApiResult<Json<Envelope<ListingPage>>> {
    let mut scope = RequestScope::new(LISTING_ERROR, &state.api_version);
    let source = scope.source(
        params.source.as_deref(),
        DEFAULT_LISTING_PROVIDER.into(),
        state.source_mode,
    )?;

    let result = state
        .listing_service
        .get_listing(&kind, source)
        .await
        .map_err(|e| scope.fail(e))?;
    Ok(scope.ok(result))
}

#[utoipa::path(get, path = "/api/v1/listing/symbols", params(SourceParams),
    responses((status = 200, description = "All listed symbols"), (status = 501, description = "Source has no such listing", body = crate::envelope::ErrorEnvelope)),
    tag = "listing")]
pub async fn all_symbols(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SourceParams>,
) -> ApiResult<Json<Envelope<ListingPage>>> {
    listing_response(&state, ListingKind::AllSymbols, params).await
}

#[utoipa::path(get, path = "/api/v1/listing/symbols/by-industry", params(SourceParams),
    responses((status = 200, description = "Symbols with industry classification")),
    tag = "listing")]
pub async fn symbols_by_industries(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SourceParams>,
) -> ApiResult<Json<Envelope<ListingPage>>> {
    listing_response(&state, ListingKind::SymbolsByIndustries, params).await
}

#[utoipa::path(get, path = "/api/v1/listing/symbols/by-exchange", params(SourceParams),
    responses((status = 200, description = "Symbols with exchange board, counts in metadata")),
    tag = "listing")]
pub async fn symbols_by_exchange(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SourceParams>,
) -> ApiResult<Json<Envelope<ListingPage>>> {
    listing_response(&state, ListingKind::SymbolsByExchange, params).await
}

#[utoipa::path(get, path = "/api/v1/listing/symbols/by-group/{group}",
    params(("group" = String, Path, description = "Group code, e.g. VN30, HNX30, VN100"), SourceParams),
    responses((status = 200, description = "Group members")),
    tag = "listing")]
pub async fn symbols_by_group(
    State(state): State<Arc<AppState>>,
    Path(group): Path<String>,
    Query(params): Query<SourceParams>,
) -> ApiResult<Json<Envelope<ListingPage>>> {
    listing_response(&state, ListingKind::SymbolsByGroup(group), params).await
}

#[utoipa::path(get, path = "/api/v1/listing/symbols/by-group", params(SourceParams),
    responses((status = 200, description = "VN30 members")),
    tag = "listing")]
pub async fn symbols_by_default_group(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SourceParams>,
) -> ApiResult<Json<Envelope<ListingPage>>> {
    listing_response(&state, ListingKind::default_group(), params).await
}

#[utoipa::path(get, path = "/api/v1/listing/industries/icb", params(SourceParams),
    responses((status = 200, description = "ICB industry codes")),
    tag = "listing")]
pub async fn industries_icb(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SourceParams>,
) -> ApiResult<Json<Envelope<ListingPage>>> {
    listing_response(&state, ListingKind::IndustriesIcb, params).await
}

#[utoipa::path(get, path = "/api/v1/listing/future-indices", params(SourceParams),
    responses((status = 200, description = "Index futures")),
    tag = "listing")]
pub async fn future_indices(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SourceParams>,
) -> ApiResult<Json<Envelope<ListingPage>>> {
    listing_response(&state, ListingKind::FutureIndices, params).await
}

#[utoipa::path(get, path = "/api/v1/listing/covered-warrants", params(SourceParams),
    responses((status = 200, description = "Covered warrants")),
    tag = "listing")]
pub async fn covered_warrants(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SourceParams>,
) -> ApiResult<Json<Envelope<ListingPage>>> {
    listing_response(&state, ListingKind::CoveredWarrants, params).await
}

#[utoipa::path(get, path = "/api/v1/listing/bonds", params(SourceParams),
    responses((status = 200, description = "Corporate bonds")),
    tag = "listing")]
pub async fn bonds(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SourceParams>,
) -> ApiResult<Json<Envelope<ListingPage>>> {
    listing_response(&state, ListingKind::Bonds, params).await
}

#[utoipa::path(get, path = "/api/v1/listing/government-bonds", params(SourceParams),
    responses((status = 200, description = "Government bond futures")),
    tag = "listing")]
pub async fn government_bonds(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SourceParams>,
) -> ApiResult<Json<Envelope<ListingPage>>> {
    listing_response(&state, ListingKind::GovernmentBonds, params).await
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/listing/symbols", get(all_symbols))
        .route("/listing/symbols/by-industry", get(symbols_by_industries))
        .route("/listing/symbols/by-exchange", get(symbols_by_exchange))
        .route("/listing/symbols/by-group", get(symbols_by_default_group))
        .route("/listing/symbols/by-group/{group}", get(symbols_by_group))
        .route("/listing/industries/icb", get(industries_icb))
        .route("/listing/future-indices", get(future_indices))
        .route("/listing/covered-warrants", get(covered_warrants))
        .route("/listing/bonds", get(bonds))
        .route("/listing/government-bonds", get(government_bonds))
}
