use std::sync::Arc;

use async_graphql_axum::GraphQL;
use axum::{
    http::{HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    config::Config,
    envelope::{ErrorBody, ErrorEnvelope, Meta},
    graphql::build_schema,
    main_lib::AppState,
};

pub mod companies;
pub mod financial;
pub mod health;
pub mod listing;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        health::readyz,
        health::root,
        companies::get_company_info,
        companies::get_company_category,
        financial::get_statement,
        listing::all_symbols,
        listing::symbols_by_industries,
        listing::symbols_by_exchange,
        listing::symbols_by_default_group,
        listing::symbols_by_group,
        listing::industries_icb,
        listing::future_indices,
        listing::covered_warrants,
        listing::bonds,
        listing::government_bonds
    ),
    components(schemas(Meta, ErrorBody, ErrorEnvelope, health::RootStatus)),
    tags((name = "vnstock", description = "Vietnamese stock-market reference data"))
)]
pub struct ApiDoc;

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allow.iter().any(|o| o == "*") {
        return CorsLayer::new().allow_origin(Any);
    }
    let origins = config
        .cors_allow
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect::<Vec<_>>();
    CorsLayer::new().allow_origin(origins)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let openapi = ApiDoc::openapi();
    let schema = build_schema(state.company_service.clone());

    let api = Router::new()
        .merge(health::router())
        .merge(companies::router())
        .merge(financial::router())
        .merge(listing::router());

    Router::new()
        .route("/", get(health::root))
        .nest("/api/v1", api)
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .route_service("/graphql", GraphQL::new(schema))
        .with_state(state)
        .layer(cors_layer(config))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
}
