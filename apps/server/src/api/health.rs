use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::main_lib::AppState;

#[derive(Serialize, ToSchema)]
pub struct RootStatus {
    status: &'static str,
    message: &'static str,
    version: String,
}

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

#[utoipa::path(get, path = "/api/v1/readyz", responses((status = 200, description = "Ready")))]
pub async fn readyz() -> &'static str {
    "ok"
}

#[utoipa::path(get, path = "/", responses((status = 200, description = "Service banner", body = RootStatus)))]
pub async fn root(State(state): State<Arc<AppState>>) -> Json<RootStatus> {
    Json(RootStatus {
        status: "ok",
        message: "Welcome to VNStock API",
        version: state.api_version.clone(),
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
