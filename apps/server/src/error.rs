use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use vnstock_core::errors::Error as CoreError;
use vnstock_market_data::ErrorClass;

use crate::envelope::{ErrorBody, ErrorEnvelope, Meta};

pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
pub const INVALID_SOURCE: &str = "INVALID_SOURCE";
pub const NOT_IMPLEMENTED: &str = "NOT_IMPLEMENTED";
pub const NOT_FOUND: &str = "NOT_FOUND";

#[derive(Error, Debug)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub meta: Meta,
}

/// Status and error code for a service error. `family_code` is used for
/// provider-side failures.
pub(crate) fn classify(family_code: &'static str, error: &CoreError) -> (StatusCode, &'static str) {
    match (error, error.class()) {
        (CoreError::InvalidSource(_), _) => (StatusCode::BAD_REQUEST, INVALID_SOURCE),
        (_, Some(ErrorClass::InvalidInput)) => (StatusCode::BAD_REQUEST, INVALID_REQUEST),
        (_, Some(ErrorClass::NotSupported)) => (StatusCode::NOT_IMPLEMENTED, NOT_IMPLEMENTED),
        (_, Some(ErrorClass::Timeout)) => (StatusCode::GATEWAY_TIMEOUT, family_code),
        (_, Some(ErrorClass::Upstream)) => (StatusCode::BAD_GATEWAY, family_code),
        // Mixed-cause aggregates land here.
        (_, None) => (StatusCode::INTERNAL_SERVER_ERROR, family_code),
    }
}

pub(crate) fn log_failure(status: StatusCode, code: &str, error: &CoreError) {
    if status.is_server_error() {
        tracing::error!("{} ({}): {}", code, status.as_u16(), error);
    } else {
        tracing::debug!("{} ({}): {}", code, status.as_u16(), error);
    }
}

impl ApiError {
    /// Maps a service error onto a status and code.
    pub fn from_core(family_code: &'static str, error: CoreError, meta: Meta) -> Self {
        let (status, code) = classify(family_code, &error);
        log_failure(status, code, &error);
        Self {
            status,
            code,
            message: error.to_string(),
            meta,
        }
    }

    pub fn invalid_request(message: impl Into<String>, meta: Meta) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: INVALID_REQUEST,
            message: message.into(),
            meta,
        }
    }

    pub fn not_found(message: impl Into<String>, meta: Meta) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code: NOT_FOUND,
            message: message.into(),
            meta,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorEnvelope {
            error: ErrorBody {
                code: self.code.to_string(),
                message: self.message,
            },
            meta: self.meta,
        });
        (self.status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
