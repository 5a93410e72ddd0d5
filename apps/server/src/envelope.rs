//! Uniform response shapes: `{data, meta}` on success, `{error, meta}` on failure.

use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use vnstock_core::{parse_source, Error as CoreError, SourceMode, Sourced};
use vnstock_market_data::{Source, Symbol};

use crate::error::ApiError;

#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct Meta {
    pub timestamp: String,
    pub version: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct Envelope<T> {
    pub data: T,
    pub meta: Meta,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
    pub meta: Meta,
}

/// Per-request context used to build both envelopes.
///
/// `code` is the error code of the endpoint family, used for failures
/// that are not input or capability errors.
pub struct RequestScope {
    code: &'static str,
    version: String,
    source: String,
    symbol: Option<String>,
}

impl RequestScope {
    pub fn new(code: &'static str, version: &str) -> Self {
        Self {
            code,
            version: version.to_string(),
            source: String::new(),
            symbol: None,
        }
    }

    pub fn with_symbol(mut self, symbol: &str) -> Self {
        self.symbol = Some(symbol.trim().to_ascii_uppercase());
        self
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn meta(&self) -> Meta {
        Meta {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            version: self.version.clone(),
            source: self.source.clone(),
            symbol: self.symbol.clone(),
        }
    }

    /// Resolves the `source` query parameter and records it for `meta`.
    pub fn source(
        &mut self,
        raw: Option<&str>,
        default: Source,
        mode: SourceMode,
    ) -> Result<Source, ApiError> {
        self.source = raw
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(default.as_str())
            .to_ascii_lowercase();
        let source = parse_source(raw, default, mode).map_err(|e| self.fail(e))?;
        self.source = source.as_str().to_string();
        Ok(source)
    }

    pub fn symbol(&self, raw: &str) -> Result<Symbol, ApiError> {
        Symbol::parse(raw).map_err(|e| self.fail(e.into()))
    }

    pub fn ok<T>(&self, sourced: Sourced<T>) -> Json<Envelope<T>> {
        let mut meta = self.meta();
        meta.source = sourced.source.as_str().to_string();
        Json(Envelope {
            data: sourced.data,
            meta,
        })
    }

    pub fn fail(&self, error: CoreError) -> ApiError {
        ApiError::from_core(self.code, error, self.meta())
    }

    pub fn invalid(&self, message: impl Into<String>) -> ApiError {
        ApiError::invalid_request(message, self.meta())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vnstock_core::SourceTag;
    use vnstock_market_data::ProviderId;

    #[test]
    fn test_ok_uses_answering_source() {
        let mut scope = RequestScope::new("COMPANY_NEWS_ERROR", "1.0").with_symbol("fpt");
        let source = scope
            .source(Some("unified"), Source::Unified, SourceMode::Lenient)
            .unwrap();
        assert_eq!(source, Source::Unified);

        let Json(envelope) = scope.ok(Sourced::new(vec![1, 2], SourceTag::Provider(ProviderId::Vci)));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["data"], serde_json::json!([1, 2]));
        assert_eq!(value["meta"]["source"], "vci");
        assert_eq!(value["meta"]["symbol"], "FPT");
        assert_eq!(value["meta"]["version"], "1.0");
        assert!(value["meta"]["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_lenient_unknown_source_is_recorded_as_fallback() {
        let mut scope = RequestScope::new("LISTING_ERROR", "1.0");
        let source = scope
            .source(Some("foo"), Source::Vci, SourceMode::Lenient)
            .unwrap();
        assert_eq!(source, Source::Tcbs);
        assert_eq!(scope.meta().source, "tcbs");
        assert!(scope.meta().symbol.is_none());
    }
}
