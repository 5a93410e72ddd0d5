//! Thin JSON-over-HTTP helper shared by the adapters.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::ProviderId;

/// Default timeout for a single upstream request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client bound to one provider, used for error attribution.
///
/// Headers and timeout are applied per request, so they survive even when the
/// tuned client cannot be built and the plain fallback is used.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    headers: HeaderMap,
    provider: ProviderId,
}

impl HttpClient {
    pub fn new(provider: ProviderId, headers: HeaderMap) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                warn!("{}: falling back to default HTTP client: {}", provider, e);
                Client::new()
            });

        Self {
            client,
            headers,
            provider,
        }
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .headers(self.headers.clone())
            .timeout(REQUEST_TIMEOUT)
    }

    /// GET `url` with query parameters and decode the JSON body.
    pub async fn get_json(&self, url: &str, params: &[(&str, &str)]) -> Result<Value, MarketDataError> {
        debug!("{} GET {} with {} params", self.provider, url, params.len());
        let request = self.request(Method::GET, url).query(params);
        self.send(request, url).await
    }

    /// POST a JSON body to `url` and decode the JSON response.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Value, MarketDataError> {
        debug!("{} POST {}", self.provider, url);
        let request = self.request(Method::POST, url).json(body);
        self.send(request, url).await
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Value, MarketDataError> {
        let provider = self.provider.as_str().to_string();

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: provider.clone(),
                }
            } else {
                MarketDataError::ProviderError {
                    provider: provider.clone(),
                    message: format!("Request failed: {}", e),
                }
            }
        })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited { provider });
        }
        if status == StatusCode::NOT_FOUND {
            return Err(MarketDataError::SymbolNotFound(format!(
                "{} returned 404 for {}",
                provider, url
            )));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(MarketDataError::ProviderError {
                provider,
                message: format!("HTTP {}: {}", status, truncate(&text, 200)),
            });
        }

        let text = response.text().await.map_err(|e| MarketDataError::ProviderError {
            provider: provider.clone(),
            message: format!("Failed to read response body: {}", e),
        })?;

        serde_json::from_str(&text).map_err(|e| MarketDataError::ParseError {
            provider,
            message: format!("Invalid JSON from {}: {}", url, e),
        })
    }
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::utils::headers::vci_headers;
    use reqwest::header::REFERER;

    #[test]
    fn test_requests_carry_provider_headers_and_timeout() {
        let http = HttpClient::new(ProviderId::Vci, vci_headers());
        let request = http
            .request(Method::GET, "https://trading.vietcap.com.vn/api/price/symbols/getAll")
            .build()
            .unwrap();

        assert_eq!(
            request.headers().get(REFERER).unwrap(),
            "https://trading.vietcap.com.vn/"
        );
        assert_eq!(request.timeout(), Some(&REQUEST_TIMEOUT));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("Công ty", 4), "Công");
        assert_eq!(truncate("FPT", 10), "FPT");
    }
}
