//! HTTP headers for the Vietnamese market providers

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT};

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/120.0.0.0 Safari/537.36";

fn browser_headers(site: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(REFERER, HeaderValue::from_static(site));
    headers.insert(ORIGIN, HeaderValue::from_static(site));
    headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    headers
}

/// Create headers for TCBS (Techcombank Securities) API requests
pub fn tcbs_headers() -> HeaderMap {
    browser_headers("https://tcinvest.tcbs.com.vn/")
}

/// Create headers for VCI (Vietcap) trading and GraphQL requests
pub fn vci_headers() -> HeaderMap {
    browser_headers("https://trading.vietcap.com.vn/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vci_headers_has_required_fields() {
        let headers = vci_headers();
        assert!(headers.contains_key(ACCEPT));
        assert!(headers.contains_key(CONTENT_TYPE));
        assert!(headers.contains_key(REFERER));
        assert!(headers.contains_key(ORIGIN));
        assert!(headers.contains_key(USER_AGENT));
    }

    #[test]
    fn test_tcbs_headers_point_at_tcbs() {
        let headers = tcbs_headers();
        let referer = headers.get(REFERER).unwrap().to_str().unwrap();
        assert!(referer.contains("tcbs.com.vn"));
    }
}
