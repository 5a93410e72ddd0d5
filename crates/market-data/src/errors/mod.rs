//! Error types and failure classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The main error enum for all adapter operations
//! - [`ErrorClass`]: Coarse classification used for logging and transport mapping

mod class;

pub use class::ErrorClass;

use thiserror::Error;

/// Errors that can occur while talking to an upstream provider.
///
/// Each variant is classified into an [`ErrorClass`] via the [`class`](Self::class)
/// method. No variant is retried automatically.
#[derive(Error, Debug, Clone)]
pub enum MarketDataError {
    /// The symbol failed validation before any request was made.
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// A request parameter (period, language, group, ...) is not acceptable.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The provider does not know the requested symbol.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider has no endpoint for this operation.
    #[error("Operation '{operation}' is not supported by {provider}")]
    NotSupported {
        /// The adapter operation that was requested
        operation: String,
        /// The provider that lacks it
        provider: String,
    },

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out, or a fan-out leg exceeded its deadline.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider answered with a non-success status or an error payload.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider answered, but the body did not have the expected shape.
    #[error("Parse error: {provider} - {message}")]
    ParseError {
        /// The provider whose response could not be decoded
        provider: String,
        /// What went wrong while decoding
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {message}")]
    Network {
        /// The transport error, rendered
        message: String,
        /// Whether the transport gave up waiting
        timed_out: bool,
    },
}

impl From<reqwest::Error> for MarketDataError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network {
            message: e.to_string(),
            timed_out: e.is_timeout(),
        }
    }
}

impl MarketDataError {
    /// Shorthand for [`MarketDataError::NotSupported`].
    pub fn not_supported(operation: &str, provider: &str) -> Self {
        Self::NotSupported {
            operation: operation.to_string(),
            provider: provider.to_string(),
        }
    }

    /// Returns the failure classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use vnstock_market_data::errors::{ErrorClass, MarketDataError};
    ///
    /// let error = MarketDataError::not_supported("get_dividends", "vci");
    /// assert_eq!(error.class(), ErrorClass::NotSupported);
    ///
    /// let error = MarketDataError::Timeout { provider: "tcbs".to_string() };
    /// assert_eq!(error.class(), ErrorClass::Timeout);
    /// ```
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidSymbol(_) | Self::InvalidRequest(_) => ErrorClass::InvalidInput,

            Self::NotSupported { .. } => ErrorClass::NotSupported,

            Self::Timeout { .. } => ErrorClass::Timeout,

            Self::SymbolNotFound(_)
            | Self::RateLimited { .. }
            | Self::ProviderError { .. }
            | Self::ParseError { .. } => ErrorClass::Upstream,

            Self::Network { timed_out: true, .. } => ErrorClass::Timeout,
            Self::Network { .. } => ErrorClass::Upstream,
        }
    }

    /// True when the provider simply lacks the capability.
    pub fn is_not_supported(&self) -> bool {
        self.class() == ErrorClass::NotSupported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_class() {
        let error = MarketDataError::InvalidSymbol("".to_string());
        assert_eq!(error.class(), ErrorClass::InvalidInput);

        let error = MarketDataError::InvalidRequest("period 'month'".to_string());
        assert_eq!(error.class(), ErrorClass::InvalidInput);
    }

    #[test]
    fn test_not_supported_class() {
        let error = MarketDataError::not_supported("get_all_bonds", "tcbs");
        assert_eq!(error.class(), ErrorClass::NotSupported);
        assert!(error.is_not_supported());
    }

    #[test]
    fn test_upstream_class() {
        let error = MarketDataError::ProviderError {
            provider: "vci".to_string(),
            message: "HTTP 500".to_string(),
        };
        assert_eq!(error.class(), ErrorClass::Upstream);

        let error = MarketDataError::RateLimited {
            provider: "tcbs".to_string(),
        };
        assert_eq!(error.class(), ErrorClass::Upstream);
        assert!(!error.is_not_supported());
    }

    #[test]
    fn test_network_class_follows_timeout_flag() {
        let error = MarketDataError::Network {
            message: "connection reset".to_string(),
            timed_out: false,
        };
        assert_eq!(error.class(), ErrorClass::Upstream);

        let error = MarketDataError::Network {
            message: "operation timed out".to_string(),
            timed_out: true,
        };
        assert_eq!(error.clone().class(), ErrorClass::Timeout);
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::not_supported("get_dividends", "vci");
        assert_eq!(
            format!("{}", error),
            "Operation 'get_dividends' is not supported by vci"
        );

        let error = MarketDataError::ProviderError {
            provider: "tcbs".to_string(),
            message: "HTTP 503".to_string(),
        };
        assert_eq!(format!("{}", error), "Provider error: tcbs - HTTP 503");
    }
}
