//! Core error types for the VNStock aggregation services.
//!
//! Adapter failures arrive as [`MarketDataError`] and are wrapped as-is on
//! single-source paths. Unified fan-outs only surface an error when every
//! leg failed, as [`Error::AggregateFailure`].

use std::fmt;

use thiserror::Error;
use vnstock_market_data::{ErrorClass, MarketDataError, ProviderId};

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the aggregation services.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Invalid source '{0}': expected one of tcbs, vci, unified")]
    InvalidSource(String),

    #[error("All sources failed for {operation}: {}", describe(.failures))]
    AggregateFailure {
        operation: String,
        failures: Vec<LegFailure>,
    },
}

impl Error {
    /// Failure class of the cause. An aggregate failure has one only when
    /// every leg failed the same way.
    pub fn class(&self) -> Option<ErrorClass> {
        match self {
            Error::MarketData(e) => Some(e.class()),
            Error::InvalidSource(_) => Some(ErrorClass::InvalidInput),
            Error::AggregateFailure { failures, .. } => {
                let first = failures.first()?.class;
                failures
                    .iter()
                    .all(|failure| failure.class == first)
                    .then_some(first)
            }
        }
    }
}

/// Why one leg of a fan-out produced nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegFailure {
    pub provider: ProviderId,
    pub class: ErrorClass,
    pub message: String,
}

impl LegFailure {
    pub fn new(provider: ProviderId, error: &MarketDataError) -> Self {
        Self {
            provider,
            class: error.class(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for LegFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.provider, self.message)
    }
}

fn describe(failures: &[LegFailure]) -> String {
    failures
        .iter()
        .map(LegFailure::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
