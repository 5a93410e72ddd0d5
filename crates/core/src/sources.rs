//! Turning request source strings into [`Source`] directives.

use log::warn;
use vnstock_market_data::{resolve_provider, ProviderId, Source};

use crate::errors::{Error, Result};

/// What to do with a source string that names no known source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SourceMode {
    /// Warn and fall back to the default provider (TCBS).
    #[default]
    Lenient,
    /// Reject with [`Error::InvalidSource`].
    Strict,
}

/// Parses an optional request source. Missing or blank input yields `default`.
pub fn parse_source(raw: Option<&str>, default: Source, mode: SourceMode) -> Result<Source> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(default);
    };
    match raw.parse::<Source>() {
        Ok(source) => Ok(source),
        Err(_) => match mode {
            SourceMode::Strict => Err(Error::InvalidSource(raw.to_string())),
            SourceMode::Lenient => Ok(resolve_provider(raw).provider.into()),
        },
    }
}

/// Collapses a directive to one provider for data that is never merged.
pub fn coerce_single(source: Source, fallback: ProviderId, operation: &str) -> ProviderId {
    match source.single() {
        Some(provider) => provider,
        None => {
            warn!(
                "{} does not merge across sources, using '{}' for unified request",
                operation, fallback
            );
            fallback
        }
    }
}
