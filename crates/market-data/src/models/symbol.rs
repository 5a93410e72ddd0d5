use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::MarketDataError;

const MAX_SYMBOL_LEN: usize = 20;

/// Canonical stock ticker. Always upper-case.
///
/// Tickers are case-insensitive on input; `Symbol::parse("fpt")` and
/// `Symbol::parse("FPT")` are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    pub fn parse(raw: &str) -> Result<Self, MarketDataError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MarketDataError::InvalidSymbol(
                "symbol must not be empty".to_string(),
            ));
        }
        if trimmed.len() > MAX_SYMBOL_LEN {
            return Err(MarketDataError::InvalidSymbol(format!(
                "'{}' is longer than {} characters",
                trimmed, MAX_SYMBOL_LEN
            )));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(MarketDataError::InvalidSymbol(format!(
                "'{}' contains unsupported characters",
                trimmed
            )));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Symbol {
    type Error = MarketDataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Symbol::parse(&value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}
