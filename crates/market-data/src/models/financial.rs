use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::MarketDataError;

use super::types::{Record, Rows};

/// Reporting period of a financial statement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Year,
    Quarter,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Year => "year",
            Period::Quarter => "quarter",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = MarketDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "year" | "y" | "yearly" => Ok(Period::Year),
            "quarter" | "q" | "quarterly" => Ok(Period::Quarter),
            other => Err(MarketDataError::InvalidRequest(format!(
                "period must be 'year' or 'quarter', got '{}'",
                other
            ))),
        }
    }
}

/// Language of statement line-item labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Vi,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Vi => "vi",
            Language::En => "en",
        }
    }
}

impl FromStr for Language {
    type Err = MarketDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vi" => Ok(Language::Vi),
            "en" => Ok(Language::En),
            other => Err(MarketDataError::InvalidRequest(format!(
                "lang must be 'vi' or 'en', got '{}'",
                other
            ))),
        }
    }
}

/// The four statement families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatementKind {
    BalanceSheet,
    IncomeStatement,
    CashFlow,
    Ratios,
}

impl StatementKind {
    pub const ALL: [StatementKind; 4] = [
        StatementKind::BalanceSheet,
        StatementKind::IncomeStatement,
        StatementKind::CashFlow,
        StatementKind::Ratios,
    ];

    pub fn operation(&self) -> &'static str {
        match self {
            StatementKind::BalanceSheet => "get_balance_sheet",
            StatementKind::IncomeStatement => "get_income_statement",
            StatementKind::CashFlow => "get_cash_flow",
            StatementKind::Ratios => "get_ratios",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operation().trim_start_matches("get_"))
    }
}

/// Parameters shared by every statement request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementQuery {
    pub period: Period,
    pub lang: Language,
    /// Elide rows whose values are all empty.
    pub dropna: bool,
    /// Log request parameters and row counts at info level.
    pub show_log: bool,
}

impl Default for StatementQuery {
    fn default() -> Self {
        Self {
            period: Period::Year,
            lang: Language::Vi,
            dropna: true,
            show_log: false,
        }
    }
}

/// Columns that identify a row rather than carry a figure.
const KEY_COLUMNS: &[&str] = &[
    "ticker",
    "organCode",
    "year",
    "quarter",
    "yearReport",
    "lengthReport",
    "period",
];

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// True when every non-key column of `row` is null or blank.
pub fn is_empty_row(row: &Record) -> bool {
    row.iter()
        .filter(|(key, _)| !KEY_COLUMNS.contains(&key.as_str()))
        .all(|(_, value)| is_empty_value(value))
}

/// Removes fully-empty rows, keeping the order of the rest.
pub fn drop_empty_rows(rows: Rows) -> Rows {
    rows.into_iter().filter(|row| !is_empty_row(row)).collect()
}
