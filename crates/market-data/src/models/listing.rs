use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::Rows;

/// Default group for symbol-by-group lookups.
pub const DEFAULT_SYMBOL_GROUP: &str = "VN30";

/// The listing operations an adapter may offer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "group")]
pub enum ListingKind {
    AllSymbols,
    SymbolsByIndustries,
    SymbolsByExchange,
    SymbolsByGroup(String),
    IndustriesIcb,
    FutureIndices,
    CoveredWarrants,
    Bonds,
    GovernmentBonds,
}

impl ListingKind {
    /// Stable operation name, ignoring any group argument.
    pub fn operation(&self) -> &'static str {
        match self {
            ListingKind::AllSymbols => "get_all_symbols",
            ListingKind::SymbolsByIndustries => "get_symbols_by_industries",
            ListingKind::SymbolsByExchange => "get_symbols_by_exchange",
            ListingKind::SymbolsByGroup(_) => "get_symbols_by_group",
            ListingKind::IndustriesIcb => "get_industries_icb",
            ListingKind::FutureIndices => "get_all_future_indices",
            ListingKind::CoveredWarrants => "get_all_covered_warrant",
            ListingKind::Bonds => "get_all_bonds",
            ListingKind::GovernmentBonds => "get_all_government_bonds",
        }
    }

    /// `SymbolsByGroup` with the default group.
    pub fn default_group() -> Self {
        ListingKind::SymbolsByGroup(DEFAULT_SYMBOL_GROUP.to_string())
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingKind::SymbolsByGroup(group) => write!(f, "{}({})", self.operation(), group),
            _ => f.write_str(self.operation()),
        }
    }
}

/// Provider-native listing payload.
///
/// Some endpoints return a bare table, others a pre-wrapped object that
/// already carries a count and metadata.
#[derive(Clone, Debug, PartialEq)]
pub enum ListingTable {
    Rows(Rows),
    Wrapped {
        records: Rows,
        total_count: Option<usize>,
        metadata: Option<Value>,
    },
}

impl ListingTable {
    pub fn len(&self) -> usize {
        match self {
            ListingTable::Rows(rows) => rows.len(),
            ListingTable::Wrapped { records, .. } => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
