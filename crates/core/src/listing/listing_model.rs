use serde::{Deserialize, Serialize};
use serde_json::Value;
use vnstock_market_data::{ListingTable, Rows};

/// Normalized listing payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPage {
    pub total_count: usize,
    pub records: Rows,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl From<ListingTable> for ListingPage {
    fn from(table: ListingTable) -> Self {
        match table {
            ListingTable::Rows(records) => Self {
                total_count: records.len(),
                records,
                metadata: None,
            },
            ListingTable::Wrapped {
                records,
                total_count,
                metadata,
            } => Self {
                total_count: total_count.unwrap_or(records.len()),
                records,
                metadata,
            },
        }
    }
}
