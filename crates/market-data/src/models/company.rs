use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::{Record, Rows};

/// The eight categories that make up a company aggregate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompanyCategory {
    Profile,
    Officers,
    Shareholders,
    InsiderTrading,
    Subsidiaries,
    Events,
    News,
    Dividends,
}

impl CompanyCategory {
    pub const ALL: [CompanyCategory; 8] = [
        CompanyCategory::Profile,
        CompanyCategory::Officers,
        CompanyCategory::Shareholders,
        CompanyCategory::InsiderTrading,
        CompanyCategory::Subsidiaries,
        CompanyCategory::Events,
        CompanyCategory::News,
        CompanyCategory::Dividends,
    ];

    /// Every category except the profile is list-valued.
    pub fn is_list(&self) -> bool {
        !matches!(self, CompanyCategory::Profile)
    }

    /// Key under which the category appears in [`CompanyInfo`].
    pub fn info_key(&self) -> &'static str {
        match self {
            CompanyCategory::Profile => "profile",
            CompanyCategory::Officers => "listKeyOfficer",
            CompanyCategory::Shareholders => "listShareHolder",
            CompanyCategory::InsiderTrading => "listInsiderDealing",
            CompanyCategory::Subsidiaries => "listSubCompany",
            CompanyCategory::Events => "listEventNews",
            CompanyCategory::News => "listActivityNews",
            CompanyCategory::Dividends => "listDividendPaymentHis",
        }
    }

    /// Adapter operation name, used in `NotSupported` errors and logs.
    pub fn operation(&self) -> &'static str {
        match self {
            CompanyCategory::Profile => "get_company_profile",
            CompanyCategory::Officers => "get_company_officers",
            CompanyCategory::Shareholders => "get_shareholders",
            CompanyCategory::InsiderTrading => "get_insider_trading",
            CompanyCategory::Subsidiaries => "get_subsidiaries",
            CompanyCategory::Events => "get_company_events",
            CompanyCategory::News => "get_company_news",
            CompanyCategory::Dividends => "get_dividends",
        }
    }
}

impl fmt::Display for CompanyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info_key())
    }
}

/// Payload of one company category.
#[derive(Clone, Debug, PartialEq)]
pub enum CategoryData {
    Profile(Record),
    Rows(Rows),
}

impl CategoryData {
    /// Number of entries; a profile counts as one.
    pub fn len(&self) -> usize {
        match self {
            CategoryData::Profile(_) => 1,
            CategoryData::Rows(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_profile(self) -> Option<Record> {
        match self {
            CategoryData::Profile(record) => Some(record),
            CategoryData::Rows(_) => None,
        }
    }

    pub fn into_rows(self) -> Option<Rows> {
        match self {
            CategoryData::Rows(rows) => Some(rows),
            CategoryData::Profile(_) => None,
        }
    }
}

/// Per-symbol company aggregate.
///
/// List entries keep the provider's own field names.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub profile: Option<Record>,

    #[serde(rename = "listKeyOfficer", default)]
    pub officers: Rows,

    #[serde(rename = "listShareHolder", default)]
    pub shareholders: Rows,

    #[serde(rename = "listInsiderDealing", default)]
    pub insider_trading: Rows,

    #[serde(rename = "listSubCompany", default)]
    pub subsidiaries: Rows,

    #[serde(rename = "listEventNews", default)]
    pub events: Rows,

    #[serde(rename = "listActivityNews", default)]
    pub news: Rows,

    #[serde(rename = "listDividendPaymentHis", default)]
    pub dividends: Rows,

    /// Categories that could not be fetched, when composed with fault isolation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unavailable: Vec<CompanyCategory>,
}

impl CompanyInfo {
    /// Stores `data` under `category`. Mismatched payloads are ignored.
    pub fn set(&mut self, category: CompanyCategory, data: CategoryData) {
        match (category, data) {
            (CompanyCategory::Profile, CategoryData::Profile(record)) => {
                self.profile = Some(record);
            }
            (category, CategoryData::Rows(rows)) => {
                if let Some(slot) = self.rows_mut(category) {
                    *slot = rows;
                }
            }
            _ => {}
        }
    }

    /// Mutable access to a list category. `None` for the profile.
    pub fn rows_mut(&mut self, category: CompanyCategory) -> Option<&mut Rows> {
        match category {
            CompanyCategory::Profile => None,
            CompanyCategory::Officers => Some(&mut self.officers),
            CompanyCategory::Shareholders => Some(&mut self.shareholders),
            CompanyCategory::InsiderTrading => Some(&mut self.insider_trading),
            CompanyCategory::Subsidiaries => Some(&mut self.subsidiaries),
            CompanyCategory::Events => Some(&mut self.events),
            CompanyCategory::News => Some(&mut self.news),
            CompanyCategory::Dividends => Some(&mut self.dividends),
        }
    }
}
