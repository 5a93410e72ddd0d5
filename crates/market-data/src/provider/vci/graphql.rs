//! GraphQL documents sent to the Vietcap data endpoint, and helpers to read
//! the answers. Requests are plain JSON POSTs of `{query, variables}`.

use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::MarketDataError;
use crate::models::{CategoryData, CompanyCategory, ProviderId, Record};
use crate::provider::traits::CategoryResults;
use crate::utils::json::{extract_rows, overlay, pointer};

const PROVIDER_ID: ProviderId = ProviderId::Vci;

/// Company document: profile, management, ownership, subsidiaries, events and news.
pub const COMPANY_QUERY: &str = r#"query Query($ticker: String!, $lang: String!) {
  CompanyListingInfo(ticker: $ticker) {
    id issueShare history companyProfile icbName3 enIcbName3 icbName2 enIcbName2
    icbName4 enIcbName4 organName enOrganName organShortName enOrganShortName
  }
  TickerPriceInfo(ticker: $ticker) {
    ceilingPrice floorPrice referencePrice openPrice matchPrice closePrice
    priceChange percentPriceChange highestPrice1Year lowestPrice1Year
    financialRatio { ticker yearReport lengthReport pe pb roe roa eps marketCap }
  }
  OrganizationManagers(ticker: $ticker) {
    id vnFullName enFullName vnPosition enPosition username quantity percentage updateDate
  }
  OrganizationShareHolders(ticker: $ticker) {
    id ticker ownerFullName en_OwnerFullName quantity percentage updateDate
  }
  Subsidiary(ticker: $ticker) {
    id organCode subOrganCode percentage subOrListingInfo { enOrganName organName }
  }
  OrganizationEvents(ticker: $ticker) {
    id organCode ticker eventTitle en_EventTitle publicDate issueDate sourceUrl
    eventListCode ratio value recordDate exrightDate eventListName en_EventListName
  }
  News(ticker: $ticker, langCode: $lang) {
    id organCode ticker newsTitle newsSubTitle friendlySubTitle newsImageUrl
    newsSourceLink createdAt publicDate updatedAt langCode newsId newsShortContent
    closePrice referencePrice floorPrice ceilingPrice percentPriceChange
  }
}"#;

/// Every listed company with its ICB classification.
pub const INDUSTRIES_QUERY: &str = r#"query Query {
  CompaniesListingInfo {
    ticker organName enOrganName icbName3 enIcbName3 icbName2 enIcbName2
    icbName4 enIcbName4 comTypeCode icbCode1 icbCode2 icbCode3 icbCode4
  }
}"#;

/// The ICB code tree.
pub const ICB_QUERY: &str = r#"query Query {
  ListIcbCode {
    icbCode level icbName enIcbName
  }
}"#;

#[derive(Serialize)]
pub struct GraphqlRequest<'a> {
    pub query: &'a str,
    pub variables: Value,
}

impl<'a> GraphqlRequest<'a> {
    pub fn company(ticker: &str) -> Self {
        Self {
            query: COMPANY_QUERY,
            variables: json!({ "ticker": ticker, "lang": "vi" }),
        }
    }

    pub fn without_variables(query: &'a str) -> Self {
        Self {
            query,
            variables: json!({}),
        }
    }
}

/// Unwraps `data`, turning a non-empty `errors` array into a provider error.
pub fn into_data(mut response: Value) -> Result<Value, MarketDataError> {
    if let Some(errors) = response.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let message = errors
                .iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.as_str().to_string(),
                message: format!("GraphQL error: {}", message),
            });
        }
    }
    match response.get_mut("data").map(Value::take) {
        Some(data) if !data.is_null() => Ok(data),
        _ => Err(MarketDataError::ParseError {
            provider: PROVIDER_ID.as_str().to_string(),
            message: "GraphQL response has no data".to_string(),
        }),
    }
}

/// Field of the company document that holds a list category.
fn list_field(category: CompanyCategory) -> Option<&'static str> {
    match category {
        CompanyCategory::Officers => Some("OrganizationManagers"),
        CompanyCategory::Shareholders => Some("OrganizationShareHolders"),
        CompanyCategory::Subsidiaries => Some("Subsidiary"),
        CompanyCategory::Events => Some("OrganizationEvents"),
        CompanyCategory::News => Some("News"),
        CompanyCategory::Profile | CompanyCategory::InsiderTrading | CompanyCategory::Dividends => {
            None
        }
    }
}

/// Reads one category out of the company document (`data` already unwrapped).
pub fn category_from_document(
    data: &Value,
    category: CompanyCategory,
) -> Result<CategoryData, MarketDataError> {
    if category == CompanyCategory::Profile {
        return profile_from_document(data).map(CategoryData::Profile);
    }
    let field = list_field(category).ok_or_else(|| {
        MarketDataError::not_supported(category.operation(), PROVIDER_ID.as_str())
    })?;
    let table = data.get(field).cloned().unwrap_or(Value::Null);
    extract_rows(table, PROVIDER_ID, &[]).map(CategoryData::Rows)
}

/// Reads every requested category out of one company document.
pub fn categories_from_document(data: &Value, categories: &[CompanyCategory]) -> CategoryResults {
    categories
        .iter()
        .map(|&category| (category, category_from_document(data, category)))
        .collect()
}

fn profile_from_document(data: &Value) -> Result<Record, MarketDataError> {
    let listing = match pointer(data, &["CompanyListingInfo"]) {
        Some(Value::Object(map)) => map.clone(),
        _ => {
            return Err(MarketDataError::SymbolNotFound(
                "VCI has no listing info for this ticker".to_string(),
            ))
        }
    };
    let price = match pointer(data, &["TickerPriceInfo"]) {
        Some(Value::Object(map)) => map.clone(),
        _ => Record::new(),
    };
    Ok(overlay(listing, price))
}
