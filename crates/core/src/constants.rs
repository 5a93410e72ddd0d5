use std::time::Duration;

use vnstock_market_data::{ProviderId, Source};

/// Deadline for one provider call inside a request, including fan-out legs.
pub const DEFAULT_LEG_TIMEOUT: Duration = Duration::from_secs(15);

/// Provider used for financial statements when the request names none, or asks for "unified".
pub const DEFAULT_FINANCIAL_PROVIDER: ProviderId = ProviderId::Tcbs;

/// Provider used for listings when the request names none, or asks for "unified".
pub const DEFAULT_LISTING_PROVIDER: ProviderId = ProviderId::Vci;

/// Field added to each merged list element naming the provider it came from.
///
/// Not `source`: some provider rows (TCBS news) already use that key.
pub const SOURCE_TAG_KEY: &str = "dataSource";

/// Source used for company requests that name none.
pub const DEFAULT_COMPANY_SOURCE: Source = Source::Unified;
