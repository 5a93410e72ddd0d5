//! Source adapter trait definitions.
//!
//! An adapter translates one upstream provider's responses into the working
//! representation ([`Record`] rows in provider order). The capability set is
//! split into three traits: company, financial and listing data.
//!
//! Every operation has a default body that fails with
//! [`MarketDataError::NotSupported`]; an adapter overrides only the
//! operations its provider actually serves, and lists them in its
//! [`ProviderCapabilities`].

use async_trait::async_trait;
use futures::future::join_all;

use crate::errors::MarketDataError;
use crate::models::{
    CategoryData, CompanyCategory, CompanyInfo, ListingKind, ListingTable, ProviderId, Record,
    Rows, StatementKind, StatementQuery, Symbol,
};

use super::capabilities::ProviderCapabilities;

/// Per-category outcomes of [`CompanyProvider::get_categories`], in request order.
pub type CategoryResults = Vec<(CompanyCategory, Result<CategoryData, MarketDataError>)>;

fn unsupported(operation: &str, provider: ProviderId) -> MarketDataError {
    MarketDataError::not_supported(operation, provider.as_str())
}

/// Company reference data.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use vnstock_market_data::provider::{CompanyProvider, ProviderCapabilities};
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl CompanyProvider for MyProvider {
///     fn id(&self) -> ProviderId {
///         ProviderId::Tcbs
///     }
///
///     fn capabilities(&self) -> ProviderCapabilities {
///         ProviderCapabilities {
///             company: &[CompanyCategory::Profile],
///             statements: &[],
///             listing: &[],
///         }
///     }
///
///     async fn get_company_profile(&self, symbol: &Symbol) -> Result<Record, MarketDataError> {
///         // ...
///     }
/// }
/// ```
#[async_trait]
pub trait CompanyProvider: Send + Sync {
    /// The provider this adapter talks to.
    fn id(&self) -> ProviderId;

    /// Static capability matrix of this adapter.
    fn capabilities(&self) -> ProviderCapabilities;

    async fn get_company_profile(&self, symbol: &Symbol) -> Result<Record, MarketDataError> {
        let _ = symbol;
        Err(unsupported("get_company_profile", self.id()))
    }

    async fn get_company_officers(&self, symbol: &Symbol) -> Result<Rows, MarketDataError> {
        let _ = symbol;
        Err(unsupported("get_company_officers", self.id()))
    }

    async fn get_shareholders(&self, symbol: &Symbol) -> Result<Rows, MarketDataError> {
        let _ = symbol;
        Err(unsupported("get_shareholders", self.id()))
    }

    async fn get_insider_trading(&self, symbol: &Symbol) -> Result<Rows, MarketDataError> {
        let _ = symbol;
        Err(unsupported("get_insider_trading", self.id()))
    }

    async fn get_subsidiaries(&self, symbol: &Symbol) -> Result<Rows, MarketDataError> {
        let _ = symbol;
        Err(unsupported("get_subsidiaries", self.id()))
    }

    async fn get_company_events(&self, symbol: &Symbol) -> Result<Rows, MarketDataError> {
        let _ = symbol;
        Err(unsupported("get_company_events", self.id()))
    }

    async fn get_company_news(&self, symbol: &Symbol) -> Result<Rows, MarketDataError> {
        let _ = symbol;
        Err(unsupported("get_company_news", self.id()))
    }

    async fn get_dividends(&self, symbol: &Symbol) -> Result<Rows, MarketDataError> {
        let _ = symbol;
        Err(unsupported("get_dividends", self.id()))
    }

    /// Fetches one category by name.
    async fn get_category(
        &self,
        symbol: &Symbol,
        category: CompanyCategory,
    ) -> Result<CategoryData, MarketDataError> {
        let data = match category {
            CompanyCategory::Profile => CategoryData::Profile(self.get_company_profile(symbol).await?),
            CompanyCategory::Officers => CategoryData::Rows(self.get_company_officers(symbol).await?),
            CompanyCategory::Shareholders => CategoryData::Rows(self.get_shareholders(symbol).await?),
            CompanyCategory::InsiderTrading => {
                CategoryData::Rows(self.get_insider_trading(symbol).await?)
            }
            CompanyCategory::Subsidiaries => CategoryData::Rows(self.get_subsidiaries(symbol).await?),
            CompanyCategory::Events => CategoryData::Rows(self.get_company_events(symbol).await?),
            CompanyCategory::News => CategoryData::Rows(self.get_company_news(symbol).await?),
            CompanyCategory::Dividends => CategoryData::Rows(self.get_dividends(symbol).await?),
        };
        Ok(data)
    }

    /// Fetches several categories, each failing on its own.
    ///
    /// The outer error is reserved for a failure shared by every category,
    /// such as a single upstream document that could not be fetched. The
    /// default runs [`get_category`](Self::get_category) concurrently and
    /// never fails as a whole.
    async fn get_categories(
        &self,
        symbol: &Symbol,
        categories: &[CompanyCategory],
    ) -> Result<CategoryResults, MarketDataError> {
        let results = join_all(categories.iter().map(|&category| async move {
            (category, self.get_category(symbol, category).await)
        }))
        .await;
        Ok(results)
    }

    /// Composes all eight categories into one aggregate.
    ///
    /// Atomic: the first failing category fails the whole call. Categories
    /// outside this adapter's capability matrix are left empty rather than
    /// requested. Fault-isolated composition lives in the company service.
    async fn get_company_info(&self, symbol: &Symbol) -> Result<CompanyInfo, MarketDataError> {
        let capabilities = self.capabilities();
        let mut info = CompanyInfo::default();
        for category in CompanyCategory::ALL {
            if !capabilities.supports_company(category) {
                continue;
            }
            let data = self.get_category(symbol, category).await?;
            info.set(category, data);
        }
        Ok(info)
    }
}

/// Financial statements. Rows are period-keyed and never merged across providers.
#[async_trait]
pub trait FinancialProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    fn capabilities(&self) -> ProviderCapabilities;

    async fn get_balance_sheet(
        &self,
        symbol: &Symbol,
        query: &StatementQuery,
    ) -> Result<Rows, MarketDataError> {
        let _ = (symbol, query);
        Err(unsupported("get_balance_sheet", self.id()))
    }

    async fn get_income_statement(
        &self,
        symbol: &Symbol,
        query: &StatementQuery,
    ) -> Result<Rows, MarketDataError> {
        let _ = (symbol, query);
        Err(unsupported("get_income_statement", self.id()))
    }

    async fn get_cash_flow(
        &self,
        symbol: &Symbol,
        query: &StatementQuery,
    ) -> Result<Rows, MarketDataError> {
        let _ = (symbol, query);
        Err(unsupported("get_cash_flow", self.id()))
    }

    async fn get_ratios(
        &self,
        symbol: &Symbol,
        query: &StatementQuery,
    ) -> Result<Rows, MarketDataError> {
        let _ = (symbol, query);
        Err(unsupported("get_ratios", self.id()))
    }

    /// Fetches one statement family by kind.
    async fn get_statement(
        &self,
        kind: StatementKind,
        symbol: &Symbol,
        query: &StatementQuery,
    ) -> Result<Rows, MarketDataError> {
        match kind {
            StatementKind::BalanceSheet => self.get_balance_sheet(symbol, query).await,
            StatementKind::IncomeStatement => self.get_income_statement(symbol, query).await,
            StatementKind::CashFlow => self.get_cash_flow(symbol, query).await,
            StatementKind::Ratios => self.get_ratios(symbol, query).await,
        }
    }
}

/// Symbol listings and classifications. Not symbol-scoped.
#[async_trait]
pub trait ListingProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    fn capabilities(&self) -> ProviderCapabilities;

    async fn get_all_symbols(&self) -> Result<ListingTable, MarketDataError> {
        Err(unsupported("get_all_symbols", self.id()))
    }

    async fn get_symbols_by_industries(&self) -> Result<ListingTable, MarketDataError> {
        Err(unsupported("get_symbols_by_industries", self.id()))
    }

    async fn get_symbols_by_exchange(&self) -> Result<ListingTable, MarketDataError> {
        Err(unsupported("get_symbols_by_exchange", self.id()))
    }

    async fn get_symbols_by_group(&self, group: &str) -> Result<ListingTable, MarketDataError> {
        let _ = group;
        Err(unsupported("get_symbols_by_group", self.id()))
    }

    async fn get_industries_icb(&self) -> Result<ListingTable, MarketDataError> {
        Err(unsupported("get_industries_icb", self.id()))
    }

    async fn get_all_future_indices(&self) -> Result<ListingTable, MarketDataError> {
        Err(unsupported("get_all_future_indices", self.id()))
    }

    async fn get_all_covered_warrant(&self) -> Result<ListingTable, MarketDataError> {
        Err(unsupported("get_all_covered_warrant", self.id()))
    }

    async fn get_all_bonds(&self) -> Result<ListingTable, MarketDataError> {
        Err(unsupported("get_all_bonds", self.id()))
    }

    async fn get_all_government_bonds(&self) -> Result<ListingTable, MarketDataError> {
        Err(unsupported("get_all_government_bonds", self.id()))
    }

    /// Runs one listing operation by kind.
    async fn get_listing(&self, kind: &ListingKind) -> Result<ListingTable, MarketDataError> {
        match kind {
            ListingKind::AllSymbols => self.get_all_symbols().await,
            ListingKind::SymbolsByIndustries => self.get_symbols_by_industries().await,
            ListingKind::SymbolsByExchange => self.get_symbols_by_exchange().await,
            ListingKind::SymbolsByGroup(group) => self.get_symbols_by_group(group).await,
            ListingKind::IndustriesIcb => self.get_industries_icb().await,
            ListingKind::FutureIndices => self.get_all_future_indices().await,
            ListingKind::CoveredWarrants => self.get_all_covered_warrant().await,
            ListingKind::Bonds => self.get_all_bonds().await,
            ListingKind::GovernmentBonds => self.get_all_government_bonds().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    struct ProfileOnly {
        calls: Arc<Mutex<Vec<&'static str>>>,
        fail_officers: bool,
    }

    #[async_trait]
    impl CompanyProvider for ProfileOnly {
        fn id(&self) -> ProviderId {
            ProviderId::Vci
        }

        fn capabilities(&self) -> ProviderCapabilities {
            ProviderCapabilities {
                company: &[CompanyCategory::Profile, CompanyCategory::Officers],
                statements: &[],
                listing: &[],
            }
        }

        async fn get_company_profile(&self, symbol: &Symbol) -> Result<Record, MarketDataError> {
            self.calls.lock().unwrap().push("profile");
            let mut record = Record::new();
            record.insert("ticker".to_string(), json!(symbol.as_str()));
            Ok(record)
        }

        async fn get_company_officers(&self, _symbol: &Symbol) -> Result<Rows, MarketDataError> {
            self.calls.lock().unwrap().push("officers");
            if self.fail_officers {
                return Err(MarketDataError::ProviderError {
                    provider: "vci".to_string(),
                    message: "HTTP 500".to_string(),
                });
            }
            Ok(vec![Record::new(), Record::new()])
        }
    }

    #[tokio::test]
    async fn test_default_operations_are_not_supported() {
        let provider = ProfileOnly {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_officers: false,
        };
        let symbol = Symbol::parse("FPT").unwrap();

        let err = provider.get_dividends(&symbol).await.unwrap_err();
        match err {
            MarketDataError::NotSupported {
                operation,
                provider,
            } => {
                assert_eq!(operation, "get_dividends");
                assert_eq!(provider, "vci");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_company_info_skips_unsupported_categories() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let provider = ProfileOnly {
            calls: calls.clone(),
            fail_officers: false,
        };
        let symbol = Symbol::parse("fpt").unwrap();

        let info = provider.get_company_info(&symbol).await.unwrap();
        assert_eq!(info.profile.unwrap()["ticker"], "FPT");
        assert_eq!(info.officers.len(), 2);
        assert!(info.dividends.is_empty());
        assert_eq!(*calls.lock().unwrap(), vec!["profile", "officers"]);
    }

    #[tokio::test]
    async fn test_get_categories_isolates_failures() {
        let provider = ProfileOnly {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_officers: true,
        };
        let symbol = Symbol::parse("FPT").unwrap();

        let results = provider
            .get_categories(&symbol, &CompanyCategory::ALL)
            .await
            .unwrap();

        assert_eq!(results.len(), CompanyCategory::ALL.len());
        assert_eq!(results[0].0, CompanyCategory::Profile);
        assert!(results[0].1.is_ok());
        assert!(matches!(
            results[1].1,
            Err(MarketDataError::ProviderError { .. })
        ));
        assert!(results[7].1.as_ref().unwrap_err().is_not_supported());
    }

    #[tokio::test]
    async fn test_company_info_is_atomic() {
        let provider = ProfileOnly {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_officers: true,
        };
        let symbol = Symbol::parse("FPT").unwrap();

        let result = provider.get_company_info(&symbol).await;
        assert!(matches!(
            result,
            Err(MarketDataError::ProviderError { .. })
        ));
    }
}
