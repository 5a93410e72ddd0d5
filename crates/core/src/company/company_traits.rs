use async_trait::async_trait;
use vnstock_market_data::{CategoryData, CompanyCategory, CompanyInfo, Record, Rows, Source, Symbol};

use crate::aggregation::Sourced;
use crate::errors::Result;

fn rows_of(sourced: Sourced<CategoryData>) -> Sourced<Rows> {
    sourced.map(|data| data.into_rows().unwrap_or_default())
}

/// Company data operations.
///
/// Every call takes a [`Source`]: a single provider is called directly and
/// its errors propagate; `Unified` asks both providers and merges.
#[async_trait]
pub trait CompanyServiceTrait: Send + Sync {
    /// Fetches one category.
    async fn get_category(
        &self,
        symbol: &Symbol,
        source: Source,
        category: CompanyCategory,
    ) -> Result<Sourced<CategoryData>>;

    /// Composes all eight categories. A failed category is left empty and
    /// listed in [`CompanyInfo::unavailable`]; the call only fails when
    /// every category failed.
    async fn get_company_info(&self, symbol: &Symbol, source: Source)
        -> Result<Sourced<CompanyInfo>>;

    async fn get_company_profile(&self, symbol: &Symbol, source: Source) -> Result<Sourced<Record>> {
        let sourced = self
            .get_category(symbol, source, CompanyCategory::Profile)
            .await?;
        Ok(sourced.map(|data| data.into_profile().unwrap_or_default()))
    }

    async fn get_company_officers(&self, symbol: &Symbol, source: Source) -> Result<Sourced<Rows>> {
        self.get_category(symbol, source, CompanyCategory::Officers)
            .await
            .map(rows_of)
    }

    async fn get_shareholders(&self, symbol: &Symbol, source: Source) -> Result<Sourced<Rows>> {
        self.get_category(symbol, source, CompanyCategory::Shareholders)
            .await
            .map(rows_of)
    }

    async fn get_insider_trading(&self, symbol: &Symbol, source: Source) -> Result<Sourced<Rows>> {
        self.get_category(symbol, source, CompanyCategory::InsiderTrading)
            .await
            .map(rows_of)
    }

    async fn get_subsidiaries(&self, symbol: &Symbol, source: Source) -> Result<Sourced<Rows>> {
        self.get_category(symbol, source, CompanyCategory::Subsidiaries)
            .await
            .map(rows_of)
    }

    async fn get_company_events(&self, symbol: &Symbol, source: Source) -> Result<Sourced<Rows>> {
        self.get_category(symbol, source, CompanyCategory::Events)
            .await
            .map(rows_of)
    }

    async fn get_company_news(&self, symbol: &Symbol, source: Source) -> Result<Sourced<Rows>> {
        self.get_category(symbol, source, CompanyCategory::News)
            .await
            .map(rows_of)
    }

    async fn get_dividends(&self, symbol: &Symbol, source: Source) -> Result<Sourced<Rows>> {
        self.get_category(symbol, source, CompanyCategory::Dividends)
            .await
            .map(rows_of)
    }
}
