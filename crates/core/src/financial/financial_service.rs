use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{log, Level};
use vnstock_market_data::{
    drop_empty_rows, ProviderFactoryTrait, ProviderId, Rows, Source, StatementKind,
    StatementQuery, Symbol,
};

use super::financial_traits::FinancialServiceTrait;
use crate::aggregation::{with_deadline, SourceTag, Sourced};
use crate::constants::{DEFAULT_FINANCIAL_PROVIDER, DEFAULT_LEG_TIMEOUT};
use crate::errors::Result;
use crate::sources::coerce_single;

pub struct FinancialService {
    factory: Arc<dyn ProviderFactoryTrait>,
    leg_timeout: Duration,
    unified_fallback: ProviderId,
}

impl FinancialService {
    pub fn new(factory: Arc<dyn ProviderFactoryTrait>) -> Self {
        Self {
            factory,
            leg_timeout: DEFAULT_LEG_TIMEOUT,
            unified_fallback: DEFAULT_FINANCIAL_PROVIDER,
        }
    }

    pub fn with_leg_timeout(mut self, leg_timeout: Duration) -> Self {
        self.leg_timeout = leg_timeout;
        self
    }
}

#[async_trait]
impl FinancialServiceTrait for FinancialService {
    async fn get_statement(
        &self,
        kind: StatementKind,
        symbol: &Symbol,
        source: Source,
        query: &StatementQuery,
    ) -> Result<Sourced<Rows>> {
        let provider = coerce_single(source, self.unified_fallback, kind.operation());
        let level = if query.show_log {
            Level::Info
        } else {
            Level::Debug
        };

        log!(
            level,
            "{} for {} from {} (period={}, lang={}, dropna={})",
            kind.operation(),
            symbol,
            provider,
            query.period.as_str(),
            query.lang.as_str(),
            query.dropna
        );

        let adapter = self.factory.financial(provider);
        let rows = with_deadline(
            provider,
            self.leg_timeout,
            adapter.get_statement(kind, symbol, query),
        )
        .await?;

        let fetched = rows.len();
        let rows = if query.dropna {
            drop_empty_rows(rows)
        } else {
            rows
        };
        log!(
            level,
            "{} for {} returned {} rows ({} dropped)",
            kind.operation(),
            symbol,
            rows.len(),
            fetched - rows.len()
        );

        Ok(Sourced::new(rows, SourceTag::Provider(provider)))
    }
}
