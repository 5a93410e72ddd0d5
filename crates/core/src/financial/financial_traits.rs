use async_trait::async_trait;
use vnstock_market_data::{Rows, Source, StatementKind, StatementQuery, Symbol};

use crate::aggregation::Sourced;
use crate::errors::Result;

/// Financial statement operations.
///
/// Statements are period-keyed tables and are never merged across
/// providers; a unified request is served by one provider.
#[async_trait]
pub trait FinancialServiceTrait: Send + Sync {
    async fn get_statement(
        &self,
        kind: StatementKind,
        symbol: &Symbol,
        source: Source,
        query: &StatementQuery,
    ) -> Result<Sourced<Rows>>;

    async fn get_balance_sheet(
        &self,
        symbol: &Symbol,
        source: Source,
        query: &StatementQuery,
    ) -> Result<Sourced<Rows>> {
        self.get_statement(StatementKind::BalanceSheet, symbol, source, query)
            .await
    }

    async fn get_income_statement(
        &self,
        symbol: &Symbol,
        source: Source,
        query: &StatementQuery,
    ) -> Result<Sourced<Rows>> {
        self.get_statement(StatementKind::IncomeStatement, symbol, source, query)
            .await
    }

    async fn get_cash_flow(
        &self,
        symbol: &Symbol,
        source: Source,
        query: &StatementQuery,
    ) -> Result<Sourced<Rows>> {
        self.get_statement(StatementKind::CashFlow, symbol, source, query)
            .await
    }

    async fn get_ratios(
        &self,
        symbol: &Symbol,
        source: Source,
        query: &StatementQuery,
    ) -> Result<Sourced<Rows>> {
        self.get_statement(StatementKind::Ratios, symbol, source, query)
            .await
    }
}
