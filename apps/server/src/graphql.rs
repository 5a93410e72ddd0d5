//! GraphQL query surface over the company service, served at `/graphql`.
//!
//! Every field takes a `symbol` and an optional `source` (default `ALL`) and
//! answers with the payload plus the source that produced it. Service errors
//! become GraphQL error entries whose extensions carry the same `code` and
//! `status` the REST transport would use, plus the failure `class`.

use std::sync::Arc;

use async_graphql::{
    Context, EmptyMutation, EmptySubscription, Enum, ErrorExtensions, Json, Object, Schema,
    SimpleObject,
};
use serde_json::Value;
use vnstock_core::errors::Error as CoreError;
use vnstock_core::CompanyServiceTrait;
use vnstock_market_data::{CompanyCategory, Source, Symbol};

use crate::api::companies::{category_code, category_value, COMPANY_INFO_ERROR};
use crate::error::{classify, log_failure};

pub type VnstockSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

#[derive(Enum, Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum DataSource {
    Tcbs,
    Vci,
    #[default]
    All,
}

impl From<DataSource> for Source {
    fn from(source: DataSource) -> Self {
        match source {
            DataSource::Tcbs => Source::Tcbs,
            DataSource::Vci => Source::Vci,
            DataSource::All => Source::Unified,
        }
    }
}

/// A payload with the source that answered (`tcbs`, `vci` or `unified`).
#[derive(SimpleObject)]
pub struct SourcedPayload {
    pub data: Json<Value>,
    pub source: String,
}

fn graphql_error(family_code: &'static str, error: CoreError) -> async_graphql::Error {
    let (status, code) = classify(family_code, &error);
    log_failure(status, code, &error);
    let class = error.class();
    async_graphql::Error::new(error.to_string()).extend_with(|_, extensions| {
        extensions.set("code", code);
        extensions.set("status", i32::from(status.as_u16()));
        if let Some(class) = class {
            extensions.set("class", class.as_str());
        }
    })
}

fn parse_symbol(raw: &str, family_code: &'static str) -> async_graphql::Result<Symbol> {
    Symbol::parse(raw).map_err(|e| graphql_error(family_code, e.into()))
}

async fn resolve_category(
    ctx: &Context<'_>,
    symbol: &str,
    source: DataSource,
    category: CompanyCategory,
) -> async_graphql::Result<SourcedPayload> {
    let code = category_code(category);
    let service = ctx.data::<Arc<dyn CompanyServiceTrait>>()?;
    let symbol = parse_symbol(symbol, code)?;
    let sourced = service
        .get_category(&symbol, source.into(), category)
        .await
        .map_err(|e| graphql_error(code, e))?;
    Ok(SourcedPayload {
        data: Json(category_value(sourced.data)),
        source: sourced.source.to_string(),
    })
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Every company category; failed ones are listed in `unavailable`.
    async fn company_info(
        &self,
        ctx: &Context<'_>,
        symbol: String,
        #[graphql(default)] source: DataSource,
    ) -> async_graphql::Result<SourcedPayload> {
        let service = ctx.data::<Arc<dyn CompanyServiceTrait>>()?;
        let symbol = parse_symbol(&symbol, COMPANY_INFO_ERROR)?;
        let sourced = service
            .get_company_info(&symbol, source.into())
            .await
            .map_err(|e| graphql_error(COMPANY_INFO_ERROR, e))?;
        let data = serde_json::to_value(&sourced.data)?;
        Ok(SourcedPayload {
            data: Json(data),
            source: sourced.source.to_string(),
        })
    }

    async fn company_profile(
        &self,
        ctx: &Context<'_>,
        symbol: String,
        #[graphql(default)] source: DataSource,
    ) -> async_graphql::Result<SourcedPayload> {
        resolve_category(ctx, &symbol, source, CompanyCategory::Profile).await
    }

    async fn company_officers(
        &self,
        ctx: &Context<'_>,
        symbol: String,
        #[graphql(default)] source: DataSource,
    ) -> async_graphql::Result<SourcedPayload> {
        resolve_category(ctx, &symbol, source, CompanyCategory::Officers).await
    }

    async fn shareholders(
        &self,
        ctx: &Context<'_>,
        symbol: String,
        #[graphql(default)] source: DataSource,
    ) -> async_graphql::Result<SourcedPayload> {
        resolve_category(ctx, &symbol, source, CompanyCategory::Shareholders).await
    }

    async fn insider_trading(
        &self,
        ctx: &Context<'_>,
        symbol: String,
        #[graphql(default)] source: DataSource,
    ) -> async_graphql::Result<SourcedPayload> {
        resolve_category(ctx, &symbol, source, CompanyCategory::InsiderTrading).await
    }

    async fn subsidiaries(
        &self,
        ctx: &Context<'_>,
        symbol: String,
        #[graphql(default)] source: DataSource,
    ) -> async_graphql::Result<SourcedPayload> {
        resolve_category(ctx, &symbol, source, CompanyCategory::Subsidiaries).await
    }

    async fn company_events(
        &self,
        ctx: &Context<'_>,
        symbol: String,
        #[graphql(default)] source: DataSource,
    ) -> async_graphql::Result<SourcedPayload> {
        resolve_category(ctx, &symbol, source, CompanyCategory::Events).await
    }

    async fn company_news(
        &self,
        ctx: &Context<'_>,
        symbol: String,
        #[graphql(default)] source: DataSource,
    ) -> async_graphql::Result<SourcedPayload> {
        resolve_category(ctx, &symbol, source, CompanyCategory::News).await
    }

    async fn dividends(
        &self,
        ctx: &Context<'_>,
        symbol: String,
        #[graphql(default)] source: DataSource,
    ) -> async_graphql::Result<SourcedPayload> {
        resolve_category(ctx, &symbol, source, CompanyCategory::Dividends).await
    }
}

pub fn build_schema(company_service: Arc<dyn CompanyServiceTrait>) -> VnstockSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(company_service)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vnstock_core::errors::LegFailure;
    use vnstock_market_data::{MarketDataError, ProviderId};

    #[test]
    fn test_data_source_maps_all_to_unified() {
        assert_eq!(Source::from(DataSource::default()), Source::Unified);
        assert_eq!(Source::from(DataSource::Vci), Source::Vci);
    }

    #[test]
    fn test_error_extensions_follow_rest_mapping() {
        let error = CoreError::AggregateFailure {
            operation: "get_company_profile".to_string(),
            failures: ProviderId::ALL
                .iter()
                .map(|&p| {
                    LegFailure::new(
                        p,
                        &MarketDataError::Timeout {
                            provider: p.as_str().to_string(),
                        },
                    )
                })
                .collect(),
        };

        let server_error =
            graphql_error("COMPANY_PROFILE_ERROR", error).into_server_error(Default::default());
        let extensions = server_error.extensions.unwrap();
        assert_eq!(
            extensions.get("code"),
            Some(&async_graphql::Value::from("COMPANY_PROFILE_ERROR"))
        );
        assert_eq!(extensions.get("status"), Some(&async_graphql::Value::from(504)));
        assert_eq!(extensions.get("class"), Some(&async_graphql::Value::from("timeout")));
    }
}
