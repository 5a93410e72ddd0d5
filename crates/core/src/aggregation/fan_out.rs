use std::future::Future;
use std::time::Duration;

use futures::future::join_all;
use log::{debug, warn};
use vnstock_market_data::{ErrorClass, MarketDataError, ProviderId};

use super::sourced::{SourceTag, Sourced};
use crate::errors::{Error, LegFailure, Result};

/// Result of one provider leg.
#[derive(Debug)]
pub struct LegOutcome<T> {
    pub provider: ProviderId,
    pub result: std::result::Result<T, MarketDataError>,
}

/// Runs a single provider call under `deadline`.
///
/// An elapsed deadline becomes [`MarketDataError::Timeout`].
pub async fn with_deadline<T, F>(
    provider: ProviderId,
    deadline: Duration,
    call: F,
) -> std::result::Result<T, MarketDataError>
where
    F: Future<Output = std::result::Result<T, MarketDataError>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(MarketDataError::Timeout {
            provider: provider.as_str().to_string(),
        }),
    }
}

/// Runs every leg concurrently and waits for all of them.
///
/// A failing or slow leg never cancels the others. Outcomes come back in
/// leg order.
pub async fn settle_all<T, I, F>(legs: I, deadline: Duration) -> Vec<LegOutcome<T>>
where
    I: IntoIterator<Item = (ProviderId, F)>,
    F: Future<Output = std::result::Result<T, MarketDataError>>,
{
    join_all(legs.into_iter().map(|(provider, call)| async move {
        LegOutcome {
            provider,
            result: with_deadline(provider, deadline, call).await,
        }
    }))
    .await
}

/// Collapses settled legs into one result.
///
/// - no successes: [`Error::AggregateFailure`] listing every cause
/// - one success: returned unmodified, tagged with its provider
/// - several: passed to `merge` and tagged unified
pub fn reconcile<T, M>(operation: &str, outcomes: Vec<LegOutcome<T>>, merge: M) -> Result<Sourced<T>>
where
    M: FnOnce(Vec<(ProviderId, T)>) -> T,
{
    let mut successes = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();

    for outcome in outcomes {
        match outcome.result {
            Ok(data) => successes.push((outcome.provider, data)),
            Err(e) => {
                if e.class() == ErrorClass::NotSupported {
                    debug!("{} skipped by {}: {}", operation, outcome.provider, e);
                } else {
                    warn!("{} failed on {}: {}", operation, outcome.provider, e);
                }
                failures.push(LegFailure::new(outcome.provider, &e));
            }
        }
    }

    match successes.len() {
        0 => Err(Error::AggregateFailure {
            operation: operation.to_string(),
            failures,
        }),
        1 => {
            let (provider, data) = successes.remove(0);
            Ok(Sourced::new(data, SourceTag::Provider(provider)))
        }
        _ => Ok(Sourced::new(merge(successes), SourceTag::Unified)),
    }
}
