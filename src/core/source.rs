//! Rate source abstraction and the ordered attempt loop.

use crate::core::rates::RateTable;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

#[async_trait]
pub trait RateSource: Send + Sync {
    /// Human-readable label, shown as the active source after a successful
    /// fetch.
    fn name(&self) -> &str;

    /// Fetches a code → rate mapping. Implementations normalize their
    /// provider's response shape and only return strictly positive rates.
    async fn fetch_rates(&self) -> Result<RateTable>;
}

pub struct FetchedRates {
    pub rates: RateTable,
    pub source: String,
}

/// Tries each source strictly in order and returns the first non-empty rate
/// table. One source's failure never aborts the sequence; an empty table
/// counts as a failure too.
pub async fn first_available(sources: &[Arc<dyn RateSource>]) -> Result<FetchedRates> {
    for source in sources {
        debug!(source = source.name(), "attempting rate source");
        match source.fetch_rates().await {
            Ok(rates) if rates.is_empty() => {
                warn!(source = source.name(), "rate source returned no rates, trying next");
            }
            Ok(rates) => {
                return Ok(FetchedRates {
                    rates,
                    source: source.name().to_string(),
                });
            }
            Err(e) => {
                warn!(source = source.name(), error = %e, "rate source failed, trying next");
            }
        }
    }
    Err(anyhow!("no rate source available"))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// A canned source for exercising the attempt loop.
    pub(crate) struct StaticSource {
        pub name: &'static str,
        pub result: std::result::Result<Vec<(&'static str, f64)>, &'static str>,
    }

    #[async_trait]
    impl RateSource for StaticSource {
        fn name(&self) -> &str {
            self.name
        }

        async fn fetch_rates(&self) -> Result<RateTable> {
            match &self.result {
                Ok(entries) => Ok(entries
                    .iter()
                    .map(|(code, rate)| (code.to_string(), *rate))
                    .collect()),
                Err(message) => Err(anyhow!(*message)),
            }
        }
    }

    pub(crate) fn failing(name: &'static str) -> Arc<dyn RateSource> {
        Arc::new(StaticSource {
            name,
            result: Err("simulated transport error"),
        })
    }

    pub(crate) fn yielding(
        name: &'static str,
        entries: Vec<(&'static str, f64)>,
    ) -> Arc<dyn RateSource> {
        Arc::new(StaticSource {
            name,
            result: Ok(entries),
        })
    }
}
