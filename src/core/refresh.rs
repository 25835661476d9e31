//! Orchestrates rate refresh attempts against the store.

use crate::core::rates::RateStore;
use crate::core::source::{self, RateSource};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Fresh rates were merged and persisted.
    Updated { source: String },
    /// Every source failed; previously known rates remain authoritative.
    UsingCachedData { error: String },
    /// A refresh was already in flight; this request was dropped.
    AlreadyFetching,
}

/// At most one refresh runs at a time. Execution is cooperative and
/// single-threaded, so a plain flag is enough for the guard.
#[derive(Default)]
pub struct RateCoordinator {
    fetching: bool,
}

impl RateCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    /// Runs one refresh attempt. On success the fetched rates are merged into
    /// the store and persisted; on exhaustion the store is left untouched. The
    /// busy flag is cleared on every exit path.
    pub async fn refresh(
        &mut self,
        store: &mut RateStore,
        sources: &[Arc<dyn RateSource>],
    ) -> RefreshOutcome {
        if self.fetching {
            return RefreshOutcome::AlreadyFetching;
        }
        self.fetching = true;

        let outcome = match source::first_available(sources).await {
            Ok(fetched) => {
                store.merge(fetched.rates, &fetched.source);
                if let Err(e) = store.save() {
                    // Persistence is best-effort; the in-memory state is already
                    // updated.
                    warn!(error = %e, "failed to persist rate snapshot");
                }
                info!(source = %fetched.source, "exchange rates updated");
                RefreshOutcome::Updated {
                    source: fetched.source,
                }
            }
            Err(e) => {
                warn!(error = %e, "all rate sources failed, keeping cached rates");
                RefreshOutcome::UsingCachedData {
                    error: e.to_string(),
                }
            }
        };

        self.fetching = false;
        outcome
    }
}
