//! The active rate table and its persistence contract.

use crate::core::fallback::{self, DEFAULT_SOURCE_LABEL};
use crate::store::SnapshotStore;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Code → units per USD. Values are strictly positive; providers and the
/// fallback table both guarantee this.
pub type RateTable = HashMap<String, f64>;

pub const SNAPSHOT_VERSION: &str = "1";

/// The persisted form of the rate state. Written wholesale after every
/// successful fetch, read once at startup.
#[derive(Debug, Serialize, Deserialize)]
pub struct RateSnapshot {
    pub rates: RateTable,
    pub last_updated: DateTime<Utc>,
    pub source: String,
    pub version: String,
}

/// Owns the current rate table, the last-update timestamp and the label of
/// whichever source supplied it. The single writer is the refresh coordinator;
/// the board reads through [`RateStore::get`].
pub struct RateStore {
    rates: RateTable,
    last_updated: DateTime<Utc>,
    source: String,
    snapshot: Arc<dyn SnapshotStore>,
}

impl RateStore {
    pub fn new(snapshot: Arc<dyn SnapshotStore>) -> Self {
        Self {
            rates: RateTable::new(),
            last_updated: Utc::now(),
            source: String::new(),
            snapshot,
        }
    }

    /// Restores the last persisted snapshot, replacing rates, timestamp and
    /// source label. A missing or unreadable snapshot is a cache miss, never an
    /// error.
    pub fn load(&mut self) -> bool {
        let Some(bytes) = self.snapshot.read() else {
            debug!("no rate snapshot found");
            return false;
        };
        let parsed: RateSnapshot = match serde_json::from_slice(&bytes) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "discarding unreadable rate snapshot");
                return false;
            }
        };
        if parsed.version != SNAPSHOT_VERSION {
            // Accepted as-is; the next save rewrites it at the current version.
            debug!(
                found = %parsed.version,
                expected = SNAPSHOT_VERSION,
                "snapshot version differs"
            );
        }
        self.rates = parsed.rates;
        self.last_updated = parsed.last_updated;
        self.source = parsed.source;
        true
    }

    /// Seeds approximate rates for the given codes. Callers invoke this only
    /// when `load` left the table empty; codes unknown to the fallback table
    /// are skipped. Seeded state is not persisted.
    pub fn seed_fallback<'a>(&mut self, codes: impl IntoIterator<Item = &'a str>) {
        for code in codes {
            if self.rates.contains_key(code) {
                continue;
            }
            if let Some(rate) = fallback::fallback_rate(code) {
                self.rates.insert(code.to_string(), rate);
            }
        }
        self.last_updated = Utc::now();
        self.source = DEFAULT_SOURCE_LABEL.to_string();
    }

    /// Upserts freshly fetched rates. Codes missing from `new_rates` keep their
    /// previous value; merge never deletes. Synchronous, so the board can never
    /// observe a half-applied merge.
    pub fn merge(&mut self, new_rates: RateTable, source_label: &str) {
        self.rates.extend(new_rates);
        self.last_updated = Utc::now();
        self.source = source_label.to_string();
    }

    /// Serializes the current state over any prior snapshot.
    pub fn save(&self) -> Result<()> {
        let snapshot = RateSnapshot {
            rates: self.rates.clone(),
            last_updated: self.last_updated,
            source: self.source.clone(),
            version: SNAPSHOT_VERSION.to_string(),
        };
        self.snapshot.write(&serde_json::to_vec(&snapshot)?)
    }

    /// Active rate for a code: stored value, else fallback, else parity.
    pub fn get(&self, code: &str) -> f64 {
        self.rates
            .get(code)
            .copied()
            .or_else(|| fallback::fallback_rate(code))
            .unwrap_or(1.0)
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }
}
