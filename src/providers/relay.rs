use crate::core::rates::RateTable;
use crate::core::source::RateSource;
use crate::providers::util::{http_client, positive_rates};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// Source that reads exchangerate-api.com through a generic relay. The relay
/// returns the upstream body double-encoded as a string field, so the payload
/// needs a second JSON parse.
pub struct RelaySource {
    base_url: String,
    target_url: String,
}

impl RelaySource {
    pub fn new(base_url: &str, target_url: &str) -> Self {
        RelaySource {
            base_url: base_url.to_string(),
            target_url: target_url.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RelayEnvelope {
    contents: String,
}

#[derive(Debug, Deserialize)]
struct UpstreamRates {
    rates: HashMap<String, f64>,
}

#[async_trait]
impl RateSource for RelaySource {
    fn name(&self) -> &str {
        "exchangerate-api.com"
    }

    async fn fetch_rates(&self) -> Result<RateTable> {
        let url = format!("{}/get", self.base_url);
        debug!("Requesting {} via relay {}", self.target_url, url);

        let response = http_client()?
            .get(&url)
            .query(&[("url", self.target_url.as_str())])
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} from {}", response.status(), url));
        }

        let envelope = response
            .json::<RelayEnvelope>()
            .await
            .map_err(|e| anyhow!("Failed to parse relay envelope: {}", e))?;

        let upstream: UpstreamRates = serde_json::from_str(&envelope.contents)
            .map_err(|e| anyhow!("Failed to parse relayed payload: {}", e))?;

        Ok(positive_rates(upstream.rates))
    }
}
