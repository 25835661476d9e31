use crate::core::rates::RateTable;
use crate::core::source::RateSource;
use crate::providers::util::{http_client, positive_rates};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// Full-table source backed by the open.er-api.com JSON API.
pub struct OpenErApiSource {
    base_url: String,
}

impl OpenErApiSource {
    pub fn new(base_url: &str) -> Self {
        OpenErApiSource {
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenErApiResponse {
    result: String,
    rates: HashMap<String, f64>,
}

#[async_trait]
impl RateSource for OpenErApiSource {
    fn name(&self) -> &str {
        "open.er-api.com"
    }

    async fn fetch_rates(&self) -> Result<RateTable> {
        let url = format!("{}/v6/latest/USD", self.base_url);
        debug!("Requesting rates from {}", url);

        let response = http_client()?
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} from {}", response.status(), url));
        }

        let data = response.json::<OpenErApiResponse>().await?;
        if data.result != "success" {
            return Err(anyhow!("Provider reported result '{}'", data.result));
        }

        Ok(positive_rates(data.rates))
    }
}
