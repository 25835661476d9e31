use crate::core::rates::RateTable;
use crate::core::source::RateSource;
use crate::providers::util::http_client;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Rough USD/CNY rate used when the quote body cannot be read.
pub const CNY_ESTIMATE: f64 = 7.2;

/// Last-resort source: a single USD→CNY quote from frankfurter. Transport and
/// status failures propagate; parse failures substitute [`CNY_ESTIMATE`]
/// instead of failing the source.
pub struct FrankfurterSource {
    base_url: String,
}

impl FrankfurterSource {
    pub fn new(base_url: &str) -> Self {
        FrankfurterSource {
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FrankfurterResponse {
    rates: HashMap<String, f64>,
}

#[async_trait]
impl RateSource for FrankfurterSource {
    fn name(&self) -> &str {
        "frankfurter.dev"
    }

    async fn fetch_rates(&self) -> Result<RateTable> {
        let url = format!("{}/v1/latest?base=USD&symbols=CNY", self.base_url);
        debug!("Requesting USD/CNY quote from {}", url);

        let response = http_client()?
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} from {}", response.status(), url));
        }

        let rate = match response.json::<FrankfurterResponse>().await {
            Ok(data) => match data.rates.get("CNY") {
                Some(rate) if rate.is_finite() && *rate > 0.0 => *rate,
                _ => {
                    warn!("CNY quote missing from response, using estimate");
                    CNY_ESTIMATE
                }
            },
            Err(e) => {
                warn!(error = %e, "unreadable quote response, using estimate");
                CNY_ESTIMATE
            }
        };

        Ok(RateTable::from([("CNY".to_string(), rate)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(mock_response: &str, status_code: u16) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/latest"))
            .respond_with(ResponseTemplate::new(status_code).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn test_successful_quote_fetch() {
        let mock_response = r#"{"amount": 1.0, "base": "USD", "rates": {"CNY": 7.24}}"#;
        let mock_server = create_mock_server(mock_response, 200).await;

        let source = FrankfurterSource::new(&mock_server.uri());
        let rates = source.fetch_rates().await.unwrap();

        assert_eq!(rates.len(), 1);
        assert_eq!(rates.get("CNY"), Some(&7.24));
    }

    #[tokio::test]
    async fn test_malformed_body_yields_the_estimate() {
        let mock_server = create_mock_server("<html>maintenance</html>", 200).await;

        let source = FrankfurterSource::new(&mock_server.uri());
        let rates = source.fetch_rates().await.unwrap();

        assert_eq!(rates.get("CNY"), Some(&CNY_ESTIMATE));
    }

    #[tokio::test]
    async fn test_missing_quote_yields_the_estimate() {
        let mock_response = r#"{"amount": 1.0, "base": "USD", "rates": {}}"#;
        let mock_server = create_mock_server(mock_response, 200).await;

        let source = FrankfurterSource::new(&mock_server.uri());
        let rates = source.fetch_rates().await.unwrap();

        assert_eq!(rates.get("CNY"), Some(&CNY_ESTIMATE));
    }

    #[tokio::test]
    async fn test_non_positive_quote_yields_the_estimate() {
        let mock_response = r#"{"amount": 1.0, "base": "USD", "rates": {"CNY": 0.0}}"#;
        let mock_server = create_mock_server(mock_response, 200).await;

        let source = FrankfurterSource::new(&mock_server.uri());
        let rates = source.fetch_rates().await.unwrap();

        assert_eq!(rates.get("CNY"), Some(&CNY_ESTIMATE));
    }

    #[tokio::test]
    async fn test_error_status_fails_the_source() {
        let mock_server = create_mock_server("Server Error", 503).await;

        let source = FrankfurterSource::new(&mock_server.uri());
        let result = source.fetch_rates().await;

        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .starts_with("HTTP error: 503")
        );
    }
}
