use crate::core::rates::RateTable;
use anyhow::Result;
use std::time::Duration;

/// Keeps a hung provider from pinning the refresh cycle.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) fn http_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent("fxboard/1.0")
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    Ok(client)
}

/// Drops entries a rate table must never contain. Downstream conversion
/// divides by these values, so zero, negative and non-finite rates are
/// filtered at the source boundary.
pub(crate) fn positive_rates(rates: RateTable) -> RateTable {
    rates
        .into_iter()
        .filter(|(_, rate)| rate.is_finite() && *rate > 0.0)
        .collect()
}
