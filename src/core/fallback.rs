//! Hardcoded approximate rates, used when no live or cached data exists.

/// Source label reported while the rate table holds only fallback values.
pub const DEFAULT_SOURCE_LABEL: &str = "Default values";

/// Approximate units per USD. Values are rough and only serve as a backstop
/// until the first successful fetch; all of them are strictly positive.
pub fn fallback_rate(code: &str) -> Option<f64> {
    let rate = match code {
        "USD" => 1.0,
        "CNY" => 7.2,
        "EUR" => 0.92,
        "JPY" => 155.0,
        "GBP" => 0.79,
        "KRW" => 1380.0,
        "HKD" => 7.8,
        "AUD" => 1.52,
        "CAD" => 1.37,
        "CHF" => 0.88,
        "SGD" => 1.35,
        "INR" => 83.5,
        _ => return None,
    };
    Some(rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog;

    #[test]
    fn test_every_catalog_code_has_a_positive_fallback() {
        for code in catalog::codes() {
            let rate = fallback_rate(code);
            assert!(rate.is_some(), "missing fallback for {code}");
            assert!(rate.unwrap() > 0.0, "non-positive fallback for {code}");
        }
    }

    #[test]
    fn test_unknown_code_has_no_fallback() {
        assert!(fallback_rate("XYZ").is_none());
    }
}
