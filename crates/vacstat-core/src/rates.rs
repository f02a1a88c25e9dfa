use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::error::{PipelineError, Result};

/// Conversion rates into the reference currency. RUR is the reference
/// (rate 1.0), so all salary averages come out in rubles.
static REFERENCE_RATES: Lazy<HashMap<String, f64>> = Lazy::new(|| {
    [
        ("AZN", 35.68),
        ("BYR", 23.91),
        ("EUR", 59.90),
        ("GEL", 21.74),
        ("KGS", 0.76),
        ("KZT", 0.13),
        ("RUR", 1.0),
        ("UAH", 1.64),
        ("USD", 60.66),
        ("UZS", 0.0055),
    ]
    .into_iter()
    .map(|(code, rate)| (code.to_string(), rate))
    .collect()
});

/// Immutable currency-code → reference-rate table. Injected into the
/// normalizer at construction so tests can supply alternate tables.
#[derive(Debug, Clone)]
pub struct RateTable {
    rates: HashMap<String, f64>,
}

impl RateTable {
    pub fn new(rates: HashMap<String, f64>) -> Self {
        Self { rates }
    }

    /// Rate multiplier into the reference currency. An unknown code is
    /// fatal for the run, not just for the record.
    pub fn to_reference(&self, code: &str) -> Result<f64> {
        self.rates
            .get(code)
            .copied()
            .ok_or_else(|| PipelineError::UnsupportedCurrency {
                code: code.to_string(),
            })
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            rates: REFERENCE_RATES.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_has_ten_currencies_with_ruble_reference() {
        let table = RateTable::default();
        assert_eq!(table.rates.len(), 10);
        assert_eq!(table.to_reference("RUR").unwrap(), 1.0);
        assert_eq!(table.to_reference("EUR").unwrap(), 59.90);
        assert!(table.contains("UZS"));
    }

    #[test]
    fn unknown_code_is_an_error() {
        let table = RateTable::default();
        let err = table.to_reference("BTC").unwrap_err();
        assert!(matches!(
            err,
            PipelineError::UnsupportedCurrency { code } if code == "BTC"
        ));
    }
}
