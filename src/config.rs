//! Runtime configuration for building transfers.
//!
//! # Environment Variables
//!
//! - `SEPA_DEFAULT_CURRENCY`: currency assigned to new transfers (default `EUR`)
//! - `SEPA_EXACT_ARITHMETIC`: `false` disables major-unit amounts
//! - `SEPA_IDENTIFICATION`: `monotonic` (default) or `wall-clock`

use crate::amount::AmountNormalizer;
use crate::error::{Result, TransferError};
use crate::transfer::DEFAULT_CURRENCY;
use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// How end-to-end identifications are derived when the caller gives none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentificationStrategy {
    /// Plain wall-clock timestamp. Two transfers built within the same
    /// microsecond get the same identification.
    WallClock,

    /// Wall-clock timestamp, advanced by one microsecond whenever it would
    /// repeat or go backwards.
    #[default]
    Monotonic,
}

impl FromStr for IdentificationStrategy {
    type Err = TransferError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "wall-clock" => Ok(IdentificationStrategy::WallClock),
            "monotonic" => Ok(IdentificationStrategy::Monotonic),
            other => Err(TransferError::InvalidArgument(format!(
                "unknown identification strategy {:?}",
                other
            ))),
        }
    }
}

/// Settings shared by every transfer a factory builds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    pub default_currency: String,
    pub exact_arithmetic: bool,
    pub identification: IdentificationStrategy,
}

impl TransferConfig {
    /// Builds a configuration from the defaults overridden by environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = TransferConfig::default();

        if let Some(currency) = lookup("SEPA_DEFAULT_CURRENCY") {
            config.default_currency = currency.trim().to_uppercase();
        }
        if let Some(flag) = lookup("SEPA_EXACT_ARITHMETIC") {
            config.exact_arithmetic = flag.trim().parse().map_err(|_| {
                TransferError::Configuration(format!(
                    "SEPA_EXACT_ARITHMETIC must be true or false, got {:?}",
                    flag
                ))
            })?;
        }
        if let Some(strategy) = lookup("SEPA_IDENTIFICATION") {
            config.identification = strategy.parse()?;
        }

        Ok(config)
    }

    /// Returns the amount normalizer matching this configuration.
    pub fn normalizer(&self) -> AmountNormalizer {
        if self.exact_arithmetic {
            AmountNormalizer::new()
        } else {
            AmountNormalizer::without_exact_arithmetic()
        }
    }
}

impl Default for TransferConfig {
    fn default() -> Self {
        TransferConfig {
            default_currency: DEFAULT_CURRENCY.to_string(),
            exact_arithmetic: true,
            identification: IdentificationStrategy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = TransferConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, TransferConfig::default());
        assert_eq!(config.default_currency, "EUR");
        assert!(config.exact_arithmetic);
        assert_eq!(config.identification, IdentificationStrategy::Monotonic);
    }

    #[test]
    fn test_overrides() {
        let config = TransferConfig::from_lookup(lookup_from(&[
            ("SEPA_DEFAULT_CURRENCY", " chf "),
            ("SEPA_EXACT_ARITHMETIC", "false"),
            ("SEPA_IDENTIFICATION", "wall-clock"),
        ]))
        .unwrap();

        assert_eq!(config.default_currency, "CHF");
        assert!(!config.exact_arithmetic);
        assert!(!config.normalizer().has_exact_arithmetic());
        assert_eq!(config.identification, IdentificationStrategy::WallClock);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            TransferConfig::from_lookup(lookup_from(&[("SEPA_EXACT_ARITHMETIC", "maybe")])),
            Err(TransferError::Configuration(_))
        ));
        assert!(matches!(
            TransferConfig::from_lookup(lookup_from(&[("SEPA_IDENTIFICATION", "random")])),
            Err(TransferError::InvalidArgument(_))
        ));
    }
}
