//! Amount input and normalization to integer minor units.
//!
//! Callers hand amounts over in one of two explicit forms: already counted in
//! minor units (cents), or as a major-unit decimal that has to be scaled.
//! Scaling goes through `rust_decimal` so no binary floating-point rounding
//! leaks into the stored value.

use crate::error::{Result, TransferError};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;

/// A caller-supplied amount.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use sepa_transfer::{Amount, AmountNormalizer};
///
/// let normalizer = AmountNormalizer::new();
/// assert_eq!(normalizer.normalize(Amount::MinorUnits(1234)).unwrap(), 1234);
/// assert_eq!(normalizer.normalize(Amount::from_str("12.34").unwrap()).unwrap(), 1234);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amount {
    /// Already expressed in minor units; stored unchanged.
    MinorUnits(u64),

    /// Expressed in major units; scaled by 100 during normalization.
    MajorUnits(Decimal),
}

impl From<u64> for Amount {
    fn from(minor: u64) -> Self {
        Amount::MinorUnits(minor)
    }
}

impl From<Decimal> for Amount {
    fn from(major: Decimal) -> Self {
        Amount::MajorUnits(major)
    }
}

/// Floats always denote major units, even when integral (`12.0` is 1200 cents).
impl TryFrom<f64> for Amount {
    type Error = TransferError;

    fn try_from(value: f64) -> std::result::Result<Self, Self::Error> {
        Decimal::from_f64(value)
            .map(Amount::MajorUnits)
            .ok_or_else(|| TransferError::InvalidAmount(value.to_string()))
    }
}

/// Parses a numeric string.
///
/// A string with a decimal point or an exponent is read as major units,
/// a plain digit string as minor units.
impl FromStr for Amount {
    type Err = TransferError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || TransferError::InvalidAmount(trimmed.to_string());

        if trimmed.contains(['e', 'E']) {
            Decimal::from_scientific(trimmed)
                .map(Amount::MajorUnits)
                .map_err(|_| invalid())
        } else if trimmed.contains('.') {
            Decimal::from_str(trimmed)
                .map(Amount::MajorUnits)
                .map_err(|_| invalid())
        } else {
            trimmed
                .strip_prefix('+')
                .unwrap_or(trimmed)
                .parse::<u64>()
                .map(Amount::MinorUnits)
                .map_err(|_| invalid())
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::MinorUnits(minor) => write!(f, "{} minor units", minor),
            Amount::MajorUnits(major) => write!(f, "{}", major),
        }
    }
}

/// Converts [`Amount`] values into an exact count of minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountNormalizer {
    exact_arithmetic: bool,
}

impl AmountNormalizer {
    /// Decimal places kept before scaling to minor units.
    pub const SCALE: u32 = 4;

    /// Creates a normalizer with exact decimal arithmetic enabled.
    pub fn new() -> Self {
        AmountNormalizer {
            exact_arithmetic: true,
        }
    }

    /// Creates a normalizer that has no exact decimal arithmetic available.
    ///
    /// Minor-unit amounts still pass through; major-unit amounts fail with
    /// [`TransferError::Configuration`].
    pub fn without_exact_arithmetic() -> Self {
        AmountNormalizer {
            exact_arithmetic: false,
        }
    }

    /// Returns `true` if major-unit amounts can be converted.
    pub fn has_exact_arithmetic(&self) -> bool {
        self.exact_arithmetic
    }

    /// Normalizes an amount to minor units.
    ///
    /// Major units are rounded half away from zero to four decimals,
    /// multiplied by 100 and then truncated. The final step truncates, so a
    /// trailing half cent is dropped: `0.005` becomes `0`.
    pub fn normalize(&self, amount: impl Into<Amount>) -> Result<u64> {
        match amount.into() {
            Amount::MinorUnits(minor) => Ok(minor),
            Amount::MajorUnits(major) => self.scale_major(major),
        }
    }

    fn scale_major(&self, major: Decimal) -> Result<u64> {
        if !self.exact_arithmetic {
            return Err(TransferError::Configuration(
                "major-unit amounts require exact decimal arithmetic".to_string(),
            ));
        }
        if major.is_sign_negative() && !major.is_zero() {
            return Err(TransferError::InvalidAmount(major.to_string()));
        }

        let rounded =
            major.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.trunc().to_u64())
            .ok_or_else(|| TransferError::InvalidAmount(major.to_string()))
    }
}

impl Default for AmountNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats a minor-unit count as a two-decimal major amount (`1234` is `12.34`).
pub fn format_major(minor: u64) -> Decimal {
    Decimal::from_i128_with_scale(i128::from(minor), 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize_str(s: &str) -> Result<u64> {
        AmountNormalizer::new().normalize(Amount::from_str(s)?)
    }

    #[test]
    fn test_integers_pass_through_unscaled() {
        let normalizer = AmountNormalizer::new();
        for n in [0u64, 1, 99, 1234, 99_999_999_999, u64::MAX] {
            assert_eq!(normalizer.normalize(n).unwrap(), n);
        }
    }

    #[test]
    fn test_decimal_is_scaled_to_minor_units() {
        let normalizer = AmountNormalizer::new();
        let amount = Decimal::from_str("12.34").unwrap();
        assert_eq!(normalizer.normalize(amount).unwrap(), 1234);
    }

    #[test]
    fn test_fractional_string_matches_decimal() {
        assert_eq!(normalize_str("12.34").unwrap(), 1234);
        assert_eq!(normalize_str("  12.34  ").unwrap(), 1234);
    }

    #[test]
    fn test_digit_string_is_minor_units() {
        assert_eq!(normalize_str("1234").unwrap(), 1234);
        assert_eq!(normalize_str("+50").unwrap(), 50);
    }

    #[test]
    fn test_string_with_zero_fraction_is_major_units() {
        assert_eq!(normalize_str("12.00").unwrap(), 1200);
    }

    #[test]
    fn test_exponent_string_is_major_units() {
        assert_eq!(normalize_str("1.5e2").unwrap(), 15000);
    }

    #[test]
    fn test_half_cent_is_truncated() {
        assert_eq!(normalize_str("0.005").unwrap(), 0);
        assert_eq!(normalize_str("10.009").unwrap(), 1000);
        assert_eq!(normalize_str("12.3456").unwrap(), 1234);
    }

    #[test]
    fn test_fourth_decimal_rounds_half_away_from_zero() {
        // 0.00995 -> 0.0100 -> 1.00 cents
        assert_eq!(normalize_str("0.00995").unwrap(), 1);
        // 0.00994 -> 0.0099 -> 0.99 cents
        assert_eq!(normalize_str("0.00994").unwrap(), 0);
        assert_eq!(normalize_str("1.23456").unwrap(), 123);
    }

    #[test]
    fn test_float_input_is_major_units() {
        let normalizer = AmountNormalizer::new();
        let float = |v: f64| normalizer.normalize(Amount::try_from(v).unwrap()).unwrap();

        assert_eq!(float(12.34), 1234);
        assert_eq!(float(12.0), 1200);
        assert_eq!(float(0.005), 0);
    }

    #[test]
    fn test_non_finite_float_is_rejected() {
        assert!(matches!(
            Amount::try_from(f64::NAN),
            Err(TransferError::InvalidAmount(_))
        ));
        assert!(matches!(
            Amount::try_from(f64::INFINITY),
            Err(TransferError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_missing_exact_arithmetic_fails_for_major_units() {
        let normalizer = AmountNormalizer::without_exact_arithmetic();
        let result = normalizer.normalize(Decimal::from_str("12.34").unwrap());
        assert!(matches!(result, Err(TransferError::Configuration(_))));

        assert_eq!(normalizer.normalize(1234u64).unwrap(), 1234);
    }

    #[test]
    fn test_negative_and_garbage_rejected() {
        for input in ["-1.50", "-150", "abc", "", "1.2.3"] {
            assert!(
                matches!(normalize_str(input), Err(TransferError::InvalidAmount(_))),
                "expected {:?} to be rejected",
                input
            );
        }
    }

    #[test]
    fn test_format_major() {
        assert_eq!(format_major(1234).to_string(), "12.34");
        assert_eq!(format_major(5).to_string(), "0.05");
        assert_eq!(format_major(99_999_999_999).to_string(), "999999999.99");
    }
}
