// ============================================================================
// Precision Configuration
// Builder-style settings from which a precision context is derived
// ============================================================================

use crate::numeric::{DomainError, DomainResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Working precision used when neither bits nor digits are given (IEEE double).
pub const DEFAULT_PRECISION_BITS: usize = 53;

/// log2(10)
const BITS_PER_DIGIT: f64 = 3.321_928_094_887_362_6;

/// Bit precision equivalent to `digits` decimal digits.
pub fn digits_to_bits(digits: usize) -> usize {
    (((digits + 1) as f64) * BITS_PER_DIGIT).round().max(1.0) as usize
}

/// Decimal digits faithfully represented by `bits` bits.
pub fn bits_to_digits(bits: usize) -> usize {
    ((bits as f64 / BITS_PER_DIGIT).round() - 1.0).max(1.0) as usize
}

// ============================================================================
// Tolerance Setting
// ============================================================================

/// An explicitly supplied tolerance, converted at the context's precision.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ToleranceSetting {
    Integer(i64),
    Float(f64),
    /// Decimal literal such as `"1e-20"`
    Text(String),
}

impl From<i64> for ToleranceSetting {
    fn from(value: i64) -> Self {
        ToleranceSetting::Integer(value)
    }
}

impl From<i32> for ToleranceSetting {
    fn from(value: i32) -> Self {
        ToleranceSetting::Integer(value.into())
    }
}

impl From<f64> for ToleranceSetting {
    fn from(value: f64) -> Self {
        ToleranceSetting::Float(value)
    }
}

impl From<&str> for ToleranceSetting {
    fn from(value: &str) -> Self {
        ToleranceSetting::Text(value.to_string())
    }
}

impl From<String> for ToleranceSetting {
    fn from(value: String) -> Self {
        ToleranceSetting::Text(value)
    }
}

// ============================================================================
// Context Configuration
// ============================================================================

/// Settings for building a [`PrecisionContext`](super::PrecisionContext).
///
/// Precision is given either in bits or in decimal digits, never both.
/// Without a tolerance the context derives `100 * 2^(1 - bits)`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContextConfig {
    /// Working precision in bits
    pub precision_bits: Option<usize>,

    /// Working precision in decimal digits
    pub decimal_digits: Option<usize>,

    /// Magnitude below which values are treated as exact zero
    pub tolerance: Option<ToleranceSetting>,
}

impl ContextConfig {
    /// Empty configuration: 53 bits with the derived tolerance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: Set precision in bits
    pub fn with_precision_bits(mut self, bits: usize) -> Self {
        self.precision_bits = Some(bits);
        self
    }

    /// Builder method: Set precision in decimal digits
    pub fn with_decimal_digits(mut self, digits: usize) -> Self {
        self.decimal_digits = Some(digits);
        self
    }

    /// Builder method: Set an explicit tolerance
    pub fn with_tolerance(mut self, tolerance: impl Into<ToleranceSetting>) -> Self {
        self.tolerance = Some(tolerance.into());
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> DomainResult<()> {
        match (self.precision_bits, self.decimal_digits) {
            (Some(_), Some(_)) => Err(DomainError::config(
                "precision bits and decimal digits are mutually exclusive",
            )),
            (Some(0), None) => Err(DomainError::config("precision must be at least one bit")),
            _ => Ok(()),
        }
    }

    /// Effective working precision in bits.
    pub fn resolved_precision_bits(&self) -> usize {
        match (self.precision_bits, self.decimal_digits) {
            (Some(bits), _) => bits,
            (None, Some(digits)) => digits_to_bits(digits),
            (None, None) => DEFAULT_PRECISION_BITS,
        }
    }

    /// Whether the tolerance will be derived from the precision.
    pub fn has_default_tolerance(&self) -> bool {
        self.tolerance.is_none()
    }
}

// ============================================================================
// Preset Configurations
// ============================================================================

impl ContextConfig {
    /// IEEE binary64 significand
    pub fn double() -> Self {
        Self::new().with_precision_bits(53)
    }

    /// IEEE binary128 significand
    pub fn quad() -> Self {
        Self::new().with_precision_bits(113)
    }

    /// IEEE binary256 significand
    pub fn octuple() -> Self {
        Self::new().with_precision_bits(237)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_bit_conversion() {
        assert_eq!(digits_to_bits(15), 53);
        assert_eq!(bits_to_digits(53), 15);
        assert_eq!(digits_to_bits(0), 3);
        assert_eq!(bits_to_digits(1), 1);
    }

    #[test]
    fn test_resolved_precision() {
        assert_eq!(ContextConfig::new().resolved_precision_bits(), 53);
        assert_eq!(
            ContextConfig::new()
                .with_precision_bits(100)
                .resolved_precision_bits(),
            100
        );
        assert_eq!(
            ContextConfig::new()
                .with_decimal_digits(15)
                .resolved_precision_bits(),
            53
        );
    }

    #[test]
    fn test_validation() {
        assert!(ContextConfig::new().validate().is_ok());
        assert!(ContextConfig::quad().validate().is_ok());

        let both = ContextConfig::new()
            .with_precision_bits(53)
            .with_decimal_digits(15);
        assert!(both.validate().unwrap_err().is_config());

        let zero = ContextConfig::new().with_precision_bits(0);
        assert!(zero.validate().unwrap_err().is_config());
    }

    #[test]
    fn test_builder_pattern() {
        let config = ContextConfig::octuple().with_tolerance("1e-60");
        assert_eq!(config.precision_bits, Some(237));
        assert_eq!(
            config.tolerance,
            Some(ToleranceSetting::Text("1e-60".to_string()))
        );
        assert!(!config.has_default_tolerance());
        assert!(ContextConfig::double().has_default_tolerance());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let config = ContextConfig::quad().with_tolerance(1e-30);
        let json = serde_json::to_string(&config).unwrap();
        let back: ContextConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
