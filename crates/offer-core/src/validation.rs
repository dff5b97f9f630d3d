//! # Validation Module
//!
//! Input coercion and configuration checks.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Input surface (CLI flags, session commands)                  │
//! │  ├── Raw text from the user                                            │
//! │  └── coerce_number(): never fails, bad input becomes 0                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Catalog setters                                              │
//! │  └── non_negative(): clamps anything that slipped through              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing engine                                               │
//! │  └── Assumes non-negative numbers, performs no checks                  │
//! │                                                                         │
//! │  Side path: config.toml / env                                          │
//! │  └── validate_pricing_config(): typed errors before a session starts   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use offer_core::validation::coerce_number;
//!
//! assert_eq!(coerce_number("400"), 400.0);
//! assert_eq!(coerce_number("12.5 units"), 12.5);
//! assert_eq!(coerce_number(""), 0.0);
//! assert_eq!(coerce_number("-3"), 0.0);
//! ```

use crate::error::ValidationError;
use crate::types::PricingConfig;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Coercion
// =============================================================================

/// Converts raw user text into a non-negative number.
///
/// ## Rules
/// - Leading whitespace is skipped
/// - The longest leading decimal literal is used (`"12abc"` → 12,
///   `".5"` → 0.5, `"1e3"` → 1000)
/// - Empty, non-numeric, negative, NaN or infinite → 0
///
/// This function is total: there is no input that makes it fail.
pub fn coerce_number(raw: &str) -> f64 {
    let text = raw.trim_start();
    let prefix = &text[..numeric_prefix_len(text)];
    prefix.parse::<f64>().map(non_negative).unwrap_or(0.0)
}

/// Clamps a number into the engine's domain: finite and ≥ 0.
#[inline]
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Byte length of the leading `[+-]digits[.digits][e[+-]digits]` literal.
/// Returns 0 when no digit is present.
fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_start = pos;
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    let mut digits = pos - int_start;

    if bytes.get(pos) == Some(&b'.') {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        let frac_digits = end - frac_start;
        if digits + frac_digits > 0 {
            digits += frac_digits;
            pos = end;
        }
    }

    if digits == 0 {
        return 0;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut end = pos + 1;
        if matches!(bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        let exp_start = end;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        if end > exp_start {
            pos = end;
        }
    }

    pos
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates that a value is finite and strictly positive.
pub fn validate_positive(field: &str, value: f64) -> ValidationResult<()> {
    validate_finite(field, value)?;
    if value <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

/// Validates that a value is finite and not negative.
pub fn validate_non_negative(field: &str, value: f64) -> ValidationResult<()> {
    validate_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn validate_finite(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Configuration Validators
// =============================================================================

/// Validates a pricing configuration loaded from a file or environment.
///
/// ## Rules
/// - `exchange_rate` > 0
/// - `surcharge_pct`, tier percentages, `reference_unit_price` ≥ 0
/// - `0 ≤ mid_from < high_from`
/// - `distinguished_item_id` is not blank
pub fn validate_pricing_config(config: &PricingConfig) -> ValidationResult<()> {
    validate_positive("exchange_rate", config.exchange_rate)?;
    validate_non_negative("surcharge_pct", config.surcharge_pct)?;
    validate_non_negative("reference_unit_price", config.reference_unit_price)?;

    let tiers = &config.margin_tiers;
    validate_non_negative("tier_0_299", tiers.tier_0_299)?;
    validate_non_negative("tier_300_499", tiers.tier_300_499)?;
    validate_non_negative("tier_500_plus", tiers.tier_500_plus)?;
    validate_non_negative("mid_tier_from", tiers.mid_from)?;
    validate_non_negative("high_tier_from", tiers.high_from)?;
    if tiers.mid_from >= tiers.high_from {
        return Err(ValidationError::TierBoundsOrder {
            mid_from: tiers.mid_from,
            high_from: tiers.high_from,
        });
    }

    if config.distinguished_item_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "distinguished_item_id".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_plain_numbers() {
        assert_eq!(coerce_number("0"), 0.0);
        assert_eq!(coerce_number("400"), 400.0);
        assert_eq!(coerce_number("10.6"), 10.6);
        assert_eq!(coerce_number("  4.2"), 4.2);
        assert_eq!(coerce_number("+7"), 7.0);
    }

    #[test]
    fn test_coerce_leading_prefix() {
        assert_eq!(coerce_number("12abc"), 12.0);
        assert_eq!(coerce_number("3.5.1"), 3.5);
        assert_eq!(coerce_number(".5"), 0.5);
        assert_eq!(coerce_number("5."), 5.0);
        assert_eq!(coerce_number("1e3"), 1000.0);
        assert_eq!(coerce_number("2e"), 2.0);
        assert_eq!(coerce_number("2e+"), 2.0);
    }

    #[test]
    fn test_coerce_invalid_becomes_zero() {
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("   "), 0.0);
        assert_eq!(coerce_number("abc"), 0.0);
        assert_eq!(coerce_number("."), 0.0);
        assert_eq!(coerce_number("-"), 0.0);
        assert_eq!(coerce_number("NaN"), 0.0);
        assert_eq!(coerce_number("Infinity"), 0.0);
    }

    #[test]
    fn test_coerce_negative_becomes_zero() {
        assert_eq!(coerce_number("-3"), 0.0);
        assert_eq!(coerce_number("-0.01"), 0.0);
    }

    #[test]
    fn test_coerce_overflow_becomes_zero() {
        assert_eq!(coerce_number("1e400"), 0.0);
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative(5.0), 5.0);
        assert_eq!(non_negative(-5.0), 0.0);
        assert_eq!(non_negative(f64::INFINITY), 0.0);
        assert_eq!(non_negative(f64::NAN), 0.0);
    }

    #[test]
    fn test_validate_default_pricing_config() {
        assert!(validate_pricing_config(&PricingConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_exchange_rate() {
        let config = PricingConfig {
            exchange_rate: 0.0,
            ..PricingConfig::default()
        };
        assert!(matches!(
            validate_pricing_config(&config),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_surcharge() {
        let config = PricingConfig {
            surcharge_pct: -1.0,
            ..PricingConfig::default()
        };
        assert!(matches!(
            validate_pricing_config(&config),
            Err(ValidationError::Negative { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_inverted_tier_bounds() {
        let mut config = PricingConfig::default();
        config.margin_tiers.mid_from = 500.0;
        config.margin_tiers.high_from = 500.0;
        assert!(matches!(
            validate_pricing_config(&config),
            Err(ValidationError::TierBoundsOrder { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_blank_distinguished_item() {
        let config = PricingConfig {
            distinguished_item_id: "  ".to_string(),
            ..PricingConfig::default()
        };
        assert!(matches!(
            validate_pricing_config(&config),
            Err(ValidationError::Required { .. })
        ));
    }
}
