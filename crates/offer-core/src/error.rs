//! # Error Types
//!
//! Domain-specific error types for offer-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  offer-core errors (this file)                                         │
//! │  ├── CoreError        - Catalog lookups and structure                  │
//! │  └── ValidationError  - Configuration sanity checks                    │
//! │                                                                         │
//! │  offer-session errors (separate crate)                                 │
//! │  ├── ConfigError      - config.toml / env loading                      │
//! │  └── ApiError         - What the CLI sees (serialized)                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → CLI                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing engine itself has no error path. These errors only come from
//! editing a catalog or checking a configuration before it is used.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Catalog and configuration errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No line item with this id.
    ///
    /// ## When This Occurs
    /// - A quantity edit names an id that is not in the catalog
    /// - An imported snapshot dropped an item the caller still refers to
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Two line items share an id.
    #[error("Duplicate item id in catalog: {0}")]
    DuplicateItem(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Configuration validation errors.
///
/// Raw user input is never rejected (it is coerced, see
/// [`crate::validation::coerce_number`]). These errors guard configuration
/// that comes from files and environment before a session starts.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive, got {value}")]
    MustBePositive { field: String, value: f64 },

    /// Value must be zero or greater.
    #[error("{field} must not be negative, got {value}")]
    Negative { field: String, value: f64 },

    /// Value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Tier boundaries are out of order.
    #[error("mid tier start ({mid_from}) must be below high tier start ({high_from})")]
    TierBoundsOrder { mid_from: f64, high_from: f64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ItemNotFound("tiBase".to_string());
        assert_eq!(err.to_string(), "Item not found: tiBase");

        let err = CoreError::DuplicateItem("crown".to_string());
        assert_eq!(err.to_string(), "Duplicate item id in catalog: crown");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "exchange_rate".to_string(),
            value: 0.0,
        };
        assert_eq!(err.to_string(), "exchange_rate must be positive, got 0");

        let err = ValidationError::TierBoundsOrder {
            mid_from: 500.0,
            high_from: 300.0,
        };
        assert_eq!(
            err.to_string(),
            "mid tier start (500) must be below high tier start (300)"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "distinguished_item_id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
