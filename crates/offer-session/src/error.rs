//! # API Error Type
//!
//! Unified error type for session commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Offer Calculator                   │
//! │                                                                         │
//! │  CLI / front-end             offer-session                              │
//! │  ───────────────             ─────────────                              │
//! │                                                                         │
//! │  update_unit_cost("implantBody", "48")                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Master mode locked? ─── ApiError(ACCESS_DENIED) ─────────────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Unknown item? ─── CoreError::ItemNotFound ── ApiError ───────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ── OfferView (re-evaluated) ─────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Numeric input never produces an error: it is coerced to 0 instead.

use offer_core::CoreError;
use serde::Serialize;

use crate::snapshot::SnapshotError;
use crate::state::ConfigError;

/// Error returned from session commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "ACCESS_DENIED",
///   "message": "Incorrect password. Please try again."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Item id not in the catalog
    NotFound,

    /// Configuration or catalog structure is invalid
    ValidationError,

    /// Master mode required or wrong master password
    AccessDenied,

    /// config.toml or environment could not be loaded
    ConfigError,

    /// Catalog snapshot could not be read or written
    SnapshotError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Wrong master password.
    pub fn incorrect_password() -> Self {
        ApiError::new(ErrorCode::AccessDenied, "Incorrect password. Please try again.")
    }

    /// A master-only operation was attempted while locked.
    pub fn master_mode_required(operation: &str) -> Self {
        ApiError::new(
            ErrorCode::AccessDenied,
            format!("Master mode is required to {}", operation),
        )
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ItemNotFound(id) => ApiError::not_found("Item", &id),
            CoreError::DuplicateItem(id) => {
                ApiError::validation(format!("Item id '{}' appears more than once", id))
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts configuration errors to API errors.
impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation(e) => ApiError::validation(e.to_string()),
            other => ApiError::new(ErrorCode::ConfigError, other.to_string()),
        }
    }
}

/// Converts snapshot errors to API errors.
impl From<SnapshotError> for ApiError {
    fn from(err: SnapshotError) -> Self {
        match err {
            SnapshotError::Catalog(e) => ApiError::from(e),
            other => {
                tracing::error!("Snapshot operation failed: {}", other);
                ApiError::new(ErrorCode::SnapshotError, other.to_string())
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
