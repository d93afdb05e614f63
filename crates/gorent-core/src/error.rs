//! # Error Types
//!
//! Domain-specific error types for gorent-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  gorent-core errors (this file)                                        │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ValidationError  - One violated form rule                         │
//! │  └── ValidationErrors - Every violated rule of one request             │
//! │                                                                         │
//! │  gorent-db errors (separate crate)                                     │
//! │  └── DbError          - Storage operation failures                     │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the user sees                             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr / exit code     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `Display` text of a [`ValidationError`] is the message shown next to
//! the offending field, so keep it short and human.

use std::fmt;

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No vehicle with this id exists in the catalog.
    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    /// The rental request broke one or more form rules.
    ///
    /// ## User Workflow
    /// ```text
    /// quote --vehicle avanza --days 40 --name "B"
    ///      │
    ///      ▼
    /// validate_request → [TooShort(name), OutOfRange(days)]
    ///      │
    ///      ▼
    /// InvalidRequest: calculation is blocked, every message is reported
    /// ```
    #[error("Invalid rental request: {0}")]
    InvalidRequest(ValidationErrors),

    /// The quote does not fit in a 64-bit amount.
    #[error("Price of {0} is too large to calculate")]
    AmountTooLarge(String),

    /// Export was requested but the history is empty.
    #[error("No transactions to export")]
    NothingToExport,

    /// Calculator configuration is inconsistent.
    #[error("Invalid calculator configuration: {0}")]
    InvalidConfig(String),

    /// JSON rendering failed.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation error (wraps a single ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet the calculator rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g. digits in a customer name).
    #[error("{field} {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Numeric value is below the allowed minimum.
    #[error("{field} must be at least {min}")]
    BelowMinimum { field: String, min: i64 },

    /// Numeric value is above the allowed maximum.
    #[error("{field} must be at most {max}")]
    AboveMaximum { field: String, max: i64 },

    /// Not enough units left for the selected vehicle.
    #[error("Only {available} unit(s) of {vehicle} in stock")]
    InsufficientStock { vehicle: String, available: u32 },

    /// Selected vehicle does not exist.
    #[error("Unknown vehicle: {0}")]
    UnknownVehicle(String),
}

impl ValidationError {
    /// Name of the form field this error belongs to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::BelowMinimum { field, .. }
            | ValidationError::AboveMaximum { field, .. } => field,
            ValidationError::InsufficientStock { .. } => "units",
            ValidationError::UnknownVehicle(_) => "vehicle",
        }
    }
}

// =============================================================================
// Validation Errors (collection)
// =============================================================================

/// Every rule violated by a single request, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    /// Returns true when no rule was violated.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the violations.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    /// Human-readable messages, one per violation.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        ValidationErrors(errors)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
