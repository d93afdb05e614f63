//! # CLI Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in GO-RENT                                │
//! │                                                                         │
//! │  Command Function → Result<String, CliError>                           │
//! │         │                                                               │
//! │         ├── CoreError::InvalidRequest  ──► VALIDATION_ERROR  (exit 2)  │
//! │         ├── CoreError::VehicleNotFound ──► NOT_FOUND         (exit 3)  │
//! │         ├── CoreError::NothingToExport ──► EMPTY_HISTORY     (exit 3)  │
//! │         ├── DbError::*                 ──► STORAGE_ERROR     (exit 4)  │
//! │         ├── ConfigError::*             ──► CONFIG_ERROR      (exit 5)  │
//! │         └── std::io::Error             ──► IO_ERROR          (exit 6)  │
//! │                                                                         │
//! │  run() prints "error: <message>" to stderr and exits with the code.    │
//! │  Storage details are logged, the user sees a generic message.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::process::ExitCode;

use serde::Serialize;

use gorent_core::CoreError;
use gorent_db::DbError;

use crate::state::ConfigError;

/// Error returned from commands.
///
/// Serializes as:
/// ```json
/// { "code": "VALIDATION_ERROR", "message": "days must be at least 1" }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes, one process exit code each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The rental form did not pass validation
    ValidationError,

    /// Unknown vehicle or transaction
    NotFound,

    /// Export requested with no saved transactions
    EmptyHistory,

    /// Database operation failed
    StorageError,

    /// Configuration file missing, unreadable or inconsistent
    ConfigError,

    /// Reading or writing a file failed
    IoError,

    Internal,
}

impl ErrorCode {
    /// Process exit status for this code.
    pub const fn exit_status(&self) -> u8 {
        match self {
            ErrorCode::Internal => 1,
            ErrorCode::ValidationError => 2,
            ErrorCode::NotFound | ErrorCode::EmptyHistory => 3,
            ErrorCode::StorageError => 4,
            ErrorCode::ConfigError => 5,
            ErrorCode::IoError => 6,
        }
    }
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        CliError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code.exit_status())
    }
}

/// Converts storage errors, hiding query details from the user.
impl From<DbError> for CliError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => CliError::not_found(&entity, &id),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                CliError::new(ErrorCode::StorageError, "Could not open the database")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                CliError::new(ErrorCode::StorageError, "Database migration failed")
            }
            DbError::PoolExhausted => {
                CliError::new(ErrorCode::StorageError, "Database is busy, try again")
            }
            other => {
                tracing::error!("Storage error: {}", other);
                CliError::new(ErrorCode::StorageError, "Storage operation failed")
            }
        }
    }
}

/// Converts core errors to CLI errors.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::VehicleNotFound(id) => CliError::not_found("Vehicle", &id),
            CoreError::InvalidRequest(errors) => CliError::validation(errors.to_string()),
            CoreError::Validation(e) => CliError::validation(e.to_string()),
            e @ CoreError::AmountTooLarge(_) => CliError::validation(e.to_string()),
            e @ CoreError::NothingToExport => CliError::new(ErrorCode::EmptyHistory, e.to_string()),
            CoreError::InvalidConfig(message) => CliError::new(ErrorCode::ConfigError, message),
            CoreError::Serialization(e) => CliError::internal(e.to_string()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::new(ErrorCode::IoError, err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::internal(format!("JSON encoding failed: {}", err))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for commands.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use gorent_core::{ValidationError, ValidationErrors};

    #[test]
    fn test_validation_errors_join_messages() {
        let errors = ValidationErrors::from(vec![
            ValidationError::BelowMinimum {
                field: "days".to_string(),
                min: 1,
            },
            ValidationError::UnknownVehicle("jazz".to_string()),
        ]);
        let err = CliError::from(CoreError::InvalidRequest(errors));

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("days must be at least 1"));
        assert_eq!(err.code.exit_status(), 2);
    }

    #[test]
    fn test_storage_details_are_hidden() {
        let err = CliError::from(DbError::QueryFailed("no such table: kv_store".into()));
        assert_eq!(err.code, ErrorCode::StorageError);
        assert!(!err.message.contains("kv_store"));
    }

    #[test]
    fn test_amount_too_large_is_a_validation_error() {
        let err = CliError::from(CoreError::AmountTooLarge("Toyota Avanza".to_string()));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Price of Toyota Avanza is too large to calculate");
    }

    #[test]
    fn test_nothing_to_export() {
        let err = CliError::from(CoreError::NothingToExport);
        assert_eq!(err.code, ErrorCode::EmptyHistory);
        assert_eq!(err.message, "No transactions to export");
    }

    #[test]
    fn test_serializes_code_and_message() {
        let err = CliError::not_found("Vehicle", "jazz");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Vehicle not found: jazz");
    }
}
