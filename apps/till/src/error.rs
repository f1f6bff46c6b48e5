//! # Till Error Type
//!
//! One error type for every till command.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ValidationError / CoreError ──► AppError { ValidationError, message }  │
//! │  DbError::NotFound           ──► AppError { NotFound, message }         │
//! │  any other DbError           ──► tracing::error!(details)               │
//! │                                  AppError { DatabaseError,              │
//! │                                             "Menu service failed" }     │
//! │  ConfigError                 ──► AppError { ConfigError, message }      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With `--json` the error is printed as `{"code": "...", "message": "..."}`.

use serde::Serialize;

use cafe_core::{CoreError, ValidationError};
use cafe_db::DbError;

use crate::config::ConfigError;

/// Shown for every storage failure other than a missing item.
pub const MENU_SERVICE_FAILED: &str = "Menu service failed";

/// Error returned from till commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Message for the operator
    pub message: String,
}

/// Error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    DatabaseError,
    ConfigError,
    /// Unrecognized store-screen command.
    UnknownCommand,
    Internal,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn unknown_command(token: &str) -> Self {
        AppError::new(
            ErrorCode::UnknownCommand,
            format!("Unknown command: {} (type 'help')", token),
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }

    /// True for storage failures (not for missing items).
    pub fn is_service_failure(&self) -> bool {
        self.code == ErrorCode::DatabaseError
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => AppError::not_found(&entity, &id),
            other => {
                tracing::error!(error = %other, "Menu repository call failed");
                AppError::new(ErrorCode::DatabaseError, MENU_SERVICE_FAILED)
            }
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MenuItemNotFound(id) => AppError::not_found("Menu item", &id),
            CoreError::InvalidRate { .. } => AppError::new(ErrorCode::ConfigError, err.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::internal(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::internal(format!("JSON encoding failed: {}", err))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AppError {}

/// Result type for till commands.
pub type AppResult<T> = Result<T, AppError>;
