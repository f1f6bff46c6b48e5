//! # Error Types
//!
//! Domain-specific error types for cafe-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cafe-core errors (this file)                                          │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  cafe-db errors (separate crate)                                       │
//! │  └── DbError          - Menu repository failures                       │
//! │                                                                         │
//! │  till errors (in app)                                                  │
//! │  └── AppError         - What the cashier sees                          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError ← DbError                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The aggregator itself never fails: adding or removing a line is total.
//! Errors only come from admin input and from pricing policy construction.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Menu item cannot be found in the loaded menu.
    #[error("Menu item not found: {0}")]
    MenuItemNotFound(String),

    /// A discount or tax rate outside [0%, 100%).
    ///
    /// ## When This Occurs
    /// - Config sets a 100% discount (the bill would be free)
    /// - Config sets a GST rate given as a whole number instead of percent
    #[error("Invalid {name} rate: {bps} bps (must be below 10000)")]
    InvalidRate { name: String, bps: u32 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are raised before anything reaches the order or the repository.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., non-numeric price, invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// An update that changes nothing.
    #[error("nothing to update: provide a name or a price")]
    EmptyPatch,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
