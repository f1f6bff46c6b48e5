//! # Validation Module
//!
//! Input validation for the admin screen and configuration.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: till CLI (clap)                                              │
//! │  └── Required arguments present                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── name non-empty, bounded length                                    │
//! │  └── price: decimal, ≤ 2 fractional digits, 0..=MAX_PRICE_CENTS      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK (price_cents >= 0)                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing that fails here ever reaches the order or the repository.

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_ITEM_NAME_LEN, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a menu item name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 100 characters
///
/// ```rust
/// use cafe_core::validation::validate_item_name;
///
/// assert!(validate_item_name("Paneer Tikka").is_ok());
/// assert!(validate_item_name("   ").is_err());
/// ```
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a menu item id (UUID v4 string).
pub fn validate_item_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id.trim()).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses a decimal price into [`Money`].
///
/// ## Rules
/// - Required (empty input is rejected)
/// - Digits with an optional `.` and at most two fractional digits
/// - Negative amounts are rejected; zero is allowed
/// - At most [`MAX_PRICE_CENTS`]
///
/// ```rust
/// use cafe_core::validation::parse_price;
///
/// assert_eq!(parse_price("250").unwrap().cents(), 25000);
/// assert_eq!(parse_price("12.5").unwrap().cents(), 1250);
/// assert_eq!(parse_price("0.99").unwrap().cents(), 99);
/// assert!(parse_price("-1").is_err());
/// assert!(parse_price("abc").is_err());
/// assert!(parse_price("1.999").is_err());
/// assert!(parse_price("10000000.01").is_err());
/// ```
pub fn parse_price(text: &str) -> ValidationResult<Money> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::Required {
            field: "price".to_string(),
        });
    }

    if text.starts_with('-') {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "price".to_string(),
        reason: reason.to_string(),
    };
    let too_large = || ValidationError::OutOfRange {
        field: "price".to_string(),
        min: 0,
        max: MAX_PRICE_CENTS,
    };

    let (whole, frac) = match text.split_once('.') {
        Some((w, f)) => (w, f),
        None => (text, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(invalid("must be a number"));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("must be a number"));
    }
    if frac.len() > 2 {
        return Err(invalid("at most two decimal places"));
    }

    let major: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| too_large())?
    };
    let minor: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| invalid("must be a number"))? * 10,
        _ => frac.parse().map_err(|_| invalid("must be a number"))?,
    };

    let cents = major
        .checked_mul(100)
        .and_then(|c| c.checked_add(minor))
        .ok_or_else(too_large)?;

    validate_price_cents(cents)?;
    Ok(Money::from_cents(cents))
}

/// Validates a price already held in cents.
///
/// The upper bound keeps `price × MAX_LINE_QUANTITY` and any realistic bill
/// subtotal far inside `i64`.
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    if cents > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a discount or tax rate in basis points.
///
/// ## Rules
/// - A proportion in [0, 1): below 10000 bps
pub fn validate_rate_bps(field: &str, bps: u32) -> ValidationResult<()> {
    if bps >= 10_000 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 9_999,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
