//! # Validation Module
//!
//! Parses and checks keyboard input before any SQL is issued.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Menu prompt (article-cli)                                     │
//! │  └── Reads one raw line per field                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Parsing (integer code, fixed-point price, percentage)             │
//! │  └── Rules (name length, price range)                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                             │
//! │  ├── PRIMARY KEY on code                                                │
//! │  ├── NOT NULL / length CHECK on name                                    │
//! │  └── CHECK (price_cents >= 0 AND price_cents <= 99999)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use article_core::validation::{parse_code, parse_price};
//!
//! assert_eq!(parse_code(" 42 ").unwrap(), 42);
//! assert_eq!(parse_price("3.5").unwrap().cents(), 350);
//! assert!(parse_price("-1").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Percentage;
use crate::{MAX_NAME_LEN, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an article name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 30 characters (counted as chars, not bytes)
pub fn validate_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates the text used by "delete articles by text".
///
/// The text must contain at least one non-blank character. It is
/// returned as typed, so surrounding spaces stay part of the match.
pub fn validate_search_text(text: &str) -> ValidationResult<String> {
    if text.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "text".to_string(),
        });
    }

    Ok(text.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses an article code (a whole number that fits `INT`).
pub fn parse_code(input: &str) -> ValidationResult<i32> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    input
        .parse::<i32>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must be a whole number".to_string(),
        })
}

/// Validates a price against the column's range.
///
/// ## Rules
/// - Must be non-negative (>= 0); zero is allowed
/// - Must not exceed 999.99 (`NUMERIC(5, 2)`)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    if price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: Money::zero().to_string(),
            max: Money::from_cents(MAX_PRICE_CENTS).to_string(),
        });
    }

    Ok(())
}

/// Parses and validates a required price.
pub fn parse_price(input: &str) -> ValidationResult<Money> {
    let price = parse_amount("price", input)?;
    validate_price(price)?;
    Ok(price)
}

/// Parses an optional price: blank input means "no price".
pub fn parse_optional_price(input: &str) -> ValidationResult<Option<Money>> {
    if input.trim().is_empty() {
        return Ok(None);
    }

    parse_price(input).map(Some)
}

/// Parses the threshold for "articles with minimum price".
///
/// Unlike a stored price, any amount at any precision is a valid
/// threshold. It is rounded down to whole cents: prices are whole cents,
/// so `price > 1.505` and `price > 1.50` select the same rows.
pub fn parse_price_threshold(input: &str) -> ValidationResult<Money> {
    crate::money::parse_hundredths_floor("price", input).map(Money::from_cents)
}

/// Parses a percentage increment such as `10` or `2.5`.
///
/// ## Rules
/// - At most two decimals
/// - Not below -100% (a price cannot drop below zero)
pub fn parse_percentage(input: &str) -> ValidationResult<Percentage> {
    input.parse()
}

fn parse_amount(field: &str, input: &str) -> ValidationResult<Money> {
    crate::money::parse_hundredths(field, input).map(Money::from_cents)
}
