//! # Money Module
//!
//! Provides the `Money` type for article prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Reading "0.1" and "0.2" as floats:                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  The price column is NUMERIC(5, 2): exactly two decimals.               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "12.5" is parsed digit by digit into 1250 cents                      │
//! │    No float ever touches a price                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use article_core::money::Money;
//!
//! let price: Money = "12.5".parse().unwrap();
//! assert_eq!(price.cents(), 1250);
//! assert_eq!(price.to_string(), "12.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::Percentage;

/// Represents a monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: price thresholds typed by the user may be negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **sqlx transparent**: stored as a plain INTEGER column (`price_cents`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use article_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion (truncated toward zero).
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Applies a percentage increment (negative percentages decrease).
    ///
    /// ## Rounding
    /// The exact result is rounded to the nearest cent, halves away from
    /// zero, which is how a `NUMERIC(5, 2)` column rounds on assignment.
    ///
    /// ## Example
    /// ```rust
    /// use article_core::money::Money;
    /// use article_core::types::Percentage;
    ///
    /// let price = Money::from_cents(1999);
    /// let raised = price.increase_by(Percentage::from_bps(1000)); // +10%
    /// assert_eq!(raised.cents(), 2199); // 19.99 + 2.00 (1.999 rounded)
    /// ```
    pub fn increase_by(&self, pct: Percentage) -> Money {
        // i128 so large amounts times basis points cannot overflow
        let scaled = self.0 as i128 * pct.bps() as i128;
        let delta = if scaled >= 0 {
            (scaled + 5000) / 10000
        } else {
            (scaled - 5000) / 10000
        };
        Money(self.0 + delta as i64)
    }
}

/// Shows the amount with exactly two decimals, e.g. `12.50` or `-0.05`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hundredths("amount", s).map(Money)
    }
}

/// Parses a decimal string with at most two fractional digits into
/// hundredths, without going through floating point.
///
/// Accepted: `12`, `12.5`, `12.50`, `.5`, `5.`, `-3.25`, `+7`.
/// Rejected: empty input, `.`, `1.234`, `1e3`, `12,50`.
pub(crate) fn parse_hundredths(field: &str, input: &str) -> Result<i64, ValidationError> {
    parse_decimal(field, input, ExtraDigits::Reject)
}

/// Like [`parse_hundredths`], but digits past the second decimal are
/// allowed and the result is rounded down: `1.505` → 150, `-1.505` → -151.
pub(crate) fn parse_hundredths_floor(field: &str, input: &str) -> Result<i64, ValidationError> {
    parse_decimal(field, input, ExtraDigits::Floor)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ExtraDigits {
    Reject,
    Floor,
}

fn parse_decimal(field: &str, input: &str, extra: ExtraDigits) -> Result<i64, ValidationError> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let not_a_number = || ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a decimal number".to_string(),
    };

    let (negative, digits) = match input.as_bytes()[0] {
        b'-' => (true, &input[1..]),
        b'+' => (false, &input[1..]),
        _ => (false, input),
    };

    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (digits, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(not_a_number());
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_a_number());
    }
    let (fraction, dropped) = fraction.split_at(fraction.len().min(2));
    if !dropped.is_empty() && extra == ExtraDigits::Reject {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must have at most 2 decimal places".to_string(),
        });
    }
    let has_remainder = dropped.bytes().any(|b| b != b'0');

    let too_large = || ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "is too large".to_string(),
    };

    let mut value: i64 = 0;
    for b in whole.bytes() {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(i64::from(b - b'0')))
            .ok_or_else(too_large)?;
    }

    // Pad the fraction to two digits: "5" means 50 hundredths
    let mut hundredths: i64 = 0;
    for (i, b) in fraction.bytes().enumerate() {
        let weight = if i == 0 { 10 } else { 1 };
        hundredths += i64::from(b - b'0') * weight;
    }

    let total = value
        .checked_mul(100)
        .and_then(|v| v.checked_add(hundredths))
        .ok_or_else(too_large)?;

    Ok(match (negative, has_remainder) {
        (false, _) => total,
        (true, false) => -total,
        // -1.505 lies below -1.50
        (true, true) => -total - 1,
    })
}
