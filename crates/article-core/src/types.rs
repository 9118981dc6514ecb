//! # Domain Types
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐          ┌─────────────────────┐              │
//! │  │      Article        │          │     Percentage      │              │
//! │  │  ─────────────────  │          │  ─────────────────  │              │
//! │  │  code  (i32, PK)    │          │  bps (i32)          │              │
//! │  │  name  (≤ 30 chars) │          │  250 = 2.50%        │              │
//! │  │  price (cents?)     │          │  -1000 = -10.00%    │              │
//! │  └─────────────────────┘          └─────────────────────┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::{parse_hundredths, Money};
use crate::validation::{validate_name, validate_price, ValidationResult};

// =============================================================================
// Article
// =============================================================================

/// A commercial article: the only entity the client manages.
///
/// `code` identifies the article; `price` may be absent (SQL NULL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Article {
    /// Business key (`code INT PRIMARY KEY`).
    pub code: i32,

    /// Display name, at most 30 characters.
    pub name: String,

    /// Price in cents, stored in the `price_cents` column.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "price_cents"))]
    pub price: Option<Money>,
}

impl Article {
    /// Creates an article after validating name and price.
    ///
    /// The name is stored trimmed.
    ///
    /// ## Example
    /// ```rust
    /// use article_core::{Article, Money};
    ///
    /// let pen = Article::new(1, "  Pen ", Some(Money::from_cents(150))).unwrap();
    /// assert_eq!(pen.name, "Pen");
    ///
    /// assert!(Article::new(2, "", None).is_err());
    /// ```
    pub fn new(code: i32, name: &str, price: Option<Money>) -> ValidationResult<Self> {
        let name = validate_name(name)?;
        if let Some(price) = price {
            validate_price(price)?;
        }

        Ok(Article { code, name, price })
    }
}

/// One-line rendering used by every listing: `Code: 1, name: Pen, price: 1.50`.
impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code: {}, name: {}, price: ", self.code, self.name)?;
        match self.price {
            Some(price) => write!(f, "{}", price),
            None => f.write_str("-"),
        }
    }
}

// =============================================================================
// Percentage
// =============================================================================

/// A percentage in basis points (1 bp = 0.01%).
///
/// ## Why Basis Points?
/// Keeps "2.5%" exact: it is 250 bps, an integer. Negative values are
/// decreases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Percentage(i32);

impl Percentage {
    /// Largest decrease that still leaves a non-negative price (-100%).
    pub const MIN_BPS: i32 = -10_000;

    /// Creates a percentage from basis points.
    #[inline]
    pub const fn from_bps(bps: i32) -> Self {
        Percentage(bps)
    }

    /// Returns the value in basis points.
    #[inline]
    pub const fn bps(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}%", sign, abs / 100, abs % 100)
    }
}

impl FromStr for Percentage {
    type Err = ValidationError;

    /// Parses `"2.5"` (or `"2.5%"`) into 250 bps.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_suffix('%').unwrap_or(s);
        let bps = parse_hundredths("increment", s)?;

        if bps < i64::from(Self::MIN_BPS) || bps > i64::from(i32::MAX) {
            return Err(ValidationError::OutOfRange {
                field: "increment".to_string(),
                min: "-100".to_string(),
                max: (i32::MAX / 100).to_string(),
            });
        }

        Ok(Percentage(bps as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_display() {
        let article = Article {
            code: 7,
            name: "Stapler".to_string(),
            price: Some(Money::from_cents(1250)),
        };
        assert_eq!(article.to_string(), "Code: 7, name: Stapler, price: 12.50");

        let unpriced = Article {
            price: None,
            ..article
        };
        assert_eq!(unpriced.to_string(), "Code: 7, name: Stapler, price: -");
    }

    #[test]
    fn test_article_new_validates() {
        assert!(Article::new(1, "Pen", Some(Money::from_cents(0))).is_ok());
        assert!(Article::new(1, "Pen", None).is_ok());
        assert!(Article::new(1, "   ", None).is_err());
        assert!(Article::new(1, &"x".repeat(31), None).is_err());
        assert!(Article::new(1, "Pen", Some(Money::from_cents(-1))).is_err());
        assert!(Article::new(1, "Pen", Some(Money::from_cents(100_000))).is_err());
    }

    #[test]
    fn test_percentage_parse() {
        assert_eq!("10".parse::<Percentage>().unwrap().bps(), 1000);
        assert_eq!("2.5".parse::<Percentage>().unwrap().bps(), 250);
        assert_eq!("2.5%".parse::<Percentage>().unwrap().bps(), 250);
        assert_eq!("-15".parse::<Percentage>().unwrap().bps(), -1500);
        assert_eq!("-100".parse::<Percentage>().unwrap().bps(), -10_000);

        assert!("".parse::<Percentage>().is_err());
        assert!("ten".parse::<Percentage>().is_err());
        assert!(matches!(
            "-100.01".parse::<Percentage>(),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_percentage_display() {
        assert_eq!(Percentage::from_bps(250).to_string(), "2.50%");
        assert_eq!(Percentage::from_bps(-1500).to_string(), "-15.00%");
        assert_eq!(Percentage::from_bps(5).to_string(), "0.05%");
    }
}
