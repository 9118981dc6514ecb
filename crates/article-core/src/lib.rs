//! # article-core: Pure Domain Logic
//!
//! Domain types and input validation for the article client, as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Article Desk Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    article-cli (menu)                           │   │
//! │  │    read option ──► prompt fields ──► call repository ──► print  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ article-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   money   │  │ validation│                  │   │
//! │  │   │  Article  │  │   Money   │  │   parse   │                  │   │
//! │  │   │ Percentage│  │  cents    │  │  checks   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  article-db (Database Layer)                    │   │
//! │  │          one SQLite connection, one transaction per operation   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Article, Percentage)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Validation error type
//! - [`validation`] - Keyboard input parsing and rule checks
//!
//! ## Example Usage
//!
//! ```rust
//! use article_core::money::Money;
//! use article_core::types::Percentage;
//!
//! let price: Money = "10.00".parse().unwrap();
//! let raised = price.increase_by(Percentage::from_bps(825)); // +8.25%
//!
//! assert_eq!(raised.cents(), 1083);
//! assert_eq!(raised.to_string(), "10.83");
//! ```

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use error::ValidationError;
pub use money::Money;
pub use types::*;

/// Maximum length of an article name, in characters (`VARCHAR(30)`).
pub const MAX_NAME_LEN: usize = 30;

/// Largest storable price in cents (`NUMERIC(5, 2)` tops out at 999.99).
pub const MAX_PRICE_CENTS: i64 = 99_999;
