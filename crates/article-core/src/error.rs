//! # Error Types
//!
//! Validation errors raised before any SQL is issued.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  article-core (this file)                                               │
//! │  └── ValidationError  - Keyboard input rejected                         │
//! │                                                                         │
//! │  article-db                                                             │
//! │  └── DbError          - Statement failed, transaction rolled back       │
//! │                                                                         │
//! │  article-cli                                                            │
//! │  └── CliError         - Startup failures (config, connect, I/O)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Input validation errors.
///
/// The `Display` text is printed verbatim by the menu, so every variant
/// names the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: String, max: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (not a number, too many decimals, ...).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}
