//! # Article Table Schema
//!
//! The table is created and dropped on demand from the menu, so the DDL
//! lives here as plain statements instead of embedded migrations.
//!
//! ## Table Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  article                                                                │
//! │  ─────────────────────────────────────────────────────────────────────  │
//! │  code         INT          NOT NULL, PRIMARY KEY (code_pkey)            │
//! │  name         VARCHAR(30)  NOT NULL, length <= 30 (name_length)         │
//! │  price_cents  INTEGER      NULL, 0..=99999 (price_range)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! SQLite treats `INT PRIMARY KEY` as an ordinary key (only `INTEGER
//! PRIMARY KEY` aliases the rowid) and lets such keys be NULL, so the
//! `NOT NULL` on `code` is required.

/// Creates the article table.
pub const CREATE_ARTICLE_TABLE: &str = r#"
    CREATE TABLE article (
        code INT NOT NULL CONSTRAINT code_pkey PRIMARY KEY,
        name VARCHAR(30) NOT NULL CONSTRAINT name_length CHECK (length(name) <= 30),
        price_cents INTEGER CONSTRAINT price_range CHECK (price_cents >= 0 AND price_cents <= 99999)
    )
"#;

/// Drops the article table.
pub const DROP_ARTICLE_TABLE: &str = "DROP TABLE article";
