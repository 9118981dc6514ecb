//! # article-db: Database Layer for Article Desk
//!
//! SQLite access for the article client through sqlx, over exactly one
//! connection held for the whole session.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Article Desk Data Flow                             │
//! │                                                                         │
//! │  Menu option ("7 - Show article details")                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     article-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐  │   │
//! │  │   │   Database    │    │ ArticleRepository  │  │   schema   │  │   │
//! │  │   │ (database.rs) │    │ (article.rs)       │  │ CREATE /   │  │   │
//! │  │   │               │    │                    │  │ DROP DDL   │  │   │
//! │  │   │ SqliteConn    │◄───│ BEGIN ... COMMIT   │  └────────────┘  │   │
//! │  │   │ (one, owned)  │    │ or ROLLBACK        │                  │   │
//! │  │   └───────────────┘    └────────────────────┘                  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (articles.db)                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use article_db::{Database, DbConfig};
//!
//! # async fn example() -> article_db::DbResult<()> {
//! let mut db = Database::connect(&DbConfig::new("articles.db")).await?;
//! let count = db.articles().count().await?;
//! println!("{count} articles found");
//! db.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod error;
pub mod repository;
pub mod schema;

pub use database::{Database, DbConfig};
pub use error::{DbError, DbResult};
pub use repository::article::{ArticleRepository, PendingIncrement};
