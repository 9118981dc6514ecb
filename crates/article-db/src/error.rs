//! # Database Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← categorized by constraint / object            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Menu prints:  Error / Code: ... / Message: ...                        │
//! │  and returns to the option prompt                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// `CREATE TABLE` on a table that is already there.
    #[error("Table '{table}' already exists")]
    TableExists { table: String },

    /// Statement against a table that does not exist.
    #[error("Table '{table}' does not exist")]
    TableMissing { table: String },

    /// Unique / primary key constraint violation.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// CHECK constraint violation (price range, name length).
    #[error("Check constraint violated: {constraint}")]
    CheckViolation { constraint: String },

    /// NOT NULL constraint violation.
    #[error("Missing value for {column}")]
    NotNullViolation { column: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created or opened
    /// - File permissions issue
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// BEGIN / COMMIT / ROLLBACK failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl ToString) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.to_string(),
        }
    }

    /// Machine-readable error code, printed next to the message.
    pub fn code(&self) -> &'static str {
        match self {
            DbError::NotFound { .. } => "NOT_FOUND",
            DbError::TableExists { .. } => "DUPLICATE_TABLE",
            DbError::TableMissing { .. } => "UNDEFINED_TABLE",
            DbError::UniqueViolation { .. } => "UNIQUE_VIOLATION",
            DbError::CheckViolation { .. } => "CHECK_VIOLATION",
            DbError::NotNullViolation { .. } => "NOT_NULL_VIOLATION",
            DbError::ConnectionFailed(_) => "CONNECTION_FAILURE",
            DbError::QueryFailed(_) => "QUERY_FAILED",
            DbError::TransactionFailed(_) => "TRANSACTION_FAILED",
            DbError::Internal(_) => "INTERNAL",
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// "table X already exists"          → DbError::TableExists
/// "no such table: X"                → DbError::TableMissing
/// "UNIQUE constraint failed: t.c"   → DbError::UniqueViolation
/// "CHECK constraint failed: name"   → DbError::CheckViolation
/// "NOT NULL constraint failed: t.c" → DbError::NotNullViolation
/// other database errors             → DbError::QueryFailed
/// anything else                     → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => from_sqlite_message(db_err.message()),
            _ => DbError::Internal(err.to_string()),
        }
    }
}

fn from_sqlite_message(msg: &str) -> DbError {
    if let Some(rest) = msg.strip_prefix("table ") {
        if let Some(table) = rest.strip_suffix(" already exists") {
            return DbError::TableExists {
                table: table.to_string(),
            };
        }
    }

    if let Some(table) = msg.strip_prefix("no such table: ") {
        return DbError::TableMissing {
            table: unqualified(table).to_string(),
        };
    }

    if let Some(column) = msg.strip_prefix("UNIQUE constraint failed: ") {
        return DbError::UniqueViolation {
            field: unqualified(column).to_string(),
            value: "unknown".to_string(),
        };
    }

    if let Some(constraint) = msg.strip_prefix("CHECK constraint failed: ") {
        return DbError::CheckViolation {
            constraint: constraint.to_string(),
        };
    }

    if let Some(column) = msg.strip_prefix("NOT NULL constraint failed: ") {
        return DbError::NotNullViolation {
            column: unqualified(column).to_string(),
        };
    }

    DbError::QueryFailed(msg.to_string())
}

/// `article.code` → `code`, `main.article` → `article`.
fn unqualified(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_messages_are_categorized() {
        assert!(matches!(
            from_sqlite_message("table article already exists"),
            DbError::TableExists { table } if table == "article"
        ));
        assert!(matches!(
            from_sqlite_message("no such table: main.article"),
            DbError::TableMissing { table } if table == "article"
        ));
        assert!(matches!(
            from_sqlite_message("UNIQUE constraint failed: article.code"),
            DbError::UniqueViolation { field, .. } if field == "code"
        ));
        assert!(matches!(
            from_sqlite_message("CHECK constraint failed: price_range"),
            DbError::CheckViolation { constraint } if constraint == "price_range"
        ));
        assert!(matches!(
            from_sqlite_message("NOT NULL constraint failed: article.name"),
            DbError::NotNullViolation { column } if column == "name"
        ));
        assert!(matches!(
            from_sqlite_message("database is locked"),
            DbError::QueryFailed(_)
        ));
    }

    #[test]
    fn test_error_codes_and_messages() {
        let err = DbError::duplicate("code", 7);
        assert_eq!(err.code(), "UNIQUE_VIOLATION");
        assert_eq!(err.to_string(), "Duplicate code: '7' already exists");

        let err = DbError::TableMissing {
            table: "article".to_string(),
        };
        assert_eq!(err.code(), "UNDEFINED_TABLE");
        assert_eq!(err.to_string(), "Table 'article' does not exist");

        assert_eq!(DbError::not_found("Article", 3).to_string(), "Article not found: 3");
    }
}
