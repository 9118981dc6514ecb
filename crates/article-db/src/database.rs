//! # Database Connection
//!
//! Owns the one SQLite connection the client keeps for its whole session.
//!
//! ## Why One Connection (and no pool)?
//! The client is strictly sequential: read a menu option, run one
//! statement in one transaction, print, repeat. A single owned
//! `SqliteConnection` makes that ordering a compile-time fact: every
//! repository borrows it mutably, so two operations can never overlap.
//!
//! ## SQLite Settings
//! - WAL journal for file databases (readers in other processes are not
//!   blocked while this client writes)
//! - `busy_timeout`: how long a statement waits for a lock held by
//!   another process before failing with "database is locked"

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
use sqlx::{Connection, SqliteConnection};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::article::ArticleRepository;

const IN_MEMORY: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use article_db::DbConfig;
///
/// let config = DbConfig::new("articles.db").busy_timeout(Duration::from_secs(2));
/// assert_eq!(config.busy_timeout, Duration::from_secs(2));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// How long to wait for another connection's lock.
    /// Default: 5 seconds
    pub busy_timeout: Duration,

    /// Create the database file if it does not exist.
    /// Default: true
    pub create_if_missing: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            busy_timeout: Duration::from_secs(5),
            create_if_missing: true,
        }
    }

    /// Sets the busy timeout.
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Sets whether a missing database file is created.
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// Every connection to `:memory:` gets its own empty database.
    pub fn in_memory() -> Self {
        DbConfig::new(IN_MEMORY)
    }

    /// Whether this configuration points at a private in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                .create_if_missing(self.create_if_missing)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
        };

        Ok(options.busy_timeout(self.busy_timeout))
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// ## Usage
/// ```rust,ignore
/// let mut db = Database::connect(&DbConfig::new("articles.db")).await?;
///
/// db.articles().create_table().await?;
/// let total = db.articles().count().await?;
///
/// db.close().await?;
/// ```
pub struct Database {
    conn: SqliteConnection,
}

impl Database {
    /// Opens the session's single connection.
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use database handle
    /// * `Err(DbError::ConnectionFailed)` - File could not be opened
    pub async fn connect(config: &DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening database connection"
        );

        let options = config.connect_options()?;
        debug!(busy_timeout_ms = config.busy_timeout.as_millis() as u64, "Connection options configured");

        let conn = SqliteConnection::connect_with(&options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!("Database connection established");
        Ok(Database { conn })
    }

    /// Returns the article repository, borrowing the connection.
    pub fn articles(&mut self) -> ArticleRepository<'_> {
        ArticleRepository::new(&mut self.conn)
    }

    /// Closes the connection.
    ///
    /// Every operation has already committed or rolled back by the time
    /// the menu exits, so closing never discards work.
    pub async fn close(self) -> DbResult<()> {
        info!("Closing database connection");
        self.conn
            .close()
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let mut db = Database::connect(&DbConfig::in_memory()).await.unwrap();
        db.articles().create_table().await.unwrap();
        assert_eq!(db.articles().count().await.unwrap(), 0);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_file_database_persists_between_connections() {
        let dir = tempfile::tempdir().unwrap();
        let config = DbConfig::new(dir.path().join("articles.db"));

        let mut db = Database::connect(&config).await.unwrap();
        db.articles().create_table().await.unwrap();
        db.close().await.unwrap();

        let mut db = Database::connect(&config).await.unwrap();
        assert_eq!(db.articles().count().await.unwrap(), 0);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_without_create_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = DbConfig::new(dir.path().join("absent.db")).create_if_missing(false);

        let err = Database::connect(&config).await.unwrap_err();
        assert!(matches!(err, DbError::ConnectionFailed(_)));
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/articles.db")
            .busy_timeout(Duration::from_millis(250))
            .create_if_missing(false);

        assert_eq!(config.busy_timeout, Duration::from_millis(250));
        assert!(!config.create_if_missing);
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
    }
}
