//! # CLI Error Type
//!
//! Failures that end the session. Errors from a single menu operation
//! never get here: the menu prints them and shows the options again.
//!
//! ```text
//! ConfigError ──┐
//! DbError ──────┼──► CliError ──► main prints it, exit code 1
//! io::Error ────┘
//! ```

use thiserror::Error;

use crate::config::ConfigError;
use article_db::DbError;

/// Session-ending errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Database(#[from] DbError),

    /// Reading the keyboard or writing the terminal failed.
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use article_db::{Database, DbConfig};

    async fn open(config: &DbConfig) -> CliResult<Database> {
        Ok(Database::connect(config).await?)
    }

    fn checked(config: &CliConfig) -> CliResult<()> {
        Ok(config.validate()?)
    }

    #[tokio::test]
    async fn test_connect_failure_becomes_database_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = DbConfig::new(dir.path().join("absent.db")).create_if_missing(false);

        let err = open(&config).await.unwrap_err();
        assert!(matches!(err, CliError::Database(DbError::ConnectionFailed(_))));
        assert!(err.to_string().starts_with("Connection failed: "));
    }

    #[test]
    fn test_invalid_config_becomes_config_error() {
        let mut config = CliConfig::default();
        config.database.busy_timeout_ms = 0;

        let err = checked(&config).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Invalid(_))));
        assert_eq!(
            err.to_string(),
            "Invalid configuration: database.busy_timeout_ms must be greater than 0"
        );
    }
}
