//! # Repository Module
//!
//! Data access for the article table.
//!
//! ## Transaction Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every repository call = exactly one transaction                        │
//! │                                                                         │
//! │   BEGIN ──► statement ──┬── Ok  ──► COMMIT   ──► Ok(value)              │
//! │                         └── Err ──► ROLLBACK ──► Err(DbError)           │
//! │                                                                         │
//! │  The connection is back in autocommit state when the call returns,      │
//! │  whatever the outcome, so the next menu option starts clean.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod article;

use sqlx::{Sqlite, Transaction};
use tracing::warn;

use crate::error::{DbError, DbResult};

/// Commits `tx` when the statement succeeded, rolls it back otherwise.
///
/// The statement's own error wins over a failed rollback: that is the
/// error the user needs to see.
pub(crate) async fn settle<T>(
    tx: Transaction<'_, Sqlite>,
    outcome: Result<T, sqlx::Error>,
) -> DbResult<T> {
    match outcome {
        Ok(value) => {
            tx.commit()
                .await
                .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
            Ok(value)
        }
        Err(err) => {
            let err = DbError::from(err);
            warn!(code = err.code(), error = %err, "Statement failed, rolling back");
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "Rollback failed");
            }
            Err(err)
        }
    }
}
