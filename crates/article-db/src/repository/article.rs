//! # Article Repository
//!
//! Database operations for articles. One method, one statement, one
//! transaction.
//!
//! ## Key Operations
//! - Table create / drop
//! - Insert, delete by code, delete by text
//! - Count, get by code, list, list above a price
//! - Update name/price
//! - Price increment inside a serializable transaction that stays open
//!   until the caller decides
//!
//! ## Serializable Increment
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  begin_price_increment(code, +10%)                      │
//! │                                                                         │
//! │  BEGIN IMMEDIATE  ◄── write lock taken now, not at first write          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT price_cents ... WHERE code = ?   (10.00)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  UPDATE article SET price_cents = ?      (11.00)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PendingIncrement ── user is asked to continue ──┬── commit()   → COMMIT│
//! │                                                  └── rollback() → ROLLBACK│
//! │                                                                         │
//! │  No other connection can write between the SELECT and the UPDATE,      │
//! │  and nobody sees 11.00 until COMMIT.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{Connection, Sqlite, SqliteConnection, Transaction};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::repository::settle;
use crate::schema::{CREATE_ARTICLE_TABLE, DROP_ARTICLE_TABLE};
use article_core::{Article, Money, Percentage};

/// Repository for article database operations.
///
/// ## Usage
/// ```rust,ignore
/// let mut repo = db.articles();
///
/// repo.insert(&Article::new(1, "Pen", Some(Money::from_cents(150)))?).await?;
/// let pen = repo.get(1).await?;
/// ```
pub struct ArticleRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> ArticleRepository<'c> {
    /// Creates a new ArticleRepository over a borrowed connection.
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        ArticleRepository { conn }
    }

    async fn begin(&mut self) -> DbResult<Transaction<'_, Sqlite>> {
        self.conn
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))
    }

    // =========================================================================
    // Schema
    // =========================================================================

    /// Creates the article table.
    ///
    /// ## Returns
    /// * `Err(DbError::TableExists)` - The table is already there
    pub async fn create_table(&mut self) -> DbResult<()> {
        info!("Creating table 'article'");

        let mut tx = self.begin().await?;
        let outcome = sqlx::query(CREATE_ARTICLE_TABLE)
            .execute(&mut *tx)
            .await
            .map(|_| ());
        settle(tx, outcome).await
    }

    /// Drops the article table and every row in it.
    ///
    /// ## Returns
    /// * `Err(DbError::TableMissing)` - There is no table to drop
    pub async fn drop_table(&mut self) -> DbResult<()> {
        info!("Dropping table 'article'");

        let mut tx = self.begin().await?;
        let outcome = sqlx::query(DROP_ARTICLE_TABLE)
            .execute(&mut *tx)
            .await
            .map(|_| ());
        settle(tx, outcome).await
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Inserts a new article.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - The code is taken
    /// * `Err(DbError::CheckViolation)` - Price or name outside the column rules
    pub async fn insert(&mut self, article: &Article) -> DbResult<()> {
        debug!(code = article.code, "Inserting article");

        let mut tx = self.begin().await?;
        let outcome = sqlx::query(
            r#"
            INSERT INTO article (code, name, price_cents)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(article.code)
        .bind(article.name.as_str())
        .bind(article.price)
        .execute(&mut *tx)
        .await
        .map(|_| ());

        settle(tx, outcome).await.map_err(|err| match err {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, article.code),
            other => other,
        })
    }

    /// Deletes the article with the given code.
    ///
    /// ## Returns
    /// * `Ok(true)` - One row was removed
    /// * `Ok(false)` - No article has that code
    pub async fn delete(&mut self, code: i32) -> DbResult<bool> {
        debug!(code, "Deleting article");

        let mut tx = self.begin().await?;
        let outcome = sqlx::query("DELETE FROM article WHERE code = ?1")
            .bind(code)
            .execute(&mut *tx)
            .await
            .map(|result| result.rows_affected() > 0);
        settle(tx, outcome).await
    }

    /// Deletes every article whose name contains `text`.
    ///
    /// Matching is case-insensitive for ASCII letters, and `%` / `_` in
    /// `text` are matched literally.
    ///
    /// ## Returns
    /// Number of deleted articles.
    pub async fn delete_matching(&mut self, text: &str) -> DbResult<u64> {
        let pattern = format!("%{}%", escape_like(text));
        debug!(%pattern, "Deleting articles by text");

        let mut tx = self.begin().await?;
        let outcome = sqlx::query(r"DELETE FROM article WHERE name LIKE ?1 ESCAPE '\'")
            .bind(pattern)
            .execute(&mut *tx)
            .await
            .map(|result| result.rows_affected());
        settle(tx, outcome).await
    }

    /// Replaces the name and, when given, the price of an article.
    ///
    /// The code never changes. `None` keeps the current price.
    ///
    /// ## Returns
    /// * `Ok(true)` - The article was updated
    /// * `Ok(false)` - No article has that code
    pub async fn update(&mut self, code: i32, name: &str, price: Option<Money>) -> DbResult<bool> {
        debug!(code, "Updating article");

        let mut tx = self.begin().await?;
        let outcome = sqlx::query(
            r#"
            UPDATE article
            SET name = ?1, price_cents = COALESCE(?2, price_cents)
            WHERE code = ?3
            "#,
        )
        .bind(name)
        .bind(price)
        .bind(code)
        .execute(&mut *tx)
        .await
        .map(|result| result.rows_affected() > 0);
        settle(tx, outcome).await
    }

    /// Starts a price increment under serializable isolation.
    ///
    /// The transaction is opened with `BEGIN IMMEDIATE`, so the write lock
    /// is held from the first read; the new price is computed from a price
    /// no other connection can change in the meantime. The transaction
    /// stays open inside the returned [`PendingIncrement`] until the caller
    /// commits or rolls back.
    ///
    /// An article without a price keeps no price.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No article has that code (rolled back)
    /// * `Err(DbError::CheckViolation)` - New price above 999.99 (rolled back)
    pub async fn begin_price_increment(
        &mut self,
        code: i32,
        increment: Percentage,
    ) -> DbResult<PendingIncrement<'_>> {
        debug!(code, %increment, "Starting serializable price increment");

        let mut tx = self
            .conn
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        match apply_increment(&mut *tx, code, increment).await {
            Ok((before, after)) => Ok(PendingIncrement { tx, before, after }),
            Err(err) => {
                warn!(code = err.code(), error = %err, "Increment failed, rolling back");
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                }
                Err(err)
            }
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Counts all articles.
    pub async fn count(&mut self) -> DbResult<i64> {
        let mut tx = self.begin().await?;
        let outcome = sqlx::query_scalar::<_, i64>("SELECT count(*) FROM article")
            .fetch_one(&mut *tx)
            .await;
        settle(tx, outcome).await
    }

    /// Gets an article by its code.
    ///
    /// ## Returns
    /// * `Ok(Some(Article))` - Article found
    /// * `Ok(None)` - Article not found
    pub async fn get(&mut self, code: i32) -> DbResult<Option<Article>> {
        let mut tx = self.begin().await?;
        let outcome = fetch_article(&mut *tx, code).await;
        settle(tx, outcome).await
    }

    /// Lists every article, ordered by code.
    pub async fn list(&mut self) -> DbResult<Vec<Article>> {
        let mut tx = self.begin().await?;
        let outcome = sqlx::query_as::<_, Article>(
            r#"
            SELECT code, name, price_cents
            FROM article
            ORDER BY code
            "#,
        )
        .fetch_all(&mut *tx)
        .await;
        settle(tx, outcome).await
    }

    /// Lists articles priced strictly above `threshold`, ordered by code.
    ///
    /// Articles without a price never match.
    pub async fn list_above_price(&mut self, threshold: Money) -> DbResult<Vec<Article>> {
        debug!(%threshold, "Listing articles above price");

        let mut tx = self.begin().await?;
        let outcome = sqlx::query_as::<_, Article>(
            r#"
            SELECT code, name, price_cents
            FROM article
            WHERE price_cents > ?1
            ORDER BY code
            "#,
        )
        .bind(threshold)
        .fetch_all(&mut *tx)
        .await;
        settle(tx, outcome).await
    }
}

// =============================================================================
// Pending Increment
// =============================================================================

/// A price increment applied inside a still-open serializable transaction.
///
/// Holds the connection, so nothing else can run until [`commit`] or
/// [`rollback`] is awaited. Dropping it without either rolls the
/// increment back before the connection's next statement.
///
/// [`commit`]: PendingIncrement::commit
/// [`rollback`]: PendingIncrement::rollback
#[must_use = "the increment holds the write lock until committed or rolled back"]
pub struct PendingIncrement<'c> {
    tx: Transaction<'c, Sqlite>,
    before: Article,
    after: Article,
}

impl PendingIncrement<'_> {
    /// The article as it was when the transaction started.
    pub fn before(&self) -> &Article {
        &self.before
    }

    /// The article as it will be once committed.
    pub fn after(&self) -> &Article {
        &self.after
    }

    /// Commits the increment and returns the updated article.
    ///
    /// A failed commit leaves nothing applied: the dropped transaction
    /// rolls back.
    pub async fn commit(self) -> DbResult<Article> {
        let PendingIncrement { tx, after, .. } = self;

        tx.commit().await.map_err(|e| {
            warn!(error = %e, "Commit failed, rolling back");
            DbError::TransactionFailed(e.to_string())
        })?;

        info!(
            code = after.code,
            price = ?after.price.map(|p| p.to_string()),
            "Price increment committed"
        );
        Ok(after)
    }

    /// Discards the increment; the price stays as it was.
    pub async fn rollback(self) -> DbResult<()> {
        let code = self.before.code;
        self.tx
            .rollback()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(code, "Price increment rolled back");
        Ok(())
    }
}

// =============================================================================
// Helpers
// =============================================================================

async fn fetch_article(
    conn: &mut SqliteConnection,
    code: i32,
) -> Result<Option<Article>, sqlx::Error> {
    sqlx::query_as::<_, Article>(
        r#"
        SELECT code, name, price_cents
        FROM article
        WHERE code = ?1
        "#,
    )
    .bind(code)
    .fetch_optional(conn)
    .await
}

async fn apply_increment(
    conn: &mut SqliteConnection,
    code: i32,
    increment: Percentage,
) -> DbResult<(Article, Article)> {
    let before = fetch_article(&mut *conn, code)
        .await?
        .ok_or_else(|| DbError::not_found("Article", code))?;

    let after = Article {
        price: before.price.map(|price| price.increase_by(increment)),
        ..before.clone()
    };

    sqlx::query("UPDATE article SET price_cents = ?1 WHERE code = ?2")
        .bind(after.price)
        .bind(code)
        .execute(&mut *conn)
        .await?;

    Ok((before, after))
}

/// Escapes LIKE wildcards so `text` is matched literally (`ESCAPE '\'`).
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{Database, DbConfig};
    use std::time::Duration;

    async fn setup() -> Database {
        let mut db = Database::connect(&DbConfig::in_memory()).await.unwrap();
        db.articles().create_table().await.unwrap();
        db
    }

    fn article(code: i32, name: &str, cents: Option<i64>) -> Article {
        Article {
            code,
            name: name.to_string(),
            price: cents.map(Money::from_cents),
        }
    }

    async fn seed(db: &mut Database) {
        let mut repo = db.articles();
        repo.insert(&article(3, "Blue pen", Some(150))).await.unwrap();
        repo.insert(&article(1, "Notebook", Some(1250))).await.unwrap();
        repo.insert(&article(2, "Red PEN", Some(175))).await.unwrap();
        repo.insert(&article(4, "Eraser", None)).await.unwrap();
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("pen"), "pen");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
    }

    #[tokio::test]
    async fn test_create_table_twice_reports_exists() {
        let mut db = setup().await;
        let err = db.articles().create_table().await.unwrap_err();
        assert!(matches!(err, DbError::TableExists { ref table } if table == "article"));
    }

    #[tokio::test]
    async fn test_drop_table_then_drop_again_reports_missing() {
        let mut db = setup().await;
        db.articles().drop_table().await.unwrap();

        let err = db.articles().drop_table().await.unwrap_err();
        assert!(matches!(err, DbError::TableMissing { .. }));

        // Queries against the dropped table fail the same way
        let err = db.articles().count().await.unwrap_err();
        assert!(matches!(err, DbError::TableMissing { .. }));
    }

    #[tokio::test]
    async fn test_insert_then_get_returns_same_values() {
        let mut db = setup().await;
        let pen = article(10, "Fountain pen", Some(2599));

        db.articles().insert(&pen).await.unwrap();

        assert_eq!(db.articles().get(10).await.unwrap(), Some(pen));
        assert_eq!(db.articles().get(11).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_insert_without_price_stores_null() {
        let mut db = setup().await;
        db.articles().insert(&article(5, "Sample", None)).await.unwrap();

        let stored = db.articles().get(5).await.unwrap().unwrap();
        assert_eq!(stored.price, None);
    }

    #[tokio::test]
    async fn test_duplicate_code_is_rejected_and_rolled_back() {
        let mut db = setup().await;
        db.articles().insert(&article(1, "First", Some(100))).await.unwrap();

        let err = db
            .articles()
            .insert(&article(1, "Second", Some(200)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::UniqueViolation { ref field, ref value } if field == "code" && value == "1"
        ));

        // The failed insert left nothing behind and the connection still works
        assert_eq!(db.articles().count().await.unwrap(), 1);
        assert_eq!(db.articles().get(1).await.unwrap().unwrap().name, "First");
    }

    #[tokio::test]
    async fn test_storage_rejects_invalid_price_and_name() {
        let mut db = setup().await;

        let err = db
            .articles()
            .insert(&article(1, "Negative", Some(-1)))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { ref constraint } if constraint == "price_range"));

        let err = db
            .articles()
            .insert(&article(2, "Too expensive", Some(100_000)))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));

        let err = db
            .articles()
            .insert(&article(3, &"x".repeat(31), Some(100)))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { ref constraint } if constraint == "name_length"));

        assert_eq!(db.articles().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one_row() {
        let mut db = setup().await;
        seed(&mut db).await;

        assert!(db.articles().delete(2).await.unwrap());
        assert_eq!(db.articles().count().await.unwrap(), 3);
        assert_eq!(db.articles().get(2).await.unwrap(), None);

        // Deleting again finds nothing
        assert!(!db.articles().delete(2).await.unwrap());
        assert_eq!(db.articles().count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_count_tracks_inserts_and_deletes() {
        let mut db = setup().await;
        assert_eq!(db.articles().count().await.unwrap(), 0);

        seed(&mut db).await;
        assert_eq!(db.articles().count().await.unwrap(), 4);

        db.articles().delete(1).await.unwrap();
        db.articles().delete(99).await.unwrap();
        assert_eq!(db.articles().count().await.unwrap(), 3);

        db.articles().insert(&article(99, "Late", None)).await.unwrap();
        assert_eq!(db.articles().count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_delete_matching_is_case_insensitive() {
        let mut db = setup().await;
        seed(&mut db).await;

        assert_eq!(db.articles().delete_matching("pen").await.unwrap(), 2);

        let remaining: Vec<i32> = db
            .articles()
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.code)
            .collect();
        assert_eq!(remaining, vec![1, 4]);

        assert_eq!(db.articles().delete_matching("pen").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_matching_treats_wildcards_literally() {
        let mut db = setup().await;
        db.articles().insert(&article(1, "100% cotton", None)).await.unwrap();
        db.articles().insert(&article(2, "100 sheets", None)).await.unwrap();

        assert_eq!(db.articles().delete_matching("0%").await.unwrap(), 1);
        assert_eq!(db.articles().delete_matching("_").await.unwrap(), 0);
        assert_eq!(db.articles().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_code() {
        let mut db = setup().await;
        seed(&mut db).await;

        let codes: Vec<i32> = db
            .articles()
            .list()
            .await
            .unwrap()
            .iter()
            .map(|a| a.code)
            .collect();
        assert_eq!(codes, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_list_above_price_is_strict_and_ordered() {
        let mut db = setup().await;
        seed(&mut db).await;

        // 1.50 itself is excluded; the unpriced eraser never matches
        let above = db
            .articles()
            .list_above_price(Money::from_cents(150))
            .await
            .unwrap();
        let codes: Vec<i32> = above.iter().map(|a| a.code).collect();
        assert_eq!(codes, vec![1, 2]);
        assert!(above.iter().all(|a| a.price.unwrap() > Money::from_cents(150)));

        let none = db
            .articles()
            .list_above_price(Money::from_cents(99_999))
            .await
            .unwrap();
        assert!(none.is_empty());

        let all_priced = db
            .articles()
            .list_above_price(Money::from_cents(-100))
            .await
            .unwrap();
        assert_eq!(all_priced.len(), 3);
    }

    #[tokio::test]
    async fn test_update_changes_name_and_price_but_not_code() {
        let mut db = setup().await;
        seed(&mut db).await;

        assert!(db
            .articles()
            .update(1, "Spiral notebook", Some(Money::from_cents(1399)))
            .await
            .unwrap());

        let updated = db.articles().get(1).await.unwrap().unwrap();
        assert_eq!(updated, article(1, "Spiral notebook", Some(1399)));
        assert_eq!(db.articles().count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_update_without_price_keeps_current_price() {
        let mut db = setup().await;
        seed(&mut db).await;

        assert!(db.articles().update(3, "Black pen", None).await.unwrap());

        let updated = db.articles().get(3).await.unwrap().unwrap();
        assert_eq!(updated, article(3, "Black pen", Some(150)));
    }

    #[tokio::test]
    async fn test_update_missing_code_reports_false() {
        let mut db = setup().await;
        assert!(!db.articles().update(42, "Ghost", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_invalid_price_rolls_back() {
        let mut db = setup().await;
        seed(&mut db).await;

        let err = db
            .articles()
            .update(1, "Renamed", Some(Money::from_cents(-5)))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));

        // Neither the name nor the price changed
        let unchanged = db.articles().get(1).await.unwrap().unwrap();
        assert_eq!(unchanged, article(1, "Notebook", Some(1250)));
    }

    #[tokio::test]
    async fn test_price_increment_commit() {
        let mut db = setup().await;
        seed(&mut db).await;

        let mut repo = db.articles();
        let pending = repo
            .begin_price_increment(1, Percentage::from_bps(1000))
            .await
            .unwrap();
        assert_eq!(pending.before().price, Some(Money::from_cents(1250)));
        assert_eq!(pending.after().price, Some(Money::from_cents(1375)));

        let committed = pending.commit().await.unwrap();
        assert_eq!(committed.price, Some(Money::from_cents(1375)));

        assert_eq!(
            db.articles().get(1).await.unwrap().unwrap().price,
            Some(Money::from_cents(1375))
        );
    }

    #[tokio::test]
    async fn test_price_increment_rollback_keeps_price() {
        let mut db = setup().await;
        seed(&mut db).await;

        let mut repo = db.articles();
        let pending = repo
            .begin_price_increment(2, Percentage::from_bps(5000))
            .await
            .unwrap();
        pending.rollback().await.unwrap();

        assert_eq!(
            db.articles().get(2).await.unwrap().unwrap().price,
            Some(Money::from_cents(175))
        );
        // Connection is back to normal transactions
        assert_eq!(db.articles().count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_price_increment_missing_article() {
        let mut db = setup().await;

        let err = db
            .articles()
            .begin_price_increment(77, Percentage::from_bps(1000))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, DbError::NotFound { .. }));

        // The failed increment was rolled back; a new transaction can start
        db.articles().insert(&article(77, "Now here", None)).await.unwrap();
    }

    #[tokio::test]
    async fn test_price_increment_over_limit_is_rejected_by_storage() {
        let mut db = setup().await;
        db.articles().insert(&article(1, "Pricey", Some(99_000))).await.unwrap();

        let err = db
            .articles()
            .begin_price_increment(1, Percentage::from_bps(1000))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, DbError::CheckViolation { .. }));

        assert_eq!(
            db.articles().get(1).await.unwrap().unwrap().price,
            Some(Money::from_cents(99_000))
        );
    }

    #[tokio::test]
    async fn test_price_increment_without_price_keeps_null() {
        let mut db = setup().await;
        seed(&mut db).await;

        let mut repo = db.articles();
        let pending = repo
            .begin_price_increment(4, Percentage::from_bps(1000))
            .await
            .unwrap();
        let committed = pending.commit().await.unwrap();
        assert_eq!(committed.price, None);
    }

    #[tokio::test]
    async fn test_dropped_price_increment_rolls_back() {
        let mut db = setup().await;
        seed(&mut db).await;

        {
            let mut repo = db.articles();
            let pending = repo
                .begin_price_increment(1, Percentage::from_bps(1000))
                .await
                .unwrap();
            assert_eq!(pending.after().price, Some(Money::from_cents(1375)));
            drop(pending);
        }

        // The connection is usable again and the increment never landed
        db.articles().insert(&article(9, "After", None)).await.unwrap();
        assert_eq!(
            db.articles().get(1).await.unwrap().unwrap().price,
            Some(Money::from_cents(1250))
        );
    }

    #[tokio::test]
    async fn test_price_increment_is_isolated_from_other_connections() {
        let dir = tempfile::tempdir().unwrap();
        let config = DbConfig::new(dir.path().join("articles.db"))
            .busy_timeout(Duration::from_millis(100));

        let mut writer = Database::connect(&config).await.unwrap();
        writer.articles().create_table().await.unwrap();
        writer
            .articles()
            .insert(&article(1, "Lamp", Some(1000)))
            .await
            .unwrap();

        let mut other = Database::connect(&config).await.unwrap();

        let mut repo = writer.articles();
        let pending = repo
            .begin_price_increment(1, Percentage::from_bps(1000))
            .await
            .unwrap();

        // While pending: the other session still sees 10.00 and cannot write
        assert_eq!(
            other.articles().get(1).await.unwrap().unwrap().price,
            Some(Money::from_cents(1000))
        );
        let err = other
            .articles()
            .update(1, "Desk lamp", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::QueryFailed(ref msg) if msg.contains("database is locked")));

        pending.commit().await.unwrap();

        assert_eq!(
            other.articles().get(1).await.unwrap().unwrap().price,
            Some(Money::from_cents(1100))
        );
        assert!(other.articles().update(1, "Desk lamp", None).await.unwrap());
    }
}
