use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

mod error;
mod record;

pub use error::{StoreError, ValidationError};
pub use record::{NewScore, PlayerScore, ScoreRecord, MAX_NAME_LENGTH};

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;

/// Applied to every store round-trip unless overridden via `STORE_TIMEOUT_MS`.
pub const DEFAULT_OP_TIMEOUT: Duration = Duration::from_millis(5000);

// The row id doubles as the insertion-order tiebreak for equal scores.
const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS scores ( \
        id INTEGER PRIMARY KEY AUTOINCREMENT, \
        name TEXT NOT NULL, \
        score REAL NOT NULL, \
        recorded_at TIMESTAMP NOT NULL \
    )";

// Every read path sorts by score descending
const SCORE_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_scores_score ON scores (score DESC)";

/// Client for the score collection. Constructed once at startup and handed
/// to the HTTP layer; cloning shares the underlying pool.
#[derive(Clone)]
pub struct ScoreStore {
    pool: SqlitePool,
    op_timeout: Duration,
}

impl ScoreStore {
    /// Opens a pool to the database at `url` and ensures the score table
    /// and its ordering index exist.
    pub async fn connect(url: &str, op_timeout: Duration) -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect(url)
            .await?;
        Self::with_pool(pool, op_timeout).await
    }

    /// Store backed by a private in-memory database.
    /// A single connection keeps every query on the same database.
    #[cfg(test)]
    pub async fn in_memory() -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Self::with_pool(pool, DEFAULT_OP_TIMEOUT).await
    }

    async fn with_pool(pool: SqlitePool, op_timeout: Duration) -> StoreResult<Self> {
        let store = Self { pool, op_timeout };
        store
            .run(async {
                sqlx::query(SCHEMA).execute(&store.pool).await?;
                sqlx::query(SCORE_INDEX).execute(&store.pool).await?;
                Ok(())
            })
            .await?;
        Ok(store)
    }

    /// Persists a validated submission with a server-assigned timestamp
    /// and returns the stored record.
    pub async fn insert(&self, score: NewScore) -> StoreResult<ScoreRecord> {
        let recorded_at = Utc::now();
        self.run(async {
            sqlx::query("INSERT INTO scores (name, score, recorded_at) VALUES (?, ?, ?)")
                .bind(score.name())
                .bind(score.score())
                .bind(recorded_at)
                .execute(&self.pool)
                .await?;
            Ok(score.into_record(recorded_at))
        })
        .await
    }

    /// Fetches up to `n` records ordered by score descending; equal scores
    /// keep insertion order. The internal row id is not part of the result.
    pub async fn top_n(&self, n: u32) -> StoreResult<Vec<ScoreRecord>> {
        self.run(async {
            sqlx::query_as::<_, ScoreRecord>(
                "SELECT name, score, recorded_at AS date FROM scores \
                 ORDER BY score DESC, id ASC LIMIT ?",
            )
            .bind(n)
            .fetch_all(&self.pool)
            .await
        })
        .await
    }

    /// Fetches up to `n` records whose name equals `name` ignoring case.
    /// Exact equality on a bound parameter; user input never reaches the
    /// query text.
    pub async fn by_player(&self, name: &str, n: u32) -> StoreResult<Vec<PlayerScore>> {
        self.run(async {
            sqlx::query_as::<_, PlayerScore>(
                "SELECT score, recorded_at AS date FROM scores \
                 WHERE LOWER(name) = LOWER(?) \
                 ORDER BY score DESC, id ASC LIMIT ?",
            )
            .bind(name)
            .bind(n)
            .fetch_all(&self.pool)
            .await
        })
        .await
    }

    /// Removes every record unconditionally and returns the number removed.
    /// Deleting from an empty collection succeeds.
    pub async fn delete_all(&self) -> StoreResult<u64> {
        self.run(async {
            let result = sqlx::query("DELETE FROM scores").execute(&self.pool).await?;
            Ok(result.rows_affected())
        })
        .await
    }

    /// Cheap liveness probe for the health endpoint. Never errors.
    pub async fn is_connected(&self) -> bool {
        self.run(async {
            sqlx::query("SELECT 1")
                .execute(&self.pool)
                .await
                .map(|_| ())
        })
        .await
        .is_ok()
    }

    /// Releases the pool. Called once on process shutdown, after the
    /// in-flight requests have drained.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Runs a store operation under the configured timeout. An operation
    /// that does not complete in time fails instead of hanging the request.
    async fn run<T, F>(&self, op: F) -> StoreResult<T>
    where
        F: Future<Output = std::result::Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.op_timeout, op).await {
            Ok(result) => result.map_err(StoreError::from),
            Err(_) => Err(StoreError::Timeout),
        }
    }
}
