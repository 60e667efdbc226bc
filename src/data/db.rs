use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::SqliteConnection;
use r2d2::CustomizeConnection;

use crate::data::models::StorageError;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

const BUSY_TIMEOUT_MS: u32 = 5_000;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS review_records (
    learner_id TEXT NOT NULL,
    content_type TEXT NOT NULL,
    content_id TEXT NOT NULL,
    interval_days INTEGER NOT NULL DEFAULT 0,
    ease_factor REAL NOT NULL DEFAULT 2.5,
    due_at TIMESTAMP NOT NULL,
    correct_streak INTEGER NOT NULL DEFAULT 0,
    incorrect_count INTEGER NOT NULL DEFAULT 0,
    last_seen_at TIMESTAMP,
    PRIMARY KEY (learner_id, content_type, content_id)
);

CREATE INDEX IF NOT EXISTS idx_review_records_learner_due
    ON review_records (learner_id, due_at);

CREATE TABLE IF NOT EXISTS progress_summaries (
    learner_id TEXT NOT NULL PRIMARY KEY,
    total_reviews BIGINT NOT NULL DEFAULT 0,
    correct_reviews BIGINT NOT NULL DEFAULT 0,
    last_study_date DATE,
    streak_days INTEGER NOT NULL DEFAULT 0,
    points BIGINT NOT NULL DEFAULT 0,
    level INTEGER NOT NULL DEFAULT 1
);
";

/// Per-connection SQLite settings applied when the pool opens a connection
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas {
    busy_timeout_ms: u32,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;",
            self.busy_timeout_ms
        ))
        .map_err(|e| {
            log::error!("Failed to configure SQLite connection: {}", e);
            diesel::r2d2::Error::QueryError(e)
        })
    }
}

pub fn create_pool(database_url: &str, max_size: u32) -> Result<DbPool, StorageError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(SqlitePragmas {
            busy_timeout_ms: BUSY_TIMEOUT_MS,
        }))
        .build(manager)?;
    Ok(pool)
}

/// Creates the tables if they are missing. Safe to run on every start.
pub fn init_schema(pool: &DbPool) -> Result<(), StorageError> {
    let mut conn = pool.get()?;
    conn.batch_execute(SCHEMA)?;
    Ok(())
}
