//! Quote persistence.
//!
//! The request pipeline only sees the `QuoteStore` capability, injected through the
//! router state, so tests can put a slowed or failing store behind the handler. The
//! production backend is `SqliteStore`, an async SQLite pool over one append-only
//! table:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS cotacoes (
//!     id        INTEGER PRIMARY KEY AUTOINCREMENT,
//!     bid       TEXT NOT NULL,
//!     timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
//! )
//! ```
//!
//! The table is created on open and never migrated. Rows are never updated or deleted.
//!
//! Each insert runs in its own transaction that is committed only if the persist deadline
//! is still open. A dropped transaction rolls back, so a write that blows its window
//! leaves no row. The SQLite busy timeout is capped at the persist budget, so a locked
//! database fails inside the window instead of queueing behind the lock.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use fx_common::Deadline;
use fx_common::deadline::PERSIST_BUDGET;
use log::{info, warn};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::StoreError;

static MEMDB_COUNTER: AtomicU64 = AtomicU64::new(0);

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS cotacoes (\
    id INTEGER PRIMARY KEY AUTOINCREMENT, \
    bid TEXT NOT NULL, \
    timestamp DATETIME DEFAULT CURRENT_TIMESTAMP)";

const INSERT_BID: &str = "INSERT INTO cotacoes (bid) VALUES (?)";

/// Write capability the request pipeline depends on.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// Append one row holding `bid`, finishing inside `deadline`. Returns the row id.
    async fn insert_bid(&self, bid: &str, deadline: &Deadline) -> Result<i64, StoreError>;
}

/// A persisted quote row.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct StoredQuote {
    /// Auto-increment row id.
    pub id: i64,
    /// Bid exactly as it was served.
    pub bid: String,
    /// Write time assigned by SQLite (UTC).
    pub timestamp: NaiveDateTime,
}

/// SQLite-backed store with a connection pool.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connection acquire timeout.
    const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

    /// Open (creating if needed) the database at `path` and ensure the table exists.
    ///
    /// `:memory:` opens a private in-memory database, unique per call. The busy timeout
    /// is the default persist budget.
    pub async fn open(path: &str) -> Result<Self, StoreError> {
        Self::open_with_busy_timeout(path, PERSIST_BUDGET).await
    }

    /// Like `open`, waiting at most `busy_timeout` for a lock held by another connection.
    pub async fn open_with_busy_timeout(
        path: &str,
        busy_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = if path == ":memory:" {
            // Uniquely named shared-cache database so parallel tests do not collide.
            let id = MEMDB_COUNTER.fetch_add(1, Ordering::Relaxed);
            let memdb_uri = format!(
                "file:fx-server-memdb-{}-{}?mode=memory&cache=shared",
                std::process::id(),
                id
            );

            let options = SqliteConnectOptions::new()
                .filename(&memdb_uri)
                .shared_cache(true)
                .create_if_missing(true)
                .busy_timeout(busy_timeout);

            // The database lives only as long as a connection does.
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .acquire_timeout(Self::ACQUIRE_TIMEOUT)
                .connect_with(options)
                .await?
        } else {
            if let Some(parent) = Path::new(path).parent()
                && !parent.as_os_str().is_empty()
                && let Err(e) = std::fs::create_dir_all(parent)
            {
                warn!("Failed to create database directory {}: {}", parent.display(), e);
            }

            let options = SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .busy_timeout(busy_timeout);

            SqlitePoolOptions::new()
                .max_connections(5)
                .min_connections(1)
                .acquire_timeout(Self::ACQUIRE_TIMEOUT)
                .connect_with(options)
                .await?
        };

        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        info!("Quote store ready at {}", path);

        Ok(Self { pool })
    }

    /// Get reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Number of rows persisted so far.
    pub async fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cotacoes")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Most recently inserted row, if any.
    pub async fn latest(&self) -> Result<Option<StoredQuote>, StoreError> {
        let row = sqlx::query_as::<_, StoredQuote>(
            "SELECT id, bid, timestamp FROM cotacoes ORDER BY id DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}

#[async_trait]
impl QuoteStore for SqliteStore {
    async fn insert_bid(&self, bid: &str, deadline: &Deadline) -> Result<i64, StoreError> {
        let mut tx = deadline.run(self.pool.begin()).await??;
        let done = deadline
            .run(sqlx::query(INSERT_BID).bind(bid).execute(&mut *tx))
            .await??;
        if deadline.is_expired() {
            // Dropping `tx` rolls the insert back.
            return Err(deadline.exceeded().into());
        }
        tx.commit().await?;
        Ok(done.last_insert_rowid())
    }
}
