//! # Opening the Store
//!
//! The item store runs in one of two shapes:
//!
//! ```text
//! ┌──────────────────────────┬──────────────────────────────────────────────┐
//! │ DbConfig::new(path)      │ file on disk, parent dir created on demand,  │
//! │                          │ WAL journal, small shared pool               │
//! ├──────────────────────────┼──────────────────────────────────────────────┤
//! │ DbConfig::in_memory()    │ exactly one connection, never recycled:      │
//! │                          │ every `:memory:` connection is its own DB    │
//! └──────────────────────────┴──────────────────────────────────────────────┘
//! ```
//!
//! Either way the schema is migrated before the handle is returned, unless
//! the config opts out.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::item::ItemRepository;

/// Concurrent connections for a file-backed store.
const FILE_POOL_SIZE: u32 = 4;

/// How long a command waits for a free connection.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    File(PathBuf),
    Memory,
}

/// Where the store lives and whether to migrate it on open.
#[derive(Debug, Clone)]
pub struct DbConfig {
    target: Target,
    migrate: bool,
}

impl DbConfig {
    /// A file-backed store at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            target: Target::File(path.into()),
            migrate: true,
        }
    }

    /// A private in-memory store, gone when the handle is dropped.
    pub fn in_memory() -> Self {
        DbConfig {
            target: Target::Memory,
            migrate: true,
        }
    }

    /// Skips migrations on open; call [`Database::migrate`] later.
    pub fn without_migrations(mut self) -> Self {
        self.migrate = false;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.target == Target::Memory
    }

    /// The database file, or `None` for an in-memory store.
    pub fn path(&self) -> Option<&Path> {
        match &self.target {
            Target::File(path) => Some(path),
            Target::Memory => None,
        }
    }
}

/// Handle to the item store. Clones share one pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (and by default migrates) the store described by `config`.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        let pool = match &config.target {
            Target::File(path) => open_file(path).await?,
            Target::Memory => open_memory().await?,
        };

        let db = Database { pool };
        if config.migrate {
            db.migrate().await?;
        }
        Ok(db)
    }

    /// Brings the schema up to date. Already-applied steps are skipped.
    pub async fn migrate(&self) -> DbResult<()> {
        migrations::apply(&self.pool).await
    }

    pub fn items(&self) -> ItemRepository {
        ItemRepository::new(self.pool.clone())
    }

    /// Closes every connection; later queries fail.
    pub async fn close(&self) {
        info!("Closing item store");
        self.pool.close().await;
    }

    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

async fn open_file(path: &Path) -> DbResult<SqlitePool> {
    info!(path = %path.display(), "Opening item store");

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| DbError::ConnectionFailed(e.to_string()))?;
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal);

    let pool = SqlitePoolOptions::new()
        .max_connections(FILE_POOL_SIZE)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await
        .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

    debug!(connections = FILE_POOL_SIZE, "File pool ready");
    Ok(pool)
}

async fn open_memory() -> DbResult<SqlitePool> {
    debug!("Opening in-memory item store");

    SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(SqliteConnectOptions::new().in_memory(true))
        .await
        .map_err(|e| DbError::ConnectionFailed(e.to_string()))
}
