//! # Database State
//!
//! Wraps the `Database` connection for use in Tauri commands.
//!
//! ## Thread Safety
//! `Database` holds a `SqlitePool`, which is already `Send + Sync`.
//! Commands can run queries concurrently without extra locking.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! #[tauri::command]
//! async fn fumo_load(db: State<'_, DbState>) -> Result<Vec<Record>, ApiError> {
//!     load_items(db.inner()).await
//! }
//! ```

use fumo_db::Database;

/// Wrapper around `Database` for Tauri state management.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
