//! Schema steps under `migrations/sqlite`, compiled into the binary.
//!
//! New steps get the next `NNN_` prefix. Shipped files stay untouched;
//! sqlx checksums them.

use sqlx::migrate::Migrator;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

static SCHEMA: Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies every step the store has not seen yet.
pub(crate) async fn apply(pool: &SqlitePool) -> DbResult<()> {
    debug!(steps = SCHEMA.migrations.len(), "Applying schema");
    SCHEMA.run(pool).await?;
    Ok(())
}
