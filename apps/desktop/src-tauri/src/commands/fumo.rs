//! # Item Commands
//!
//! The five `fumo_*` commands behind the remote repository.
//!
//! ## Wire Contract
//! ```text
//! ┌──────────────────┬───────────────────────────────┬──────────────────┐
//! │ Command          │ Arguments                     │ Reply            │
//! ├──────────────────┼───────────────────────────────┼──────────────────┤
//! │ fumo_load        │ -                             │ Record[]         │
//! │ fumo_get_by_uid  │ { uid }                       │ Record | null    │
//! │ fumo_get_by_sku  │ { sku }                       │ Record | null    │
//! │ fumo_add         │ { sku, metadata }             │ null             │
//! │ fumo_remove      │ { uid }                       │ null             │
//! └──────────────────┴───────────────────────────────┴──────────────────┘
//! ```
//!
//! Each command is a plain async handler over `&Database`, so the same code
//! serves Tauri IPC (feature `desktop`) and [`crate::channel::LocalChannel`].

use fumo_core::{Metadata, Record};
use fumo_db::Database;
use tracing::{debug, info};

use crate::error::ApiError;

#[cfg(feature = "desktop")]
use crate::state::DbState;
#[cfg(feature = "desktop")]
use tauri::State;

/// Returns every stored item in insertion order.
pub async fn load_items(db: &Database) -> Result<Vec<Record>, ApiError> {
    let items = db.items().list().await?;
    debug!(count = items.len(), "Loaded items");
    Ok(items)
}

/// Looks an item up by uid. A malformed uid is an `INVALID_ARGUMENT` error.
pub async fn get_item_by_uid(db: &Database, uid: &str) -> Result<Option<Record>, ApiError> {
    debug!(uid = %uid, "Getting item by uid");
    Ok(db.items().get_by_uid(uid).await?)
}

/// Looks an item up by SKU, earliest insert first.
pub async fn get_item_by_sku(db: &Database, sku: &str) -> Result<Option<Record>, ApiError> {
    debug!(sku = %sku, "Getting item by SKU");
    Ok(db.items().get_by_sku(sku).await?)
}

/// Stores a new item under a fresh uid.
pub async fn add_item(db: &Database, sku: &str, metadata: Metadata) -> Result<(), ApiError> {
    let record = db.items().insert(sku, &metadata).await?;
    info!(uid = %record.uid, sku = %record.sku, "Item added");
    Ok(())
}

/// Deletes an item. Removing an unknown uid succeeds.
pub async fn remove_item(db: &Database, uid: &str) -> Result<(), ApiError> {
    if db.items().delete(uid).await? {
        info!(uid = %uid, "Item removed");
    } else {
        debug!(uid = %uid, "Remove requested for unknown uid");
    }
    Ok(())
}

// =============================================================================
// Tauri IPC
// =============================================================================

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn fumo_load(db: State<'_, DbState>) -> Result<Vec<Record>, ApiError> {
    load_items(db.inner().inner()).await
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn fumo_get_by_uid(
    db: State<'_, DbState>,
    uid: String,
) -> Result<Option<Record>, ApiError> {
    get_item_by_uid(db.inner().inner(), &uid).await
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn fumo_get_by_sku(
    db: State<'_, DbState>,
    sku: String,
) -> Result<Option<Record>, ApiError> {
    get_item_by_sku(db.inner().inner(), &sku).await
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn fumo_add(
    db: State<'_, DbState>,
    sku: String,
    metadata: Metadata,
) -> Result<(), ApiError> {
    add_item(db.inner().inner(), &sku, metadata).await
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn fumo_remove(db: State<'_, DbState>, uid: String) -> Result<(), ApiError> {
    remove_item(db.inner().inner(), &uid).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use fumo_db::DbConfig;

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_add_then_load() {
        let db = db().await;
        add_item(&db, "SKU1", Metadata::text("Metadata 1")).await.unwrap();
        add_item(&db, "SKU2", Metadata::text("Metadata 2")).await.unwrap();

        let items = load_items(&db).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].sku, "SKU1");
        assert_eq!(items[1].metadata, Metadata::text("Metadata 2"));
    }

    #[tokio::test]
    async fn test_lookup_and_remove() {
        let db = db().await;
        add_item(&db, "SKU9", Metadata::text("m")).await.unwrap();

        let rec = get_item_by_sku(&db, "SKU9").await.unwrap().unwrap();
        assert_eq!(get_item_by_uid(&db, &rec.uid).await.unwrap(), Some(rec.clone()));

        remove_item(&db, &rec.uid).await.unwrap();
        assert_eq!(get_item_by_uid(&db, &rec.uid).await.unwrap(), None);
        // second remove is a no-op
        remove_item(&db, &rec.uid).await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_uid_is_invalid_argument() {
        let db = db().await;
        let err = get_item_by_uid(&db, "X").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
    }
}
