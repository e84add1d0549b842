//! # Item Repository
//!
//! Database operations behind the `fumo_*` commands.
//!
//! ## Storage Layout
//! ```text
//! ┌──────┬──────────────────────────────────────┬───────┬──────────────┬──────┐
//! │ seq  │ uid                                  │ sku   │ metadata     │ kind │
//! ├──────┼──────────────────────────────────────┼───────┼──────────────┼──────┤
//! │ 1    │ 0b6c...e1                            │ SKU1  │ Metadata 1   │ text │
//! │ 2    │ 9f02...3a                            │ SKU2  │ {"qty":3}    │ json │
//! └──────┴──────────────────────────────────────┴───────┴──────────────┴──────┘
//! ```
//!
//! `seq` gives every query a stable insertion order. Text metadata is
//! stored verbatim; structured metadata as JSON text.

use fumo_core::{Metadata, Record};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};

const KIND_TEXT: &str = "text";
const KIND_JSON: &str = "json";

/// Raw `items` row.
#[derive(Debug, FromRow)]
struct ItemRow {
    uid: String,
    sku: String,
    metadata: String,
    metadata_kind: String,
}

impl TryFrom<ItemRow> for Record {
    type Error = DbError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let metadata = match row.metadata_kind.as_str() {
            KIND_TEXT => Metadata::Text(row.metadata),
            KIND_JSON => serde_json::from_str::<serde_json::Value>(&row.metadata)
                .map(Metadata::from)
                .map_err(|e| DbError::Corrupt {
                    uid: row.uid.clone(),
                    reason: e.to_string(),
                })?,
            other => {
                return Err(DbError::Corrupt {
                    uid: row.uid,
                    reason: format!("unknown metadata kind '{}'", other),
                })
            }
        };

        Ok(Record::with_uid(row.uid, row.sku, metadata))
    }
}

/// Splits metadata into its stored text and kind tag.
fn encode_metadata(metadata: &Metadata) -> (String, &'static str) {
    match metadata {
        Metadata::Text(s) => (s.clone(), KIND_TEXT),
        Metadata::Structured(v) => (v.to_string(), KIND_JSON),
    }
}

/// Rejects uids that are not UUIDs before they reach SQL.
fn parse_uid(uid: &str) -> DbResult<String> {
    Uuid::parse_str(uid)
        .map(|u| u.to_string())
        .map_err(|e| DbError::invalid_uid(uid, e))
}

/// Repository for item database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ItemRepository::new(pool);
///
/// let rec = repo.insert("SKU1", &Metadata::text("Metadata 1")).await?;
/// let same = repo.get_by_uid(&rec.uid).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Lists every item in insertion order.
    pub async fn list(&self) -> DbResult<Vec<Record>> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            "SELECT uid, sku, metadata, metadata_kind FROM items ORDER BY seq",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listed items");
        rows.into_iter().map(Record::try_from).collect()
    }

    /// Gets an item by uid.
    ///
    /// ## Returns
    /// * `Ok(Some(Record))` - Item found
    /// * `Ok(None)` - Item not found
    /// * `Err(DbError::InvalidUid)` - `uid` is not a UUID
    pub async fn get_by_uid(&self, uid: &str) -> DbResult<Option<Record>> {
        let uid = parse_uid(uid)?;

        let row: Option<ItemRow> = sqlx::query_as(
            "SELECT uid, sku, metadata, metadata_kind FROM items WHERE uid = ?1",
        )
        .bind(&uid)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Record::try_from).transpose()
    }

    /// Gets the earliest-inserted item with this SKU.
    pub async fn get_by_sku(&self, sku: &str) -> DbResult<Option<Record>> {
        let row: Option<ItemRow> = sqlx::query_as(
            "SELECT uid, sku, metadata, metadata_kind FROM items WHERE sku = ?1 ORDER BY seq LIMIT 1",
        )
        .bind(sku)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Record::try_from).transpose()
    }

    /// Inserts a new item under a freshly generated uid.
    ///
    /// ## Returns
    /// The stored record, uid included.
    pub async fn insert(&self, sku: &str, metadata: &Metadata) -> DbResult<Record> {
        let record = Record::new(sku, metadata.clone());
        let (text, kind) = encode_metadata(&record.metadata);

        debug!(uid = %record.uid, sku = %sku, "Inserting item");

        sqlx::query("INSERT INTO items (uid, sku, metadata, metadata_kind) VALUES (?1, ?2, ?3, ?4)")
            .bind(&record.uid)
            .bind(&record.sku)
            .bind(text)
            .bind(kind)
            .execute(&self.pool)
            .await?;

        Ok(record)
    }

    /// Deletes an item by uid.
    ///
    /// ## Returns
    /// * `Ok(true)` - A row was deleted
    /// * `Ok(false)` - No such uid (not an error)
    pub async fn delete(&self, uid: &str) -> DbResult<bool> {
        let uid = parse_uid(uid)?;

        debug!(uid = %uid, "Deleting item");

        let result = sqlx::query("DELETE FROM items WHERE uid = ?1")
            .bind(&uid)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts stored items.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use serde_json::json;

    async fn items() -> ItemRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().items()
    }

    #[tokio::test]
    async fn test_insert_then_get_by_uid() {
        let repo = items().await;
        let rec = repo.insert("SKU1", &Metadata::text("Metadata 1")).await.unwrap();

        let found = repo.get_by_uid(&rec.uid).await.unwrap().unwrap();
        assert_eq!(found, rec);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let repo = items().await;
        for i in 1..=5 {
            repo.insert(&format!("SKU{}", i), &Metadata::text(format!("Metadata {}", i)))
                .await
                .unwrap();
        }

        let skus: Vec<String> = repo.list().await.unwrap().into_iter().map(|r| r.sku).collect();
        assert_eq!(skus, ["SKU1", "SKU2", "SKU3", "SKU4", "SKU5"]);
    }

    #[tokio::test]
    async fn test_structured_metadata_survives_storage() {
        let repo = items().await;
        let meta = Metadata::Structured(json!({ "qty": 3, "tags": ["plush"] }));
        let rec = repo.insert("SKU-J", &meta).await.unwrap();

        let found = repo.get_by_uid(&rec.uid).await.unwrap().unwrap();
        assert_eq!(found.metadata, meta);
    }

    #[tokio::test]
    async fn test_duplicate_sku_returns_first_inserted() {
        let repo = items().await;
        let first = repo.insert("DUP", &Metadata::text("one")).await.unwrap();
        repo.insert("DUP", &Metadata::text("two")).await.unwrap();

        let found = repo.get_by_sku("DUP").await.unwrap().unwrap();
        assert_eq!(found.uid, first.uid);
        assert_eq!(repo.get_by_sku("MISSING").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_reports_whether_row_existed() {
        let repo = items().await;
        let rec = repo.insert("SKU1", &Metadata::text("m")).await.unwrap();

        assert!(repo.delete(&rec.uid).await.unwrap());
        assert!(!repo.delete(&rec.uid).await.unwrap());
        assert_eq!(repo.get_by_uid(&rec.uid).await.unwrap(), None);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_malformed_uid_is_rejected() {
        let repo = items().await;
        assert!(matches!(
            repo.get_by_uid("X").await,
            Err(DbError::InvalidUid { .. })
        ));
        assert!(matches!(
            repo.delete("not-a-uuid").await,
            Err(DbError::InvalidUid { .. })
        ));
    }

    #[tokio::test]
    async fn test_string_valued_structured_metadata_reads_back_as_text() {
        let repo = items().await;
        let rec = repo.insert("S", &Metadata::Structured(json!("plain"))).await.unwrap();

        let found = repo.get_by_uid(&rec.uid).await.unwrap().unwrap();
        assert_eq!(found, rec);
        assert_eq!(found.metadata, Metadata::text("plain"));
    }

    #[tokio::test]
    async fn test_duplicate_uid_is_a_constraint_violation() {
        let repo = items().await;
        let rec = repo.insert("S", &Metadata::text("m")).await.unwrap();

        let err = sqlx::query("INSERT INTO items (uid, sku, metadata) VALUES (?1, 'S2', 'm')")
            .bind(&rec.uid)
            .execute(&repo.pool)
            .await
            .map_err(DbError::from)
            .unwrap_err();
        assert!(matches!(err, DbError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_unknown_metadata_kind_is_corrupt() {
        let repo = items().await;
        let uid = Uuid::new_v4().to_string();
        // Bypass the CHECK constraint by dropping to the raw kind column.
        sqlx::query("PRAGMA ignore_check_constraints = ON")
            .execute(&repo.pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO items (uid, sku, metadata, metadata_kind) VALUES (?1, 'S', 'm', 'blob')")
            .bind(&uid)
            .execute(&repo.pool)
            .await
            .unwrap();

        assert!(matches!(repo.list().await, Err(DbError::Corrupt { .. })));
    }
}
