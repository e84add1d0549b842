//! # Repository Contract
//!
//! The capability every backend provides to the UI.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Table view                                                             │
//! │       │  repo.load().await                                              │
//! │       ▼                                                                 │
//! │  Arc<dyn Repository>                                                    │
//! │  ├── load()                 → Vec<Record>                               │
//! │  ├── get_by_uid(uid)        → Result<Option<Record>>                    │
//! │  ├── get_by_sku(sku)        → Result<Option<Record>>                    │
//! │  ├── add(sku, metadata)     → ()                                        │
//! │  ├── rm(uid)                → ()                                        │
//! │  └── format_metadata(&m)    → String                                    │
//! │       │                                                                 │
//! │       ├──────────────► RemoteRepository (command channel)               │
//! │       └──────────────► SampleRepository (in-memory rows)                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The signatures encode each backend's failure policy: `load`, `add` and
//! `rm` cannot fail from the caller's point of view, lookups can.

use async_trait::async_trait;

use crate::error::RepoResult;
use crate::record::{Metadata, Record};

/// Uniform access to a collection of [`Record`]s.
///
/// Any implementation can stand in for another behind `Arc<dyn Repository>`.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Snapshot of all records, in the backend's own order.
    async fn load(&self) -> Vec<Record>;

    /// Exact match on the primary key.
    async fn get_by_uid(&self, uid: &str) -> RepoResult<Option<Record>>;

    /// Exact match on the SKU. With duplicates, the first match wins.
    async fn get_by_sku(&self, sku: &str) -> RepoResult<Option<Record>>;

    /// Inserts a record under a freshly generated uid.
    async fn add(&self, sku: &str, metadata: Metadata);

    /// Removes the record with this uid. Absent uid is a no-op.
    async fn rm(&self, uid: &str);

    /// Renders metadata for display. Must not touch repository state.
    fn format_metadata(&self, metadata: &Metadata) -> String;
}
