//! # Sample Repository
//!
//! Self-contained in-memory backend for demos and tests.
//!
//! ## Observable Rows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  SampleRepository                                                       │
//! │  ┌───────────────────────────────┐                                      │
//! │  │ watch::Sender<Vec<Record>>    │── send_modify ──┐                    │
//! │  │ revision: AtomicU64           │                 │                    │
//! │  └───────────────────────────────┘                 ▼                    │
//! │                                     ┌───────────────────────────────┐   │
//! │   add / rm ─────────────────────►   │ watch::Receiver (per table)   │   │
//! │                                     │ changed().await → re-render   │   │
//! │                                     └───────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `load()` hands out a snapshot. A view that wants to follow the rows as
//! they change holds a receiver from [`SampleRepository::subscribe`].

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::debug;

use crate::error::RepoResult;
use crate::record::{Metadata, Record};
use crate::repository::Repository;
use crate::SAMPLE_SIZE;

/// In-memory repository seeded with generated rows.
///
/// Every operation is infallible and does no I/O.
#[derive(Debug)]
pub struct SampleRepository {
    rows: watch::Sender<Vec<Record>>,
    revision: AtomicU64,
}

impl SampleRepository {
    /// Creates a repository holding [`SAMPLE_SIZE`] generated rows.
    pub fn new() -> Self {
        Self::seeded(SAMPLE_SIZE)
    }

    /// Creates a repository holding `count` generated rows.
    pub fn seeded(count: usize) -> Self {
        Self::from_records(generate_sample_rows(count))
    }

    /// Creates an empty repository.
    pub fn empty() -> Self {
        Self::from_records(Vec::new())
    }

    /// Creates a repository over existing records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let (rows, _) = watch::channel(records);
        SampleRepository {
            rows,
            revision: AtomicU64::new(0),
        }
    }

    /// Subscribes to the rows. The receiver always sees the current
    /// collection and is notified after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Record>> {
        self.rows.subscribe()
    }

    /// Number of mutations applied so far.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.borrow().is_empty()
    }

    /// Appends a record and returns it, uid included.
    pub fn insert(&self, sku: impl Into<String>, metadata: impl Into<Metadata>) -> Record {
        let record = Record::new(sku, metadata);
        let appended = record.clone();
        self.rows.send_modify(|rows| rows.push(appended));
        self.revision.fetch_add(1, Ordering::AcqRel);

        debug!(uid = %record.uid, sku = %record.sku, "Sample row added");
        record
    }

    /// Removes the first record with this uid, keeping the order of the rest.
    ///
    /// Returns the removed record, or `None` (and notifies nobody) if the
    /// uid is unknown.
    pub fn remove(&self, uid: &str) -> Option<Record> {
        let mut removed = None;
        self.rows.send_if_modified(|rows| {
            match rows.iter().position(|r| r.uid == uid) {
                Some(index) => {
                    removed = Some(rows.remove(index));
                    true
                }
                None => false,
            }
        });

        if removed.is_some() {
            self.revision.fetch_add(1, Ordering::AcqRel);
            debug!(uid = %uid, "Sample row removed");
        }
        removed
    }

    fn find(&self, pred: impl Fn(&Record) -> bool) -> Option<Record> {
        self.rows.borrow().iter().find(|r| pred(r)).cloned()
    }
}

impl Default for SampleRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository for SampleRepository {
    async fn load(&self) -> Vec<Record> {
        self.rows.borrow().clone()
    }

    async fn get_by_uid(&self, uid: &str) -> RepoResult<Option<Record>> {
        Ok(self.find(|r| r.uid == uid))
    }

    async fn get_by_sku(&self, sku: &str) -> RepoResult<Option<Record>> {
        Ok(self.find(|r| r.sku == sku))
    }

    async fn add(&self, sku: &str, metadata: Metadata) {
        self.insert(sku, metadata);
    }

    async fn rm(&self, uid: &str) {
        self.remove(uid);
    }

    fn format_metadata(&self, metadata: &Metadata) -> String {
        metadata.to_string()
    }
}

/// Generates `count` rows: `SKU1`/`Metadata 1` through `SKU{count}`.
pub fn generate_sample_rows(count: usize) -> Vec<Record> {
    (1..=count)
        .map(|i| Record::new(format!("SKU{}", i), format!("Metadata {}", i)))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
