//! # fumo-core: Repository Contract for Fumo
//!
//! This crate holds the record model and the repository contract the UI talks
//! to, plus the two backends it can switch between.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Fumo Architecture                                │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (table view)                        │   │
//! │  │        picks a NamedRepository, calls it polymorphically        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ fumo-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐  ┌──────────────────┐  ┌──────────────────┐   │   │
//! │  │   │ Repository │  │ RemoteRepository │  │ SampleRepository │   │   │
//! │  │   │  (trait)   │◄─│  CommandChannel  │  │  watch<Vec<..>>  │   │   │
//! │  │   └────────────┘  └────────┬─────────┘  └──────────────────┘   │   │
//! │  └────────────────────────────┼────────────────────────────────────┘   │
//! │                               │ fumo_load, fumo_add, ...               │
//! │  ┌────────────────────────────▼────────────────────────────────────┐   │
//! │  │           Command host (fumo-desktop) → fumo-db (SQLite)        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`record`] - `Record` and `Metadata`
//! - [`repository`] - The six-operation `Repository` trait
//! - [`channel`] - `Command` names and the `CommandChannel` port
//! - [`remote`] - Backend that forwards to a `CommandChannel`
//! - [`sample`] - Observable in-memory backend with generated rows
//! - [`diagnostics`] - Where "log and suppress" failures go
//! - [`registry`] - Named repositories for the UI to choose from
//! - [`error`] - Channel and repository errors
//!
//! ## Example Usage
//!
//! ```rust
//! use fumo_core::{Metadata, Repository, SampleRepository};
//!
//! # tokio_test_block(async {
//! let repo = SampleRepository::new();
//! assert_eq!(repo.load().await.len(), 100);
//!
//! let rec = repo.insert("SKU-NEW", Metadata::text("fresh"));
//! let found = repo.get_by_uid(&rec.uid).await.unwrap();
//! assert_eq!(found.unwrap().sku, "SKU-NEW");
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod channel;
pub mod diagnostics;
pub mod error;
pub mod record;
pub mod registry;
pub mod remote;
pub mod repository;
pub mod sample;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use channel::{Command, CommandChannel};
pub use diagnostics::{Diagnostic, DiagnosticSink, MemorySink, TracingSink};
pub use error::{ChannelError, RepoResult, RepositoryError};
pub use record::{Metadata, Record};
pub use registry::{NamedRepository, RepositoryRegistry};
pub use remote::RemoteRepository;
pub use repository::Repository;
pub use sample::SampleRepository;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of rows the sample repository generates on construction.
pub const SAMPLE_SIZE: usize = 100;

/// Display name of the command-backed repository.
pub const FUMO_REPOSITORY_NAME: &str = "Fumo Repository";

/// Display name of the in-memory sample repository.
pub const SAMPLE_REPOSITORY_NAME: &str = "Sample Repository";
