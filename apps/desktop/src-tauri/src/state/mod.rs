//! # State Module
//!
//! Tauri-managed state. Each command asks only for the state it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────┐          │
//! │  │   DbState    │  │  RegistryState   │  │    AppConfig     │          │
//! │  │              │  │                  │  │                  │          │
//! │  │  Database    │  │  Fumo + Sample   │  │  db path         │          │
//! │  │  (SQLite     │  │  repositories,   │  │  default repo    │          │
//! │  │   pool)      │  │  selected name   │  │  sample size     │          │
//! │  └──────────────┘  └──────────────────┘  └──────────────────┘          │
//! │                                                                         │
//! │  All three are read-only after setup; the pool and the sample          │
//! │  repository synchronize internally.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod db;
mod registry;

pub use db::DbState;
pub use registry::{RegistryState, RepositoryList};
