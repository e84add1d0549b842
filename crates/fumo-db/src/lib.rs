//! # fumo-db: Database Layer for Fumo
//!
//! This crate owns the SQLite store that backs the `fumo_*` commands.
//! It uses sqlx for async access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Fumo Data Flow                                   │
//! │                                                                         │
//! │  RemoteRepository ──invoke("fumo_load")──► command host                │
//! │                                                 │                       │
//! │                                                 ▼                       │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     fumo-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │ ItemRepository│    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│   (item.rs)   │    │  (embedded)  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                 │                       │
//! │                                                 ▼                       │
//! │                                      SQLite file (fumo.sqlite)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fumo_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./db/fumo.sqlite")).await?;
//! let rows = db.items().list().await?;
//! ```

pub mod error;
mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::item::ItemRepository;
