//! # Repository Module
//!
//! Database repository implementations for the item store.
//!
//! ```text
//! fumo_* command
//!      │  db.items().get_by_sku("SKU1")
//!      ▼
//! ItemRepository
//! ├── list(&self)
//! ├── get_by_uid(&self, uid)
//! ├── get_by_sku(&self, sku)
//! ├── insert(&self, sku, metadata)
//! └── delete(&self, uid)
//!      │  SQL
//!      ▼
//! SQLite (items table)
//! ```

pub mod item;
