//! # Commands Module
//!
//! Handlers invoked from the frontend via IPC.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Frontend (TypeScript)                                                 │
//! │  ─────────────────────                                                 │
//! │  const items = await invoke('fumo_load');                              │
//! │                    │                                                    │
//! │                    ▼  IPC (JSON)                                        │
//! │  Backend (Rust)                                                        │
//! │  ──────────────                                                        │
//! │  #[tauri::command] fumo_load ──► load_items(&Database)                 │
//! │                                        ▲                                │
//! │  LocalChannel::invoke(Command::Load) ──┘                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - `fumo`: item storage commands (`fumo_load`, `fumo_add`, ...)
//! - `registry`: repository picker and per-repository operations
//!   (`repository_load { name }`, `repository_add { name, sku, metadata }`, ...)
//! - `config`: startup settings (`get_config`)

pub mod config;
pub mod fumo;
pub mod registry;
