//! # In-Process Command Channel
//!
//! Runs `fumo_*` commands against the local store without going through the
//! webview, so Rust code can drive a [`RemoteRepository`] over the real
//! database.
//!
//! ```text
//! RemoteRepository::get_by_uid("…")
//!        │  Command::GetByUid, {"uid": "…"}
//!        ▼
//! LocalChannel::invoke ──► decode args ──► get_item_by_uid(&db, uid)
//!        │                                        │
//!        │   ApiError ──► ChannelError::Rejected  │
//!        ◄────────────── reply as JSON ◄──────────┘
//! ```
//!
//! [`RemoteRepository`]: fumo_core::RemoteRepository

use async_trait::async_trait;
use fumo_core::{ChannelError, Command, CommandChannel, Metadata};
use fumo_db::Database;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::commands::fumo;
use crate::error::{ApiError, ErrorCode};

#[derive(Deserialize)]
struct UidArgs {
    uid: String,
}

#[derive(Deserialize)]
struct SkuArgs {
    sku: String,
}

#[derive(Deserialize)]
struct AddArgs {
    sku: String,
    metadata: Metadata,
}

/// [`CommandChannel`] backed directly by the command handlers.
#[derive(Debug, Clone)]
pub struct LocalChannel {
    db: Database,
}

impl LocalChannel {
    pub fn new(db: Database) -> Self {
        LocalChannel { db }
    }
}

/// Decodes command arguments. Bad arguments are rejected by the host,
/// the same way IPC rejects a call with a missing key.
fn args<T: DeserializeOwned>(command: Command, args: Value) -> Result<T, ChannelError> {
    serde_json::from_value(args).map_err(|e| {
        warn!(%command, error = %e, "Malformed command arguments");
        ChannelError::rejected_with_code(
            command,
            ErrorCode::InvalidArgument.as_str(),
            format!("invalid args: {}", e),
        )
    })
}

fn reply<T: Serialize>(command: Command, result: Result<T, ApiError>) -> Result<Value, ChannelError> {
    let value =
        result.map_err(|e| ChannelError::rejected_with_code(command, e.code.as_str(), e.message))?;
    serde_json::to_value(value).map_err(|e| ChannelError::Transport(e.to_string()))
}

#[async_trait]
impl CommandChannel for LocalChannel {
    async fn invoke(&self, command: Command, raw: Value) -> Result<Value, ChannelError> {
        let db = &self.db;

        match command {
            Command::Load => reply(command, fumo::load_items(db).await),
            Command::GetByUid => {
                let a: UidArgs = args(command, raw)?;
                reply(command, fumo::get_item_by_uid(db, &a.uid).await)
            }
            Command::GetBySku => {
                let a: SkuArgs = args(command, raw)?;
                reply(command, fumo::get_item_by_sku(db, &a.sku).await)
            }
            Command::Add => {
                let a: AddArgs = args(command, raw)?;
                reply(command, fumo::add_item(db, &a.sku, a.metadata).await)
            }
            Command::Remove => {
                let a: UidArgs = args(command, raw)?;
                reply(command, fumo::remove_item(db, &a.uid).await)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
