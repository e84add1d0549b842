//! # Command Channel
//!
//! The port the remote repository talks through.
//!
//! ## Wire Contract
//! ```text
//! ┌──────────────────┬──────────────────────────┬────────────────────────┐
//! │ Command          │ Arguments                │ Reply                  │
//! ├──────────────────┼──────────────────────────┼────────────────────────┤
//! │ fumo_load        │ {}                       │ Record[]               │
//! │ fumo_get_by_uid  │ { uid }                  │ Record | null          │
//! │ fumo_get_by_sku  │ { sku }                  │ Record | null          │
//! │ fumo_add         │ { sku, metadata }        │ null                   │
//! │ fumo_remove      │ { uid }                  │ null                   │
//! └──────────────────┴──────────────────────────┴────────────────────────┘
//! ```
//!
//! The channel itself is opaque: a Tauri `invoke`, an in-process dispatcher,
//! or a scripted fake in tests all fit behind [`CommandChannel`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ChannelError;

// =============================================================================
// Command
// =============================================================================

/// Names of the commands exposed by the external store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    #[serde(rename = "fumo_load")]
    Load,
    #[serde(rename = "fumo_get_by_uid")]
    GetByUid,
    #[serde(rename = "fumo_get_by_sku")]
    GetBySku,
    #[serde(rename = "fumo_add")]
    Add,
    #[serde(rename = "fumo_remove")]
    Remove,
}

impl Command {
    /// Every command, in wire-table order.
    pub const ALL: [Command; 5] = [
        Command::Load,
        Command::GetByUid,
        Command::GetBySku,
        Command::Add,
        Command::Remove,
    ];

    /// The wire name of the command.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Command::Load => "fumo_load",
            Command::GetByUid => "fumo_get_by_uid",
            Command::GetBySku => "fumo_get_by_sku",
            Command::Add => "fumo_add",
            Command::Remove => "fumo_remove",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown command: {}", s))
    }
}

// =============================================================================
// Channel Port
// =============================================================================

/// Executes a named command with a key-value argument payload.
///
/// A reply of `Value::Null` means "nothing to return" (`fumo_add`,
/// `fumo_remove`) or "not found" (lookups).
#[async_trait]
pub trait CommandChannel: Send + Sync {
    async fn invoke(
        &self,
        command: Command,
        args: serde_json::Value,
    ) -> Result<serde_json::Value, ChannelError>;
}

#[async_trait]
impl<T: CommandChannel + ?Sized> CommandChannel for std::sync::Arc<T> {
    async fn invoke(
        &self,
        command: Command,
        args: serde_json::Value,
    ) -> Result<serde_json::Value, ChannelError> {
        (**self).invoke(command, args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names() {
        let names: Vec<&str> = Command::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(
            names,
            ["fumo_load", "fumo_get_by_uid", "fumo_get_by_sku", "fumo_add", "fumo_remove"]
        );
    }

    #[test]
    fn test_command_parsing() {
        for cmd in Command::ALL {
            assert_eq!(cmd.as_str().parse::<Command>().unwrap(), cmd);
        }
        assert!("fumo_update".parse::<Command>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_name() {
        assert_eq!(
            serde_json::to_string(&Command::Remove).unwrap(),
            "\"fumo_remove\""
        );
    }
}
