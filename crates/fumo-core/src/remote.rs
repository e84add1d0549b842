//! # Remote Repository
//!
//! Forwards every repository operation to a [`CommandChannel`].
//!
//! ## Failure Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   What happens when the channel fails                   │
//! │                                                                         │
//! │  load()        ──► report to sink ──► return []                         │
//! │  add()         ──► report to sink ──► return ()   (no retry)            │
//! │  rm()          ──► report to sink ──► return ()   (no retry)            │
//! │                                                                         │
//! │  get_by_uid()  ──► Err(RepositoryError::Channel)  (caller handles it)   │
//! │  get_by_sku()  ──► Err(RepositoryError::Channel)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The asymmetry between the bulk/mutating calls and the lookups is kept on
//! purpose: callers of the lookups already deal with `Result`.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::channel::{Command, CommandChannel};
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::error::{ChannelError, RepoResult};
use crate::record::{Metadata, Record};
use crate::repository::Repository;

// =============================================================================
// Argument Payloads
// =============================================================================

#[derive(Serialize)]
struct UidArgs<'a> {
    uid: &'a str,
}

#[derive(Serialize)]
struct SkuArgs<'a> {
    sku: &'a str,
}

#[derive(Serialize)]
struct AddArgs<'a> {
    sku: &'a str,
    metadata: &'a Metadata,
}

// =============================================================================
// Remote Repository
// =============================================================================

/// Repository backed by an external store reached through commands.
///
/// Holds no local state besides its collaborators; every call is independent.
///
/// ## Usage
/// ```rust,ignore
/// let repo = RemoteRepository::new(channel);
/// let rows = repo.load().await; // [] if the store is unreachable
/// ```
pub struct RemoteRepository<C> {
    channel: C,
    sink: Arc<dyn DiagnosticSink>,
}

impl<C: CommandChannel> RemoteRepository<C> {
    /// Creates a repository that reports suppressed failures via `tracing`.
    pub fn new(channel: C) -> Self {
        Self::with_sink(channel, Arc::new(TracingSink))
    }

    /// Creates a repository with a custom diagnostic sink.
    pub fn with_sink(channel: C, sink: Arc<dyn DiagnosticSink>) -> Self {
        RemoteRepository { channel, sink }
    }

    /// Returns the underlying channel.
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Invokes `command` and decodes the reply into `T`.
    async fn call<A, T>(&self, command: Command, args: &A) -> Result<T, ChannelError>
    where
        A: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let args = serde_json::to_value(args)
            .map_err(|source| ChannelError::Encode { command, source })?;

        debug!(%command, "Invoking command");
        let reply = self.channel.invoke(command, args).await?;

        serde_json::from_value(reply).map_err(|source| ChannelError::Decode { command, source })
    }

    fn report(&self, command: Command, context: &str, err: ChannelError) {
        self.sink.report(Diagnostic {
            command,
            context: context.to_string(),
            error: err.to_string(),
        });
    }
}

#[async_trait]
impl<C: CommandChannel> Repository for RemoteRepository<C> {
    async fn load(&self) -> Vec<Record> {
        match self
            .call::<_, Vec<Record>>(Command::Load, &serde_json::Map::new())
            .await
        {
            Ok(records) => {
                debug!(count = records.len(), "Loaded records");
                records
            }
            Err(e) => {
                self.report(Command::Load, "Error loading database data", e);
                Vec::new()
            }
        }
    }

    async fn get_by_uid(&self, uid: &str) -> RepoResult<Option<Record>> {
        let record = self.call(Command::GetByUid, &UidArgs { uid }).await?;
        Ok(record)
    }

    async fn get_by_sku(&self, sku: &str) -> RepoResult<Option<Record>> {
        let record = self.call(Command::GetBySku, &SkuArgs { sku }).await?;
        Ok(record)
    }

    async fn add(&self, sku: &str, metadata: Metadata) {
        let args = AddArgs {
            sku,
            metadata: &metadata,
        };
        if let Err(e) = self.call::<_, ()>(Command::Add, &args).await {
            self.report(Command::Add, "Error adding data", e);
        }
    }

    async fn rm(&self, uid: &str) {
        if let Err(e) = self.call::<_, ()>(Command::Remove, &UidArgs { uid }).await {
            self.report(Command::Remove, "Error removing data", e);
        }
    }

    fn format_metadata(&self, metadata: &Metadata) -> String {
        metadata.to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemorySink;
    use crate::error::RepositoryError;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Channel that answers from a script and records every call.
    #[derive(Default)]
    struct ScriptedChannel {
        replies: Mutex<HashMap<Command, Result<Value, String>>>,
        calls: Mutex<Vec<(Command, Value)>>,
    }

    impl ScriptedChannel {
        fn reply(self, command: Command, value: Value) -> Self {
            self.replies.lock().unwrap().insert(command, Ok(value));
            self
        }

        fn fail(self, command: Command, message: &str) -> Self {
            self.replies
                .lock()
                .unwrap()
                .insert(command, Err(message.to_string()));
            self
        }

        fn calls(&self) -> Vec<(Command, Value)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommandChannel for ScriptedChannel {
        async fn invoke(&self, command: Command, args: Value) -> Result<Value, ChannelError> {
            self.calls.lock().unwrap().push((command, args));
            match self.replies.lock().unwrap().get(&command) {
                Some(Ok(v)) => Ok(v.clone()),
                Some(Err(m)) => Err(ChannelError::rejected(command, m.clone())),
                None => Ok(Value::Null),
            }
        }
    }

    fn repo(channel: ScriptedChannel) -> (RemoteRepository<ScriptedChannel>, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (RemoteRepository::with_sink(channel, sink.clone()), sink)
    }

    #[tokio::test]
    async fn test_load_returns_records_from_channel() {
        let (repo, sink) = repo(ScriptedChannel::default().reply(
            Command::Load,
            json!([
                { "uid": "a", "sku": "SKU1", "metadata": "Metadata 1" },
                { "uid": "b", "sku": "SKU2", "metadata": "Metadata 2" }
            ]),
        ));

        let rows = repo.load().await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].sku, "SKU2");
        assert!(sink.is_empty());
        assert_eq!(repo.channel().calls(), vec![(Command::Load, json!({}))]);
    }

    #[tokio::test]
    async fn test_load_failure_degrades_to_empty_and_is_reported() {
        let (repo, sink) = repo(ScriptedChannel::default().fail(Command::Load, "db locked"));

        let rows = repo.load().await;
        assert!(rows.is_empty());

        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].command, Command::Load);
        assert_eq!(entries[0].context, "Error loading database data");
        assert!(entries[0].error.contains("db locked"));
    }

    #[tokio::test]
    async fn test_load_with_malformed_reply_degrades() {
        let (repo, sink) = repo(ScriptedChannel::default().reply(Command::Load, json!("nope")));
        assert!(repo.load().await.is_empty());
        assert_eq!(sink.len(), 1);
    }

    #[tokio::test]
    async fn test_get_by_uid_failure_propagates() {
        let (repo, sink) = repo(ScriptedChannel::default().fail(Command::GetByUid, "offline"));

        let err = repo.get_by_uid("X").await.unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::Channel(ChannelError::Rejected {
                command: Command::GetByUid,
                ..
            })
        ));
        // Lookups do not go through the sink.
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_get_by_sku_failure_propagates() {
        let (repo, _) = repo(ScriptedChannel::default().fail(Command::GetBySku, "offline"));
        assert!(repo.get_by_sku("SKU1").await.is_err());
    }

    #[tokio::test]
    async fn test_lookups_map_null_to_none() {
        let (repo, _) = repo(ScriptedChannel::default());
        assert_eq!(repo.get_by_uid("missing").await.unwrap(), None);
        assert_eq!(repo.get_by_sku("missing").await.unwrap(), None);
        assert_eq!(
            repo.channel().calls(),
            vec![
                (Command::GetByUid, json!({ "uid": "missing" })),
                (Command::GetBySku, json!({ "sku": "missing" })),
            ]
        );
    }

    #[tokio::test]
    async fn test_get_by_sku_returns_single_record() {
        let (repo, _) = repo(ScriptedChannel::default().reply(
            Command::GetBySku,
            json!({ "uid": "a", "sku": "DUP", "metadata": "first" }),
        ));
        let rec = repo.get_by_sku("DUP").await.unwrap().unwrap();
        assert_eq!(rec.uid, "a");
    }

    #[tokio::test]
    async fn test_add_sends_sku_and_metadata() {
        let (repo, sink) = repo(ScriptedChannel::default());
        repo.add("SKU9", Metadata::text("Metadata 9")).await;

        assert_eq!(
            repo.channel().calls(),
            vec![(Command::Add, json!({ "sku": "SKU9", "metadata": "Metadata 9" }))]
        );
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_add_and_rm_failures_are_suppressed() {
        let (repo, sink) = repo(
            ScriptedChannel::default()
                .fail(Command::Add, "disk full")
                .fail(Command::Remove, "disk full"),
        );

        repo.add("SKU1", Metadata::text("m")).await;
        repo.rm("some-uid").await;

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].context, "Error adding data");
        assert_eq!(entries[1].context, "Error removing data");
        // No retry.
        assert_eq!(repo.channel().calls().len(), 2);
    }

    #[tokio::test]
    async fn test_rm_sends_uid() {
        let (repo, _) = repo(ScriptedChannel::default());
        repo.rm("u-1").await;
        assert_eq!(
            repo.channel().calls(),
            vec![(Command::Remove, json!({ "uid": "u-1" }))]
        );
    }

    #[test]
    fn test_format_metadata_is_identity_for_text() {
        let (repo, _) = repo(ScriptedChannel::default());
        for s in ["", "Metadata 1", "  spaced  ", "ユニコード"] {
            assert_eq!(repo.format_metadata(&Metadata::text(s)), s);
        }
    }

    #[tokio::test]
    async fn test_string_valued_structured_metadata_reads_back_equal() {
        let (repo, _) = repo(ScriptedChannel::default());
        repo.add("S", Metadata::Structured(json!("plain"))).await;

        let sent = repo.channel().calls()[0].1.clone();
        assert_eq!(sent, json!({ "sku": "S", "metadata": "plain" }));

        let reply = json!({ "uid": "u", "sku": "S", "metadata": sent["metadata"] });
        let (repo, _) = repo_replying_with(reply);
        let rec = repo.get_by_uid("u").await.unwrap().unwrap();
        assert_eq!(rec.metadata, Metadata::text("plain"));
        assert_eq!(repo.format_metadata(&Metadata::Structured(json!("plain"))), "plain");
    }

    fn repo_replying_with(record: Value) -> (RemoteRepository<ScriptedChannel>, Arc<MemorySink>) {
        repo(ScriptedChannel::default().reply(Command::GetByUid, record))
    }
}
