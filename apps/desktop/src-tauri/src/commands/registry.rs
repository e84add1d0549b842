//! # Repository Commands
//!
//! Lets the UI run the six repository operations against whichever named
//! repository it has selected.
//!
//! ```text
//! invoke('repository_load', { name: 'Sample Repository' })
//!        │
//!        ▼
//! RegistryState ── get(name) ──► Arc<dyn Repository> ── load() ──► rows
//!        │                                                         │
//!        └─ unknown name ──► ApiError { NOT_FOUND }                 ▼
//!                                               RepositoryRow { .., display }
//! ```
//!
//! Every row carries `display`, the repository's `format_metadata` output, so
//! the table never formats metadata itself.

use fumo_core::{Metadata, Record, Repository};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{RegistryState, RepositoryList};

#[cfg(feature = "desktop")]
use tauri::State;

/// A record plus its rendered metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryRow {
    pub uid: String,
    pub sku: String,
    pub metadata: Metadata,
    pub display: String,
}

impl RepositoryRow {
    fn render(repository: &dyn Repository, record: Record) -> Self {
        RepositoryRow {
            display: repository.format_metadata(&record.metadata),
            uid: record.uid,
            sku: record.sku,
            metadata: record.metadata,
        }
    }
}

fn lookup(state: &RegistryState, name: &str) -> Result<Arc<dyn Repository>, ApiError> {
    state
        .registry()
        .get(name)
        .map(|named| named.repository.clone())
        .ok_or_else(|| ApiError::not_found(format!("No repository named '{}'", name)))
}

/// Names of the registered repositories and the one to open first.
pub fn list_repositories(state: &RegistryState) -> RepositoryList {
    state.list()
}

pub async fn load_rows(state: &RegistryState, name: &str) -> Result<Vec<RepositoryRow>, ApiError> {
    let repo = lookup(state, name)?;
    let rows: Vec<RepositoryRow> = repo
        .load()
        .await
        .into_iter()
        .map(|r| RepositoryRow::render(repo.as_ref(), r))
        .collect();

    debug!(repository = %name, count = rows.len(), "Loaded rows");
    Ok(rows)
}

pub async fn find_by_uid(
    state: &RegistryState,
    name: &str,
    uid: &str,
) -> Result<Option<RepositoryRow>, ApiError> {
    let repo = lookup(state, name)?;
    let found = repo.get_by_uid(uid).await?;
    Ok(found.map(|r| RepositoryRow::render(repo.as_ref(), r)))
}

pub async fn find_by_sku(
    state: &RegistryState,
    name: &str,
    sku: &str,
) -> Result<Option<RepositoryRow>, ApiError> {
    let repo = lookup(state, name)?;
    let found = repo.get_by_sku(sku).await?;
    Ok(found.map(|r| RepositoryRow::render(repo.as_ref(), r)))
}

pub async fn add_row(
    state: &RegistryState,
    name: &str,
    sku: &str,
    metadata: Metadata,
) -> Result<(), ApiError> {
    lookup(state, name)?.add(sku, metadata).await;
    Ok(())
}

pub async fn remove_row(state: &RegistryState, name: &str, uid: &str) -> Result<(), ApiError> {
    lookup(state, name)?.rm(uid).await;
    Ok(())
}

pub fn format_with(
    state: &RegistryState,
    name: &str,
    metadata: &Metadata,
) -> Result<String, ApiError> {
    Ok(lookup(state, name)?.format_metadata(metadata))
}

// =============================================================================
// Tauri IPC
// =============================================================================

#[cfg(feature = "desktop")]
#[tauri::command]
pub fn repository_list(state: State<'_, RegistryState>) -> RepositoryList {
    list_repositories(state.inner())
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn repository_load(
    state: State<'_, RegistryState>,
    name: String,
) -> Result<Vec<RepositoryRow>, ApiError> {
    load_rows(state.inner(), &name).await
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn repository_get_by_uid(
    state: State<'_, RegistryState>,
    name: String,
    uid: String,
) -> Result<Option<RepositoryRow>, ApiError> {
    find_by_uid(state.inner(), &name, &uid).await
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn repository_get_by_sku(
    state: State<'_, RegistryState>,
    name: String,
    sku: String,
) -> Result<Option<RepositoryRow>, ApiError> {
    find_by_sku(state.inner(), &name, &sku).await
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn repository_add(
    state: State<'_, RegistryState>,
    name: String,
    sku: String,
    metadata: Metadata,
) -> Result<(), ApiError> {
    add_row(state.inner(), &name, &sku, metadata).await
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn repository_remove(
    state: State<'_, RegistryState>,
    name: String,
    uid: String,
) -> Result<(), ApiError> {
    remove_row(state.inner(), &name, &uid).await
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub fn repository_format_metadata(
    state: State<'_, RegistryState>,
    name: String,
    metadata: Metadata,
) -> Result<String, ApiError> {
    format_with(state.inner(), &name, &metadata)
}
