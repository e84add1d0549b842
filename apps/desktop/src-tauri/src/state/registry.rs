//! # Registry State
//!
//! The repositories offered to the UI plus the one it should open with.

use fumo_core::{NamedRepository, RepositoryRegistry};
use serde::Serialize;

/// Registry plus the configured default repository name.
pub struct RegistryState {
    registry: RepositoryRegistry,
    selected: String,
}

/// Summary sent to the frontend's repository picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryList {
    pub names: Vec<String>,
    pub selected: Option<String>,
}

impl RegistryState {
    pub fn new(registry: RepositoryRegistry, selected: impl Into<String>) -> Self {
        RegistryState {
            registry,
            selected: selected.into(),
        }
    }

    pub fn registry(&self) -> &RepositoryRegistry {
        &self.registry
    }

    /// The configured repository, or the first registered one when the
    /// configured name is unknown.
    pub fn selected(&self) -> Option<&NamedRepository> {
        self.registry
            .get(&self.selected)
            .or_else(|| self.registry.default_repository())
    }

    pub fn list(&self) -> RepositoryList {
        RepositoryList {
            names: self.registry.names().into_iter().map(str::to_string).collect(),
            selected: self.selected().map(|r| r.name.clone()),
        }
    }
}
