//! # Repository Registry
//!
//! Pairs each repository with the name the UI shows for it, so the consumer
//! can switch backends without code changes.

use std::sync::Arc;

use crate::repository::Repository;

/// A repository together with its display name.
#[derive(Clone)]
pub struct NamedRepository {
    pub name: String,
    pub repository: Arc<dyn Repository>,
}

impl NamedRepository {
    pub fn new(name: impl Into<String>, repository: Arc<dyn Repository>) -> Self {
        NamedRepository {
            name: name.into(),
            repository,
        }
    }
}

impl std::fmt::Debug for NamedRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamedRepository")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Ordered set of named repositories.
///
/// Registering a name twice replaces the earlier entry in place.
#[derive(Debug, Clone, Default)]
pub struct RepositoryRegistry {
    entries: Vec<NamedRepository>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a repository under `name`.
    pub fn register(&mut self, name: impl Into<String>, repository: Arc<dyn Repository>) {
        let entry = NamedRepository::new(name, repository);
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, name: impl Into<String>, repository: Arc<dyn Repository>) -> Self {
        self.register(name, repository);
        self
    }

    /// Looks up a repository by display name.
    pub fn get(&self, name: &str) -> Option<&NamedRepository> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// The first registered repository.
    pub fn default_repository(&self) -> Option<&NamedRepository> {
        self.entries.first()
    }

    /// Display names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedRepository> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Metadata;
    use crate::sample::SampleRepository;

    #[tokio::test]
    async fn test_consumer_switches_repositories_by_name() {
        let registry = RepositoryRegistry::new()
            .with("Small", Arc::new(SampleRepository::seeded(2)))
            .with("Large", Arc::new(SampleRepository::seeded(7)));

        assert_eq!(registry.names(), ["Small", "Large"]);
        assert_eq!(registry.default_repository().unwrap().name, "Small");

        for (name, expected) in [("Small", 2), ("Large", 7)] {
            let repo = &registry.get(name).unwrap().repository;
            assert_eq!(repo.load().await.len(), expected);
            assert_eq!(repo.format_metadata(&Metadata::text("x")), "x");
        }
        assert!(registry.get("Missing").is_none());
    }

    #[test]
    fn test_register_same_name_replaces() {
        let mut registry = RepositoryRegistry::new();
        registry.register("Sample", Arc::new(SampleRepository::empty()));
        registry.register("Sample", Arc::new(SampleRepository::seeded(1)));
        assert_eq!(registry.len(), 1);
    }
}
