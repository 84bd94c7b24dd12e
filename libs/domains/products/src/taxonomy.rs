//! Animals and categories that products point at.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{TaxonomyError, TaxonomyResult};
use crate::models::{CreateTaxon, Taxon, TaxonomyKind};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaxonomyRepository: Send + Sync {
    /// Sorted by name
    async fn list(&self, kind: TaxonomyKind) -> TaxonomyResult<Vec<Taxon>>;

    async fn get(&self, kind: TaxonomyKind, id: Uuid) -> TaxonomyResult<Option<Taxon>>;

    async fn find_by_name(&self, kind: TaxonomyKind, name: String) -> TaxonomyResult<Option<Taxon>>;

    /// Fails with [`TaxonomyError::Duplicate`] when the name is taken
    async fn insert(&self, kind: TaxonomyKind, taxon: Taxon) -> TaxonomyResult<Taxon>;
}

/// In-memory implementation of TaxonomyRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaxonomyRepository {
    entries: Arc<RwLock<HashMap<TaxonomyKind, HashMap<Uuid, Taxon>>>>,
}

impl InMemoryTaxonomyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// id → name for one kind
    pub(crate) async fn names(&self, kind: TaxonomyKind) -> HashMap<Uuid, String> {
        self.entries
            .read()
            .await
            .get(&kind)
            .map(|taxa| {
                taxa.values()
                    .map(|taxon| (taxon.id, taxon.name.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl TaxonomyRepository for InMemoryTaxonomyRepository {
    async fn list(&self, kind: TaxonomyKind) -> TaxonomyResult<Vec<Taxon>> {
        let entries = self.entries.read().await;
        let mut taxa: Vec<Taxon> = entries
            .get(&kind)
            .map(|taxa| taxa.values().cloned().collect())
            .unwrap_or_default();
        taxa.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(taxa)
    }

    async fn get(&self, kind: TaxonomyKind, id: Uuid) -> TaxonomyResult<Option<Taxon>> {
        let entries = self.entries.read().await;
        Ok(entries.get(&kind).and_then(|taxa| taxa.get(&id)).cloned())
    }

    async fn find_by_name(&self, kind: TaxonomyKind, name: String) -> TaxonomyResult<Option<Taxon>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(&kind)
            .and_then(|taxa| taxa.values().find(|taxon| taxon.name == name))
            .cloned())
    }

    async fn insert(&self, kind: TaxonomyKind, taxon: Taxon) -> TaxonomyResult<Taxon> {
        let mut entries = self.entries.write().await;
        let taxa = entries.entry(kind).or_default();

        if taxa.values().any(|existing| existing.name == taxon.name) {
            return Err(TaxonomyError::Duplicate {
                kind,
                name: taxon.name,
            });
        }

        taxa.insert(taxon.id, taxon.clone());
        Ok(taxon)
    }
}

pub struct TaxonomyService<R: TaxonomyRepository> {
    repository: Arc<R>,
}

impl<R: TaxonomyRepository> Clone for TaxonomyService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: TaxonomyRepository> TaxonomyService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn list(&self, kind: TaxonomyKind) -> TaxonomyResult<Vec<Taxon>> {
        self.repository.list(kind).await
    }

    pub async fn get(&self, kind: TaxonomyKind, id: Uuid) -> TaxonomyResult<Option<Taxon>> {
        self.repository.get(kind, id).await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, kind: TaxonomyKind, input: CreateTaxon) -> TaxonomyResult<Taxon> {
        input
            .validate()
            .map_err(|e| TaxonomyError::Validation(e.to_string()))?;

        let name = input.name.trim().to_string();
        if self
            .repository
            .find_by_name(kind, name.clone())
            .await?
            .is_some()
        {
            return Err(TaxonomyError::Duplicate { kind, name });
        }

        let taxon = self.repository.insert(kind, Taxon::new(name)).await?;
        tracing::info!(%kind, id = %taxon.id, name = %taxon.name, "Created taxon");
        Ok(taxon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_kinds_are_separate_namespaces() {
        let service = TaxonomyService::new(InMemoryTaxonomyRepository::new());
        let name = || CreateTaxon { name: "birds".into() };

        service.create(TaxonomyKind::Animal, name()).await.unwrap();
        service.create(TaxonomyKind::Category, name()).await.unwrap();

        let err = service.create(TaxonomyKind::Animal, name()).await.unwrap_err();
        assert!(matches!(err, TaxonomyError::Duplicate { kind: TaxonomyKind::Animal, .. }));
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_name() {
        let service = TaxonomyService::new(InMemoryTaxonomyRepository::new());
        for name in ["dog", "cat", "hamster"] {
            service
                .create(TaxonomyKind::Animal, CreateTaxon { name: name.into() })
                .await
                .unwrap();
        }

        let names: Vec<String> = service
            .list(TaxonomyKind::Animal)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, ["cat", "dog", "hamster"]);
        assert!(service.list(TaxonomyKind::Category).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_blank_and_long_names() {
        let mut repository = MockTaxonomyRepository::new();
        repository.expect_insert().never();
        let service = TaxonomyService::new(repository);

        for name in [String::new(), "x".repeat(101)] {
            let err = service
                .create(TaxonomyKind::Category, CreateTaxon { name })
                .await
                .unwrap_err();
            assert!(matches!(err, TaxonomyError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_create_trims_name() {
        let mut repository = MockTaxonomyRepository::new();
        repository
            .expect_find_by_name()
            .withf(|_, name| name == "toys")
            .returning(|_, _| Ok(None));
        repository
            .expect_insert()
            .withf(|kind, taxon| *kind == TaxonomyKind::Category && taxon.name == "toys")
            .returning(|_, taxon| Ok(taxon));

        let service = TaxonomyService::new(repository);
        let created = service
            .create(TaxonomyKind::Category, CreateTaxon { name: " toys ".into() })
            .await
            .unwrap();
        assert_eq!(created.name, "toys");
    }
}
