use async_trait::async_trait;
use axum_helpers::{Page, PageParams};
use domain_products::{InMemoryProductRepository, ProductRepository};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{SaleError, SaleResult};
use crate::models::Sale;

/// Repository trait for Sale persistence, product links included
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SaleRepository: Send + Sync {
    async fn insert(&self, sale: Sale) -> SaleResult<Sale>;

    async fn get_by_id(&self, id: Uuid) -> SaleResult<Option<Sale>>;

    /// Most recently created sale with exactly this name
    async fn find_by_name(&self, name: String) -> SaleResult<Option<Sale>>;

    /// Newest first
    async fn list(&self, page: PageParams) -> SaleResult<Page<Sale>>;

    /// Overwrite the sale and replace its product links
    async fn update(&self, sale: Sale) -> SaleResult<Sale>;

    async fn delete(&self, id: Uuid) -> SaleResult<bool>;
}

/// In-memory implementation of SaleRepository (for development/testing)
///
/// Built with [`with_catalog`](Self::with_catalog), reads drop product ids
/// that no longer exist in the catalog, matching the `ON DELETE CASCADE` on
/// `sale_products`. Without a catalog, links are returned as stored.
#[derive(Debug, Default, Clone)]
pub struct InMemorySaleRepository {
    sales: Arc<RwLock<HashMap<Uuid, Sale>>>,
    catalog: Option<InMemoryProductRepository>,
}

impl InMemorySaleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: InMemoryProductRepository) -> Self {
        Self {
            sales: Arc::default(),
            catalog: Some(catalog),
        }
    }

    async fn unlink_deleted(&self, mut sale: Sale) -> SaleResult<Sale> {
        if let Some(catalog) = &self.catalog {
            let live: HashSet<Uuid> = catalog
                .find_by_ids(sale.products.clone())
                .await?
                .into_iter()
                .map(|product| product.id)
                .collect();
            sale.products.retain(|id| live.contains(id));
        }
        Ok(sale)
    }

    async fn unlink_all(&self, sale: Option<Sale>) -> SaleResult<Option<Sale>> {
        match sale {
            Some(sale) => self.unlink_deleted(sale).await.map(Some),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl SaleRepository for InMemorySaleRepository {
    async fn insert(&self, sale: Sale) -> SaleResult<Sale> {
        self.sales.write().await.insert(sale.id, sale.clone());
        Ok(sale)
    }

    async fn get_by_id(&self, id: Uuid) -> SaleResult<Option<Sale>> {
        let sale = self.sales.read().await.get(&id).cloned();
        self.unlink_all(sale).await
    }

    async fn find_by_name(&self, name: String) -> SaleResult<Option<Sale>> {
        // v7 ids sort by creation time
        let sale = self
            .sales
            .read()
            .await
            .values()
            .filter(|sale| sale.name == name)
            .max_by_key(|sale| sale.id)
            .cloned();
        self.unlink_all(sale).await
    }

    async fn list(&self, page: PageParams) -> SaleResult<Page<Sale>> {
        let mut all: Vec<Sale> = self.sales.read().await.values().cloned().collect();
        all.sort_by(|a, b| b.id.cmp(&a.id));

        let total = all.len() as u64;
        let mut content = Vec::new();
        for sale in page.slice(&all) {
            content.push(self.unlink_deleted(sale).await?);
        }
        Ok(Page::new(content, page, total))
    }

    async fn update(&self, sale: Sale) -> SaleResult<Sale> {
        let mut sales = self.sales.write().await;
        let slot = sales.get_mut(&sale.id).ok_or(SaleError::NotFound(sale.id))?;
        *slot = sale.clone();
        Ok(sale)
    }

    async fn delete(&self, id: Uuid) -> SaleResult<bool> {
        Ok(self.sales.write().await.remove(&id).is_some())
    }
}
