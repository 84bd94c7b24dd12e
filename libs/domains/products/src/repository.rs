use async_trait::async_trait;
use axum_helpers::Page;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::filter::ProductQuery;
use crate::models::{Product, TaxonomyKind};
use crate::taxonomy::InMemoryTaxonomyRepository;

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// One page of products matching the query's specification
    async fn find_page(&self, query: ProductQuery) -> ProductResult<Page<Product>>;

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// The subset of `ids` that exist; order is unspecified
    async fn find_by_ids(&self, ids: Vec<Uuid>) -> ProductResult<Vec<Product>>;

    async fn insert(&self, product: Product) -> ProductResult<Product>;

    /// Overwrite every column of an existing product
    async fn update(&self, product: Product) -> ProductResult<Product>;

    async fn delete(&self, id: Uuid) -> ProductResult<bool>;

    /// Atomically take `quantity` units out of stock.
    ///
    /// `Ok(None)` when the product does not exist; the amount never drops
    /// below zero.
    async fn withdraw(&self, id: Uuid, quantity: i32) -> ProductResult<Option<Product>>;
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Animal names for filtering come from the taxonomy repository it was built
/// with.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
    taxonomy: InMemoryTaxonomyRepository,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_taxonomy(taxonomy: InMemoryTaxonomyRepository) -> Self {
        Self {
            products: Arc::default(),
            taxonomy,
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_page(&self, query: ProductQuery) -> ProductResult<Page<Product>> {
        let animals = self.taxonomy.names(TaxonomyKind::Animal).await;
        let products = self.products.read().await;

        let mut matching: Vec<Product> = products
            .values()
            .filter(|product| {
                let animal = product
                    .animal_id
                    .and_then(|id| animals.get(&id))
                    .map(String::as_str);
                query.specification.matches(product, animal)
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| query.sort.compare(a, b));

        let total = matching.len() as u64;
        Ok(Page::new(query.page.slice(&matching), query.page, total))
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: Vec<Uuid>) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(ids.iter().filter_map(|id| products.get(id).cloned()).collect())
    }

    async fn insert(&self, product: Product) -> ProductResult<Product> {
        self.products
            .write()
            .await
            .insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        let slot = products
            .get_mut(&product.id)
            .ok_or(ProductError::NotFound(product.id))?;
        *slot = product.clone();
        Ok(product)
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        Ok(self.products.write().await.remove(&id).is_some())
    }

    async fn withdraw(&self, id: Uuid, quantity: i32) -> ProductResult<Option<Product>> {
        // Check and write under one lock
        let mut products = self.products.write().await;
        let Some(product) = products.get_mut(&id) else {
            return Ok(None);
        };

        if product.amount < quantity {
            return Err(ProductError::InsufficientStock {
                available: product.amount,
                requested: quantity,
            });
        }

        product.amount -= quantity;
        product.updated_at = chrono::Utc::now();
        Ok(Some(product.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{ProductFilterParams, SortDirection, SortField};
    use crate::models::{CreateProduct, Taxon};
    use crate::taxonomy::TaxonomyRepository;

    fn product(name: &str, price: f64, amount: i32, animal_id: Option<Uuid>) -> Product {
        Product::new(
            CreateProduct {
                name: name.into(),
                description: String::new(),
                comments: String::new(),
                price,
                amount,
                category_id: None,
                animal_id,
                image_name: None,
            },
            None,
        )
    }

    #[tokio::test]
    async fn test_find_page_paginates_in_requested_order() {
        let repository = InMemoryProductRepository::new();
        for (name, price) in [("a", 5.0), ("b", 1.0), ("c", 4.0), ("d", 2.0), ("e", 3.0)] {
            repository.insert(product(name, price, 1, None)).await.unwrap();
        }

        let query = ProductFilterParams {
            page_size: 2,
            sort_by: SortField::Price,
            sort_direction: SortDirection::Desc,
            ..Default::default()
        }
        .into_query();

        let page = repository.find_page(query).await.unwrap();
        let names: Vec<&str> = page.content.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
    }

    #[tokio::test]
    async fn test_search_text_matches_wildcards_literally() {
        let repository = InMemoryProductRepository::new();
        for name in ["50% off bowl", "500 off bowl", "cat_toy", "catnip"] {
            repository.insert(product(name, 1.0, 1, None)).await.unwrap();
        }

        for (text, expected) in [("50%", vec!["50% off bowl"]), ("_", vec!["cat_toy"])] {
            let query = ProductFilterParams {
                search_text: Some(text.into()),
                ..Default::default()
            }
            .into_query();
            let page = repository.find_page(query).await.unwrap();
            let names: Vec<&str> = page.content.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names, expected, "search: {text}");
        }
    }

    #[tokio::test]
    async fn test_animal_filter_resolves_names_through_taxonomy() {
        let taxonomy = InMemoryTaxonomyRepository::new();
        let cat = taxonomy
            .insert(TaxonomyKind::Animal, Taxon::new("cat"))
            .await
            .unwrap();
        let repository = InMemoryProductRepository::with_taxonomy(taxonomy);

        repository.insert(product("Scratcher", 9.0, 1, Some(cat.id))).await.unwrap();
        repository.insert(product("Leash", 9.0, 1, None)).await.unwrap();

        let query = ProductFilterParams {
            animal: Some("cat".into()),
            ..Default::default()
        }
        .into_query();
        let page = repository.find_page(query).await.unwrap();

        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].name, "Scratcher");
    }

    #[tokio::test]
    async fn test_withdraw_keeps_stock_on_rejection() {
        let repository = InMemoryProductRepository::new();
        let vase = repository.insert(product("Vase", 10.0, 5, None)).await.unwrap();

        let after = repository.withdraw(vase.id, 3).await.unwrap().unwrap();
        assert_eq!(after.amount, 2);

        let err = repository.withdraw(vase.id, 10).await.unwrap_err();
        assert!(matches!(
            err,
            ProductError::InsufficientStock {
                available: 2,
                requested: 10
            }
        ));
        assert_eq!(repository.get_by_id(vase.id).await.unwrap().unwrap().amount, 2);
        assert!(repository.withdraw(Uuid::now_v7(), 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_withdrawals_never_oversell() {
        let repository = InMemoryProductRepository::new();
        let item = repository.insert(product("Mug", 8.0, 10, None)).await.unwrap();

        let handles: Vec<_> = (0..25)
            .map(|_| {
                let repository = repository.clone();
                tokio::spawn(async move { repository.withdraw(item.id, 1).await })
            })
            .collect();

        let mut succeeded = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                succeeded += 1;
            }
        }

        assert_eq!(succeeded, 10);
        assert_eq!(repository.get_by_id(item.id).await.unwrap().unwrap().amount, 0);
    }

    #[tokio::test]
    async fn test_update_missing_product_fails() {
        let repository = InMemoryProductRepository::new();
        let ghost = product("Ghost", 1.0, 1, None);
        assert!(matches!(
            repository.update(ghost).await,
            Err(ProductError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_find_by_ids_skips_unknown() {
        let repository = InMemoryProductRepository::new();
        let known = repository.insert(product("Bowl", 3.0, 1, None)).await.unwrap();

        let found = repository
            .find_by_ids(vec![known.id, Uuid::now_v7()])
            .await
            .unwrap();
        assert_eq!(found, vec![known]);
    }
}
