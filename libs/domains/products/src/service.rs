//! Product Service - catalog rules on top of a [`ProductRepository`]

use axum_helpers::Page;
use domain_files::{FileService, FileStore};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::filter::ProductQuery;
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Catalog operations.
///
/// Image names are resolved to stored file ids through the shared
/// [`FileService`].
pub struct ProductService<R: ProductRepository, F: FileStore> {
    repository: Arc<R>,
    files: FileService<F>,
}

impl<R: ProductRepository, F: FileStore> Clone for ProductService<R, F> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            files: self.files.clone(),
        }
    }
}

impl<R: ProductRepository, F: FileStore> ProductService<R, F> {
    pub fn new(repository: R, files: FileService<F>) -> Self {
        Self {
            repository: Arc::new(repository),
            files,
        }
    }

    #[instrument(skip(self))]
    pub async fn find_all_with_filters(&self, query: ProductQuery) -> ProductResult<Page<Product>> {
        self.repository.find_page(query).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        self.repository.get_by_id(id).await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn save(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let image_id = match input.image_name.as_deref() {
            Some(name) => Some(self.resolve_image(name).await?),
            None => None,
        };

        let product = self
            .repository
            .insert(Product::new(input, image_id))
            .await?;

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    /// `Ok(None)` when there is no such product
    #[instrument(skip(self, update))]
    pub async fn edit_catalog(
        &self,
        id: Uuid,
        update: UpdateProduct,
    ) -> ProductResult<Option<Product>> {
        update
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let Some(mut product) = self.repository.get_by_id(id).await? else {
            return Ok(None);
        };

        if let Some(name) = update.image_name.as_deref() {
            product.image_id = Some(self.resolve_image(name).await?);
        }
        product.apply_update(update);

        let product = self.repository.update(product).await?;
        tracing::info!(product_id = %id, "Updated product");
        Ok(Some(product))
    }

    /// Absence is reported as `false`, not as an error
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: Uuid) -> ProductResult<bool> {
        let deleted = self.repository.delete(id).await?;
        if deleted {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(deleted)
    }

    /// Take `quantity` units out of stock, refusing to go below zero
    #[instrument(skip(self))]
    pub async fn withdraw_stock(&self, id: Uuid, quantity: i32) -> ProductResult<Option<Product>> {
        if quantity < 1 {
            return Err(ProductError::Validation(format!(
                "quantity must be at least 1, got {quantity}"
            )));
        }

        let product = self.repository.withdraw(id, quantity).await?;
        if let Some(product) = &product {
            tracing::info!(product_id = %id, quantity, remaining = product.amount, "Withdrew stock");
        }
        Ok(product)
    }

    async fn resolve_image(&self, name: &str) -> ProductResult<Uuid> {
        self.files
            .find_by_name(name)
            .await?
            .map(|file| file.id)
            .ok_or_else(|| ProductError::UnknownImage(name.to_string()))
    }
}
