use axum_helpers::{Page, PageParams};
use chrono::NaiveDate;
use domain_files::{FileService, FileStore, NewFile};
use domain_products::ProductRepository;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{SaleError, SaleResult};
use crate::models::{CreateSale, Sale, SalePrice, SalePrices, UpdateSale};
use crate::repository::SaleRepository;

/// Sales over the product catalog.
///
/// Products are read through their repository to validate ids and price
/// sales; banner images go through the shared [`FileService`].
pub struct SaleService<R: SaleRepository, P: ProductRepository, F: FileStore> {
    sales: Arc<R>,
    products: Arc<P>,
    files: FileService<F>,
}

impl<R: SaleRepository, P: ProductRepository, F: FileStore> Clone for SaleService<R, P, F> {
    fn clone(&self) -> Self {
        Self {
            sales: Arc::clone(&self.sales),
            products: Arc::clone(&self.products),
            files: self.files.clone(),
        }
    }
}

/// Keep the first occurrence of every id
fn dedup(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

impl<R: SaleRepository, P: ProductRepository, F: FileStore> SaleService<R, P, F> {
    pub fn new(sales: R, products: P, files: FileService<F>) -> Self {
        Self {
            sales: Arc::new(sales),
            products: Arc::new(products),
            files,
        }
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: Uuid) -> SaleResult<Option<Sale>> {
        self.sales.get_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_name(&self, name: &str) -> SaleResult<Option<Sale>> {
        self.sales.find_by_name(name.to_string()).await
    }

    #[instrument(skip(self))]
    pub async fn list(&self, page: PageParams) -> SaleResult<Page<Sale>> {
        self.sales.list(page).await
    }

    #[instrument(skip(self, input, image), fields(name = %input.name))]
    pub async fn create(&self, mut input: CreateSale, image: NewFile) -> SaleResult<Sale> {
        input
            .validate()
            .map_err(|e| SaleError::Validation(e.to_string()))?;
        input.products = dedup(input.products);
        self.ensure_products_exist(&input.products).await?;

        // Upload last; a failed insert takes the upload with it
        let image = self.files.upload(image).await?;
        let sale = match self.sales.insert(Sale::new(input, Some(image.id))).await {
            Ok(sale) => sale,
            Err(e) => {
                self.files.discard(image.id).await;
                return Err(e);
            }
        };

        tracing::info!(sale_id = %sale.id, "Created sale");
        Ok(sale)
    }

    /// `Ok(None)` when there is no such sale. Without a new image the old one
    /// stays; without a product list the old links stay.
    #[instrument(skip(self, update, image))]
    pub async fn modify(
        &self,
        id: Uuid,
        mut update: UpdateSale,
        image: Option<NewFile>,
    ) -> SaleResult<Option<Sale>> {
        update
            .validate()
            .map_err(|e| SaleError::Validation(e.to_string()))?;

        let Some(mut sale) = self.sales.get_by_id(id).await? else {
            return Ok(None);
        };

        if let Some(products) = update.products.take() {
            let products = dedup(products);
            self.ensure_products_exist(&products).await?;
            update.products = Some(products);
        }
        sale.apply_update(update);

        // Each bound may have come from a different source
        if sale.date > sale.expiration_date {
            return Err(SaleError::Validation(
                "date must not be after expiration_date".to_string(),
            ));
        }

        let uploaded = match image {
            Some(image) => Some(self.files.upload(image).await?.id),
            None => None,
        };
        if let Some(id) = uploaded {
            sale.image_id = Some(id);
        }

        let sale = match self.sales.update(sale).await {
            Ok(sale) => sale,
            Err(e) => {
                if let Some(id) = uploaded {
                    self.files.discard(id).await;
                }
                return Err(e);
            }
        };
        tracing::info!(sale_id = %id, "Modified sale");
        Ok(Some(sale))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> SaleResult<bool> {
        let deleted = self.sales.delete(id).await?;
        if deleted {
            tracing::info!(sale_id = %id, "Deleted sale");
        }
        Ok(deleted)
    }

    /// Discounted prices of the sale's products as of `day`.
    ///
    /// Products deleted since the sale was set up are left out.
    #[instrument(skip(self))]
    pub async fn prices(&self, id: Uuid, day: NaiveDate) -> SaleResult<Option<SalePrices>> {
        let Some(sale) = self.sales.get_by_id(id).await? else {
            return Ok(None);
        };

        let by_id: HashMap<Uuid, _> = self
            .products
            .find_by_ids(sale.products.clone())
            .await?
            .into_iter()
            .map(|product| (product.id, product))
            .collect();

        let products = sale
            .products
            .iter()
            .filter_map(|id| by_id.get(id))
            .map(|product| SalePrice {
                product_id: product.id,
                name: product.name.clone(),
                price: product.price,
                discounted_price: sale.discounted(product.price),
            })
            .collect();

        Ok(Some(SalePrices {
            sale_id: sale.id,
            discount: sale.discount,
            day,
            active: sale.is_active_on(day),
            products,
        }))
    }

    async fn ensure_products_exist(&self, ids: &[Uuid]) -> SaleResult<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let found: HashSet<Uuid> = self
            .products
            .find_by_ids(ids.to_vec())
            .await?
            .into_iter()
            .map(|product| product.id)
            .collect();

        let unknown: Vec<Uuid> = ids.iter().copied().filter(|id| !found.contains(id)).collect();
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(SaleError::UnknownProducts(unknown))
        }
    }
}
