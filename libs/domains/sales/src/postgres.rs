use async_trait::async_trait;
use axum_helpers::{Page, PageParams};
use database::BaseRepository;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::entity::{sale, sale_product};
use crate::error::{SaleError, SaleResult};
use crate::models::Sale;
use crate::repository::SaleRepository;

/// `sales` plus the `sale_products` join table
pub struct PgSaleRepository {
    base: BaseRepository<sale::Entity>,
}

impl PgSaleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Product ids per sale for a batch of sales
    async fn products_of(&self, sale_ids: Vec<Uuid>) -> Result<HashMap<Uuid, Vec<Uuid>>, DbErr> {
        let mut products: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        if sale_ids.is_empty() {
            return Ok(products);
        }

        let rows = sale_product::Entity::find()
            .filter(sale_product::Column::SaleId.is_in(sale_ids))
            .order_by_asc(sale_product::Column::ProductId)
            .all(self.base.db())
            .await?;

        for row in rows {
            products.entry(row.sale_id).or_default().push(row.product_id);
        }
        Ok(products)
    }

    async fn with_products(&self, model: Option<sale::Model>) -> SaleResult<Option<Sale>> {
        let Some(model) = model else {
            return Ok(None);
        };
        let mut products = self.products_of(vec![model.id]).await?;
        let ids = products.remove(&model.id).unwrap_or_default();
        Ok(Some(model.into_sale(ids)))
    }
}

#[async_trait]
impl SaleRepository for PgSaleRepository {
    async fn insert(&self, sale: Sale) -> SaleResult<Sale> {
        let txn = self.base.db().begin().await?;

        sale::Entity::insert(sale::ActiveModel::from(&sale))
            .exec(&txn)
            .await?;
        if !sale.products.is_empty() {
            sale_product::Entity::insert_many(sale_product::rows(sale.id, &sale.products))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;
        tracing::info!(sale_id = %sale.id, products = sale.products.len(), "Stored sale");
        Ok(sale)
    }

    async fn get_by_id(&self, id: Uuid) -> SaleResult<Option<Sale>> {
        let model = self.base.find_by_id(id).await?;
        self.with_products(model).await
    }

    async fn find_by_name(&self, name: String) -> SaleResult<Option<Sale>> {
        let model = sale::Entity::find()
            .filter(sale::Column::Name.eq(name))
            .order_by_desc(sale::Column::CreatedAt)
            .order_by_desc(sale::Column::Id)
            .one(self.base.db())
            .await?;
        self.with_products(model).await
    }

    async fn list(&self, page: PageParams) -> SaleResult<Page<Sale>> {
        let paginator = sale::Entity::find()
            .order_by_desc(sale::Column::CreatedAt)
            .order_by_desc(sale::Column::Id)
            .paginate(self.base.db(), page.page_size);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page_number).await?;

        let mut products = self
            .products_of(models.iter().map(|model| model.id).collect())
            .await?;
        let sales = models
            .into_iter()
            .map(|model| {
                let ids = products.remove(&model.id).unwrap_or_default();
                model.into_sale(ids)
            })
            .collect();

        Ok(Page::new(sales, page, total))
    }

    async fn update(&self, sale: Sale) -> SaleResult<Sale> {
        let txn = self.base.db().begin().await?;

        match sale::Entity::update(sale::ActiveModel::from(&sale))
            .exec(&txn)
            .await
        {
            Ok(_) => {}
            Err(DbErr::RecordNotUpdated) => return Err(SaleError::NotFound(sale.id)),
            Err(err) => return Err(err.into()),
        }

        sale_product::Entity::delete_many()
            .filter(sale_product::Column::SaleId.eq(sale.id))
            .exec(&txn)
            .await?;
        if !sale.products.is_empty() {
            sale_product::Entity::insert_many(sale_product::rows(sale.id, &sale.products))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(sale)
    }

    /// Product links are removed by `ON DELETE CASCADE`
    async fn delete(&self, id: Uuid) -> SaleResult<bool> {
        Ok(self.base.delete_by_id(id).await? > 0)
    }
}
