//! PostgreSQL repositories for products and the taxonomy tables.

use async_trait::async_trait;
use axum_helpers::Page;
use chrono::Utc;
use database::BaseRepository;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
    SqlErr, TransactionTrait,
    sea_query::{LikeExpr, Order, Query},
};
use uuid::Uuid;

use crate::entity::{animal, category, product};
use crate::error::{ProductError, ProductResult, TaxonomyError, TaxonomyResult};
use crate::filter::{ProductPredicate, ProductQuery, ProductSpecification, SortDirection, SortField};
use crate::models::{Product, Taxon, TaxonomyKind};
use crate::repository::ProductRepository;
use crate::taxonomy::TaxonomyRepository;

const LIKE_ESCAPE: char = '\\';

/// `%text%` with the LIKE metacharacters in `text` matched literally
fn substring_pattern(text: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    LikeExpr::new(pattern).escape(LIKE_ESCAPE)
}

/// All predicates joined with AND
pub fn to_condition(specification: &ProductSpecification) -> Condition {
    specification
        .predicates()
        .iter()
        .fold(Condition::all(), |condition, predicate| match predicate {
            ProductPredicate::AnimalNamed(name) => condition.add(
                product::Column::AnimalId.in_subquery(
                    Query::select()
                        .column(animal::Column::Id)
                        .from(animal::Entity)
                        .and_where(animal::Column::Name.eq(name.as_str()))
                        .to_owned(),
                ),
            ),
            ProductPredicate::CategoryIn(ids) => {
                condition.add(product::Column::CategoryId.is_in(ids.iter().copied()))
            }
            ProductPredicate::PriceAtLeast(from) => condition.add(product::Column::Price.gte(*from)),
            ProductPredicate::PriceAtMost(to) => condition.add(product::Column::Price.lte(*to)),
            ProductPredicate::NameContains(text) => {
                condition.add(product::Column::Name.like(substring_pattern(text)))
            }
        })
}

fn sort_column(field: SortField) -> product::Column {
    match field {
        SortField::Name => product::Column::Name,
        SortField::Price => product::Column::Price,
        SortField::Amount => product::Column::Amount,
        SortField::Rating => product::Column::Rating,
        SortField::CreatedAt => product::Column::CreatedAt,
    }
}

/// Filtered and ordered select; pagination is applied by the caller
pub fn select_for(query: &ProductQuery) -> Select<product::Entity> {
    let order = match query.sort.direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    };

    product::Entity::find()
        .filter(to_condition(&query.specification))
        .order_by(sort_column(query.sort.field), order)
        .order_by_asc(product::Column::Id)
}

pub struct PgProductRepository {
    base: BaseRepository<product::Entity>,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_page(&self, query: ProductQuery) -> ProductResult<Page<Product>> {
        let paginator = select_for(&query).paginate(self.base.db(), query.page.page_size);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(query.page.page_number).await?;

        Ok(Page::new(
            rows.into_iter().map(Into::into).collect(),
            query.page,
            total,
        ))
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        Ok(self.base.find_by_id(id).await?.map(Into::into))
    }

    async fn find_by_ids(&self, ids: Vec<Uuid>) -> ProductResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = product::Entity::find()
            .filter(product::Column::Id.is_in(ids))
            .all(self.base.db())
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, product: Product) -> ProductResult<Product> {
        Ok(self.base.insert(product.into()).await?.into())
    }

    async fn update(&self, product: Product) -> ProductResult<Product> {
        let id = product.id;
        match self.base.update(product.into()).await {
            Ok(model) => Ok(model.into()),
            Err(DbErr::RecordNotUpdated) => Err(ProductError::NotFound(id)),
            Err(err) => Err(err.into()),
        }
    }

    /// `sale_products` rows go with the product through `ON DELETE CASCADE`
    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        Ok(self.base.delete_by_id(id).await? > 0)
    }

    async fn withdraw(&self, id: Uuid, quantity: i32) -> ProductResult<Option<Product>> {
        let txn = self.base.db().begin().await?;

        // SELECT ... FOR UPDATE; the transaction rolls back on early return
        let Some(model) = product::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
        else {
            return Ok(None);
        };

        let available = model.amount;
        if available < quantity {
            return Err(ProductError::InsufficientStock {
                available,
                requested: quantity,
            });
        }

        let mut active = model.into_active_model();
        active.amount = Set(available - quantity);
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(&txn).await?;
        txn.commit().await?;

        Ok(Some(updated.into()))
    }
}

pub struct PgTaxonomyRepository {
    db: DatabaseConnection,
}

impl PgTaxonomyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn insert_error(kind: TaxonomyKind, name: String, err: DbErr) -> TaxonomyError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => TaxonomyError::Duplicate { kind, name },
        _ => err.into(),
    }
}

#[async_trait]
impl TaxonomyRepository for PgTaxonomyRepository {
    async fn list(&self, kind: TaxonomyKind) -> TaxonomyResult<Vec<Taxon>> {
        let taxa: Vec<Taxon> = match kind {
            TaxonomyKind::Animal => animal::Entity::find()
                .order_by_asc(animal::Column::Name)
                .all(&self.db)
                .await?
                .into_iter()
                .map(Into::into)
                .collect(),
            TaxonomyKind::Category => category::Entity::find()
                .order_by_asc(category::Column::Name)
                .all(&self.db)
                .await?
                .into_iter()
                .map(Into::into)
                .collect(),
        };
        Ok(taxa)
    }

    async fn get(&self, kind: TaxonomyKind, id: Uuid) -> TaxonomyResult<Option<Taxon>> {
        let taxon: Option<Taxon> = match kind {
            TaxonomyKind::Animal => animal::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(Into::into),
            TaxonomyKind::Category => category::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(Into::into),
        };
        Ok(taxon)
    }

    async fn find_by_name(&self, kind: TaxonomyKind, name: String) -> TaxonomyResult<Option<Taxon>> {
        let taxon: Option<Taxon> = match kind {
            TaxonomyKind::Animal => animal::Entity::find()
                .filter(animal::Column::Name.eq(name))
                .one(&self.db)
                .await?
                .map(Into::into),
            TaxonomyKind::Category => category::Entity::find()
                .filter(category::Column::Name.eq(name))
                .one(&self.db)
                .await?
                .map(Into::into),
        };
        Ok(taxon)
    }

    async fn insert(&self, kind: TaxonomyKind, taxon: Taxon) -> TaxonomyResult<Taxon> {
        let name = taxon.name.clone();
        let inserted: Result<Taxon, DbErr> = match kind {
            TaxonomyKind::Animal => animal::ActiveModel::from(taxon)
                .insert(&self.db)
                .await
                .map(Into::into),
            TaxonomyKind::Category => category::ActiveModel::from(taxon)
                .insert(&self.db)
                .await
                .map(Into::into),
        };
        inserted.map_err(|err| insert_error(kind, name, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::ProductFilterParams;
    use sea_orm::{DbBackend, QueryTrait};

    fn sql(params: ProductFilterParams) -> String {
        select_for(&params.into_query())
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn test_no_criteria_adds_no_predicate() {
        let sql = sql(ProductFilterParams::default());
        for column in ["animal_id", "category_id", "price", "name"] {
            assert!(!sql.contains(&format!(r#"WHERE "products"."{column}""#)), "{sql}");
        }
        assert!(!sql.contains("LIKE"));
        assert!(!sql.contains(" IN ("));
        assert!(sql.contains(r#"ORDER BY "products"."created_at" ASC, "products"."id" ASC"#));
    }

    #[test]
    fn test_every_predicate_is_anded() {
        let sql = sql(ProductFilterParams {
            animal: Some("cat".into()),
            categories: vec![Uuid::nil()],
            price_from: Some(5.0),
            price_to: Some(20.0),
            search_text: Some("bowl".into()),
            sort_by: SortField::Price,
            sort_direction: SortDirection::Desc,
            ..Default::default()
        });

        assert!(sql.contains(r#""products"."animal_id" IN (SELECT"#));
        assert!(sql.contains("'cat'"));
        assert!(sql.contains(r#""products"."category_id" IN ("#));
        assert!(sql.contains(r#""products"."price" >="#));
        assert!(sql.contains(r#""products"."price" <="#));
        assert!(sql.contains(r#""products"."name" LIKE '%bowl%'"#));
        assert_eq!(sql.matches(" AND ").count(), 4);
        assert!(sql.contains(r#"ORDER BY "products"."price" DESC"#));
    }

    #[test]
    fn test_search_text_wildcards_are_escaped() {
        let sql = sql(ProductFilterParams {
            search_text: Some(r"50%_off\".into()),
            ..Default::default()
        });

        assert!(
            sql.contains(r#""products"."name" LIKE E'%50\\%\\_off\\\\%' ESCAPE"#),
            "{sql}"
        );
    }

    #[test]
    fn test_sort_columns_cover_every_field() {
        for (field, column) in [
            (SortField::Name, "name"),
            (SortField::Amount, "amount"),
            (SortField::Rating, "rating"),
        ] {
            let sql = sql(ProductFilterParams {
                sort_by: field,
                ..Default::default()
            });
            assert!(sql.contains(&format!(r#"ORDER BY "products"."{column}" ASC"#)));
        }
    }
}
