use async_trait::async_trait;
use axum_helpers::Page;
use database::BaseRepository;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Select,
};
use uuid::Uuid;

use crate::entity;
use crate::error::{OrderError, OrderResult};
use crate::models::{Order, OrderFilter};
use crate::repository::OrderRepository;

/// Filtered and ordered select for one listing request
pub fn select_for(filter: &OrderFilter) -> Select<entity::Entity> {
    let mut condition = Condition::all();
    if let Some(user_id) = filter.user_id {
        condition = condition.add(entity::Column::UserId.eq(user_id));
    }
    if let Some(status) = &filter.status {
        condition = condition.add(entity::Column::OrderStatus.eq(status.clone()));
    }

    entity::Entity::find()
        .filter(condition)
        .order_by_desc(entity::Column::OrderDate)
        .order_by_desc(entity::Column::Id)
}

pub struct PgOrderRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn insert(&self, order: Order) -> OrderResult<Order> {
        let model = self.base.insert(order.into()).await?;
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<Order>> {
        Ok(self.base.find_by_id(id).await?.map(Into::into))
    }

    async fn list(&self, filter: OrderFilter) -> OrderResult<Page<Order>> {
        let page = filter.page();
        let paginator = select_for(&filter).paginate(self.base.db(), page.page_size);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page_number).await?;

        Ok(Page::new(
            models.into_iter().map(Into::into).collect(),
            page,
            total,
        ))
    }

    async fn update(&self, order: Order) -> OrderResult<Order> {
        let id = order.id;
        match self.base.update(order.into()).await {
            Ok(model) => Ok(model.into()),
            Err(DbErr::RecordNotUpdated) => Err(OrderError::NotFound(id)),
            Err(err) => Err(err.into()),
        }
    }

    async fn delete(&self, id: Uuid) -> OrderResult<bool> {
        Ok(self.base.delete_by_id(id).await? > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn test_select_without_filters() {
        let sql = select_for(&OrderFilter::default())
            .build(DbBackend::Postgres)
            .to_string();
        assert!(!sql.contains(r#""orders"."user_id" ="#), "{sql}");
        assert!(!sql.contains(r#""orders"."order_status" ="#), "{sql}");
        assert!(sql.contains(r#"ORDER BY "orders"."order_date" DESC, "orders"."id" DESC"#));
    }

    #[test]
    fn test_select_with_user_and_status() {
        let filter = OrderFilter {
            user_id: Some(42),
            status: Some("paid".into()),
            ..Default::default()
        };
        let sql = select_for(&filter).build(DbBackend::Postgres).to_string();
        assert!(sql.contains(r#""orders"."user_id" = 42"#));
        assert!(sql.contains(r#""orders"."order_status" = 'paid'"#));
    }
}
