use axum_helpers::Page;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{OrderError, OrderResult};
use crate::models::{CreateOrder, Order, OrderFilter, UpdateOrder};
use crate::repository::OrderRepository;

pub struct OrderService<R: OrderRepository> {
    repository: Arc<R>,
}

impl<R: OrderRepository> Clone for OrderService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(user_id = input.user_id))]
    pub async fn create_order(&self, input: CreateOrder) -> OrderResult<Order> {
        input
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;

        let order = self.repository.insert(Order::new(input)).await?;
        tracing::info!(order_id = %order.id, "Created order");
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: Uuid) -> OrderResult<Option<Order>> {
        self.repository.get_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn list_orders(&self, filter: OrderFilter) -> OrderResult<Page<Order>> {
        filter
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;
        self.repository.list(filter).await
    }

    /// `Ok(None)` when there is no such order
    #[instrument(skip(self, update))]
    pub async fn update_order(&self, id: Uuid, update: UpdateOrder) -> OrderResult<Option<Order>> {
        update
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;

        let Some(mut order) = self.repository.get_by_id(id).await? else {
            return Ok(None);
        };
        order.apply_update(update);

        let order = self.repository.update(order).await?;
        tracing::info!(order_id = %id, status = %order.order_status, "Updated order");
        Ok(Some(order))
    }

    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: Uuid) -> OrderResult<bool> {
        let deleted = self.repository.delete(id).await?;
        if deleted {
            tracing::info!(order_id = %id, "Deleted order");
        }
        Ok(deleted)
    }
}
