use async_trait::async_trait;
use axum_helpers::Page;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};
use crate::models::{Order, OrderFilter};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn insert(&self, order: Order) -> OrderResult<Order>;

    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<Order>>;

    /// Newest `order_date` first
    async fn list(&self, filter: OrderFilter) -> OrderResult<Page<Order>>;

    async fn update(&self, order: Order) -> OrderResult<Order>;

    async fn delete(&self, id: Uuid) -> OrderResult<bool>;
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<Uuid, Order>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, order: Order) -> OrderResult<Order> {
        self.orders.write().await.insert(order.id, order.clone());
        Ok(order)
    }

    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<Order>> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn list(&self, filter: OrderFilter) -> OrderResult<Page<Order>> {
        let orders = self.orders.read().await;
        let mut matching: Vec<Order> = orders
            .values()
            .filter(|order| filter.matches(order))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.order_date.cmp(&a.order_date).then(b.id.cmp(&a.id)));

        let page = filter.page();
        let total = matching.len() as u64;
        Ok(Page::new(page.slice(&matching), page, total))
    }

    async fn update(&self, order: Order) -> OrderResult<Order> {
        let mut orders = self.orders.write().await;
        let slot = orders
            .get_mut(&order.id)
            .ok_or(OrderError::NotFound(order.id))?;
        *slot = order.clone();
        Ok(order)
    }

    async fn delete(&self, id: Uuid) -> OrderResult<bool> {
        Ok(self.orders.write().await.remove(&id).is_some())
    }
}
