use axum_helpers::pagination::{DEFAULT_PAGE_SIZE, PageParams, check_page_window};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

pub const DEFAULT_ORDER_STATUS: &str = "new";

/// A customer order.
///
/// Customer and product details are copied in as text when the order is
/// placed; nothing here references the user or product tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user_id: i64,
    /// Customer full name
    pub user_fio: String,
    pub user_phone_number: String,
    pub user_address: String,
    /// Human readable summary of the ordered items
    pub products_info: String,
    pub final_price: f64,
    pub order_status: String,
    pub order_type: String,
    pub order_date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}

impl Order {
    pub fn new(input: CreateOrder) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user_id: input.user_id,
            user_fio: input.user_fio,
            user_phone_number: input.user_phone_number,
            user_address: input.user_address,
            products_info: input.products_info,
            final_price: input.final_price,
            order_status: input
                .order_status
                .unwrap_or_else(|| DEFAULT_ORDER_STATUS.to_string()),
            order_type: input.order_type,
            order_date: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateOrder) {
        if let Some(status) = update.order_status {
            self.order_status = status;
        }
        if let Some(order_type) = update.order_type {
            self.order_type = order_type;
        }
        if let Some(fio) = update.user_fio {
            self.user_fio = fio;
        }
        if let Some(phone) = update.user_phone_number {
            self.user_phone_number = phone;
        }
        if let Some(address) = update.user_address {
            self.user_address = address;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrder {
    pub user_id: i64,
    #[validate(length(max = 200), custom(function = "not_blank"))]
    pub user_fio: String,
    #[validate(length(max = 32), custom(function = "not_blank"))]
    pub user_phone_number: String,
    #[validate(length(max = 500), custom(function = "not_blank"))]
    pub user_address: String,
    #[serde(default)]
    pub products_info: String,
    #[validate(range(min = 0.0))]
    pub final_price: f64,
    /// Defaults to `new`
    #[validate(length(min = 1, max = 50))]
    pub order_status: Option<String>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub order_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateOrder {
    #[validate(length(min = 1, max = 50))]
    pub order_status: Option<String>,
    #[validate(length(max = 50))]
    pub order_type: Option<String>,
    #[validate(length(max = 200), custom(function = "not_blank"))]
    pub user_fio: Option<String>,
    #[validate(length(max = 32), custom(function = "not_blank"))]
    pub user_phone_number: Option<String>,
    #[validate(length(max = 500), custom(function = "not_blank"))]
    pub user_address: Option<String>,
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// `GET /orders` query string
#[derive(Debug, Clone, Serialize, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
#[validate(schema(function = "validate_page_window"))]
pub struct OrderFilter {
    pub user_id: Option<i64>,
    /// Exact status, e.g. `new`
    pub status: Option<String>,
    #[serde(default)]
    pub page_number: u64,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub page_size: u64,
}

impl Default for OrderFilter {
    fn default() -> Self {
        Self {
            user_id: None,
            status: None,
            page_number: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn validate_page_window(filter: &OrderFilter) -> Result<(), validator::ValidationError> {
    check_page_window(filter.page_number, filter.page_size)
}

impl OrderFilter {
    pub fn page(&self) -> PageParams {
        PageParams::new(self.page_number, self.page_size)
    }

    pub fn matches(&self, order: &Order) -> bool {
        self.user_id.is_none_or(|user_id| order.user_id == user_id)
            && self
                .status
                .as_deref()
                .is_none_or(|status| order.order_status == status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> CreateOrder {
        CreateOrder {
            user_id: 7,
            user_fio: "Ivan Petrov".into(),
            user_phone_number: "+7 900 000 00 00".into(),
            user_address: "Lenina 1".into(),
            products_info: "Vase x1".into(),
            final_price: 10.0,
            order_status: None,
            order_type: "delivery".into(),
        }
    }

    #[test]
    fn test_new_order_defaults_status() {
        let order = Order::new(input());
        assert_eq!(order.order_status, DEFAULT_ORDER_STATUS);
        assert_eq!(order.order_date, order.updated_at);
    }

    #[test]
    fn test_create_validation() {
        assert!(input().validate().is_ok());
        assert!(CreateOrder { user_fio: "  ".into(), ..input() }.validate().is_err());
        assert!(CreateOrder { user_address: String::new(), ..input() }.validate().is_err());
        assert!(CreateOrder { final_price: -0.01, ..input() }.validate().is_err());
        assert!(CreateOrder { order_status: Some(String::new()), ..input() }.validate().is_err());
    }

    #[test]
    fn test_filter_rejects_unreachable_pages() {
        let filter = OrderFilter {
            page_number: u64::MAX,
            ..Default::default()
        };
        assert!(filter.validate().is_err());
        assert!(OrderFilter::default().validate().is_ok());
    }

    #[test]
    fn test_filter_matches() {
        let order = Order::new(input());
        assert!(OrderFilter::default().matches(&order));
        assert!(OrderFilter { user_id: Some(7), status: Some("new".into()), ..Default::default() }.matches(&order));
        assert!(!OrderFilter { user_id: Some(8), ..Default::default() }.matches(&order));
        assert!(!OrderFilter { status: Some("paid".into()), ..Default::default() }.matches(&order));
    }

    #[test]
    fn test_apply_update() {
        let mut order = Order::new(input());
        order.apply_update(UpdateOrder {
            order_status: Some("paid".into()),
            user_address: Some("Mira 5".into()),
            ..Default::default()
        });
        assert_eq!(order.order_status, "paid");
        assert_eq!(order.user_address, "Mira 5");
        assert_eq!(order.user_fio, "Ivan Petrov");
    }
}
