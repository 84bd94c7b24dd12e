//! Orders Domain
//!
//! Customer orders with contact details and a free-text item summary
//! captured at checkout. Listing filters by user and status.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

/// OpenAPI tag for order endpoints
pub const TAG: &str = "Orders";

pub use error::{OrderError, OrderResult};
pub use handlers::ApiDoc;
pub use models::{CreateOrder, DEFAULT_ORDER_STATUS, Order, OrderFilter, UpdateOrder};
pub use postgres::PgOrderRepository;
pub use repository::{InMemoryOrderRepository, OrderRepository};
pub use service::OrderService;
