//! Sales Domain
//!
//! Named, time-boxed discounts over catalog products. Sales are created and
//! modified through multipart forms carrying a banner image; the product
//! links live in the `sale_products` join table.
//!
//! ```rust,no_run
//! use domain_files::{FileService, InMemoryFileStore};
//! use domain_products::InMemoryProductRepository;
//! use domain_sales::{InMemorySaleRepository, SaleService, handlers};
//!
//! let files = FileService::new(InMemoryFileStore::new(), 10 * 1024 * 1024);
//! let products = InMemoryProductRepository::new();
//! let service = SaleService::new(
//!     InMemorySaleRepository::with_catalog(products.clone()),
//!     products,
//!     files,
//! );
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod form;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

/// OpenAPI tag for sale endpoints
pub const TAG: &str = "Sales";

pub use error::{SaleError, SaleResult};
pub use handlers::ApiDoc;
pub use models::{CreateSale, Sale, SalePrice, SalePrices, UpdateSale, discounted_price};
pub use postgres::PgSaleRepository;
pub use repository::{InMemorySaleRepository, SaleRepository};
pub use service::SaleService;
