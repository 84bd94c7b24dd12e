//! Products Domain
//!
//! The shop catalog: products filed under an animal and a category, with
//! stock that can be withdrawn but never driven below zero.
//!
//! ```text
//! handlers ─▶ ProductService ─▶ ProductRepository ─┬─ InMemoryProductRepository
//!                  │                 ▲             └─ PgProductRepository
//!                  ▼                 │
//!             FileService     ProductQuery (filter.rs)
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_files::{FileService, InMemoryFileStore};
//! use domain_products::{InMemoryProductRepository, ProductService, handlers};
//!
//! let files = FileService::new(InMemoryFileStore::new(), 10 * 1024 * 1024);
//! let service = ProductService::new(InMemoryProductRepository::new(), files);
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod taxonomy;

/// OpenAPI tag for product endpoints
pub const TAG: &str = "Products";
/// OpenAPI tag for animal and category endpoints
pub const TAXONOMY_TAG: &str = "Taxonomy";

pub use error::{ProductError, ProductResult, TaxonomyError, TaxonomyResult};
pub use filter::{
    ProductFilterParams, ProductPredicate, ProductQuery, ProductSort, ProductSpecification,
    SortDirection, SortField,
};
pub use handlers::{ApiDoc, TaxonomyApiDoc};
pub use models::{
    CreateProduct, CreateTaxon, Product, Taxon, TaxonomyKind, UpdateProduct, WithdrawStock,
};
pub use postgres::{PgProductRepository, PgTaxonomyRepository};
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
pub use taxonomy::{InMemoryTaxonomyRepository, TaxonomyRepository, TaxonomyService};
