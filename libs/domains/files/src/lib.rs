//! Files Domain
//!
//! Minimal image storage for the shop: upload bytes, look a file up by name,
//! serve it by id. Products and sales reference images by the stored id.
//!
//! ```rust,no_run
//! use domain_files::{FileService, InMemoryFileStore, handlers};
//!
//! let service = FileService::new(InMemoryFileStore::new(), 10 * 1024 * 1024);
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

/// OpenAPI tag for file endpoints
pub const TAG: &str = "Files";

pub use error::{FileError, FileResult};
pub use models::{FileContent, NewFile, StoredFile};
pub use postgres::PgFileStore;
pub use repository::{FileStore, InMemoryFileStore};
pub use service::FileService;
