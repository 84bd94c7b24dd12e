//! # Axum Helpers
//!
//! Shared HTTP plumbing for the shop API.
//!
//! - **[`errors`]**: [`AppError`] and the JSON [`ErrorResponse`] with [`ErrorCode`]s
//! - **[`extractors`]**: [`UuidPath`], [`ValidatedJson`], [`ValidatedQuery`]
//! - **[`pagination`]**: [`PageParams`] and the [`Page`] envelope
//! - **[`server`]**: router assembly with OpenAPI UIs, health checks, graceful shutdown
//! - **[`http`]**: CORS and security headers

pub mod errors;
pub mod extractors;
pub mod http;
pub mod pagination;
pub mod server;

pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use extractors::{UuidPath, ValidatedJson, ValidatedQuery};
pub use http::{cors_layer_from_env, create_cors_layer, security_headers};
pub use pagination::{Page, PageParams, check_page_window};
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};
