//! Route composition. Every sub-router carries its own state; the `/api`
//! prefix is added by `axum_helpers::create_router`.

pub mod health;

use axum::{Router, routing::get};
use domain_files::{FileService, PgFileStore};
use domain_orders::{OrderService, PgOrderRepository};
use domain_products::{PgProductRepository, PgTaxonomyRepository, ProductService, TaxonomyService};
use domain_sales::{PgSaleRepository, SaleService};

use crate::state::AppState;

pub fn routes(state: &AppState) -> Router {
    let db = &state.db;
    let files = FileService::new(
        PgFileStore::new(db.clone()),
        state.config.server.max_upload_bytes,
    );

    let products = ProductService::new(PgProductRepository::new(db.clone()), files.clone());
    let sales = SaleService::new(
        PgSaleRepository::new(db.clone()),
        PgProductRepository::new(db.clone()),
        files.clone(),
    );
    let orders = OrderService::new(PgOrderRepository::new(db.clone()));

    Router::new()
        .nest("/products", domain_products::handlers::router(products))
        .nest(
            "/animals",
            domain_products::handlers::animals_router(TaxonomyService::new(
                PgTaxonomyRepository::new(db.clone()),
            )),
        )
        .nest(
            "/categories",
            domain_products::handlers::categories_router(TaxonomyService::new(
                PgTaxonomyRepository::new(db.clone()),
            )),
        )
        .nest("/sale", domain_sales::handlers::router(sales))
        .nest("/orders", domain_orders::handlers::router(orders))
        .nest("/files", domain_files::handlers::router(files))
}

/// `/ready` with a real database ping; merged next to `/health`
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
