//! Combined OpenAPI document for every domain mounted under `/api`

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shop API",
        version = "0.1.0",
        description = "Pet shop backend: catalog, sales, orders and image storage",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/products", api = domain_products::ApiDoc),
        (path = "/api", api = domain_products::TaxonomyApiDoc),
        (path = "/api/sale", api = domain_sales::ApiDoc),
        (path = "/api/orders", api = domain_orders::ApiDoc),
        (path = "/api/files", api = domain_files::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_domain_is_documented() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/api/products",
            "/api/products/{id}/withdraw",
            "/api/animals",
            "/api/categories/{id}",
            "/api/sale/get/{id}",
            "/api/sale/get/name/{name}",
            "/api/sale/add",
            "/api/orders/{id}",
            "/api/files/name/{name}",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }
}
