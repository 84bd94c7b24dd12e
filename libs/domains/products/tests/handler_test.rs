//! Handler tests for the products domain, driven through the routers with
//! in-memory repositories.

use axum::Router;
use axum::http::StatusCode;
use axum_helpers::{ErrorResponse, Page};
use domain_files::{FileService, InMemoryFileStore, NewFile};
use domain_products::*;
use serde_json::json;
use test_utils::http::{empty_request, json_body, json_request};
use tower::ServiceExt;

struct Shop {
    products: Router,
    animals: Router,
    categories: Router,
    files: FileService<InMemoryFileStore>,
}

fn shop() -> Shop {
    let files = FileService::new(InMemoryFileStore::new(), 1024);
    let taxonomy = InMemoryTaxonomyRepository::new();
    let repository = InMemoryProductRepository::with_taxonomy(taxonomy.clone());

    Shop {
        products: handlers::router(ProductService::new(repository, files.clone())),
        animals: handlers::animals_router(TaxonomyService::new(taxonomy.clone())),
        categories: handlers::categories_router(TaxonomyService::new(taxonomy)),
        files,
    }
}

async fn create(app: &Router, body: serde_json::Value) -> Product {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

async fn list(app: &Router, query: &str) -> Page<Product> {
    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/?{query}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await
}

#[tokio::test]
async fn test_create_then_get() {
    let shop = shop();
    let created = create(&shop.products, json!({ "name": "Vase", "price": 10.0, "amount": 5 })).await;
    assert_eq!(created.rating, 0.0);

    let response = shop
        .products
        .oneshot(empty_request("GET", &format!("/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Product = json_body(response).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_with_image_name() {
    let shop = shop();
    let image = shop
        .files
        .upload(NewFile::new("bowl.png", "image/png", vec![1, 2]))
        .await
        .unwrap();

    let created = create(
        &shop.products,
        json!({ "name": "Bowl", "price": 4.5, "image_name": "bowl.png" }),
    )
    .await;
    assert_eq!(created.image_id, Some(image.id));
}

#[tokio::test]
async fn test_create_with_unknown_image_is_422() {
    let shop = shop();
    let response = shop
        .products
        .oneshot(json_request(
            "POST",
            "/",
            &json!({ "name": "Bowl", "price": 4.5, "image_name": "nope.png" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_invalid_body_is_400() {
    let shop = shop();
    let response = shop
        .products
        .oneshot(json_request("POST", "/", &json!({ "name": "", "price": -2.0 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = json_body(response).await;
    assert_eq!(error.error, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_unknown_and_malformed_ids() {
    let shop = shop();
    let response = shop
        .products
        .clone()
        .oneshot(empty_request("GET", &format!("/{}", uuid::Uuid::now_v7())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = shop
        .products
        .oneshot(empty_request("GET", "/not-a-uuid"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_filters_and_paginates() {
    let shop = shop();
    for (name, price) in [("Cat bowl", 4.0), ("Dog bowl", 12.0), ("Leash", 25.0), ("Bed", 40.0), ("Toy", 2.0)] {
        create(&shop.products, json!({ "name": name, "price": price })).await;
    }

    let page = list(&shop.products, "page_size=2&sort_by=price&sort_direction=asc").await;
    let names: Vec<&str> = page.content.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Toy", "Cat bowl"]);
    assert_eq!(page.total_elements, 5);
    assert_eq!(page.total_pages, 3);

    let page = list(&shop.products, "search_text=bowl&price_from=5&price_to=20").await;
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].name, "Dog bowl");
}

#[tokio::test]
async fn test_list_by_animal_and_categories() {
    let shop = shop();

    let response = shop
        .animals
        .clone()
        .oneshot(json_request("POST", "/", &json!({ "name": "cat" })))
        .await
        .unwrap();
    let cat: Taxon = json_body(response).await;

    let response = shop
        .categories
        .clone()
        .oneshot(json_request("POST", "/", &json!({ "name": "toys" })))
        .await
        .unwrap();
    let toys: Taxon = json_body(response).await;

    create(
        &shop.products,
        json!({ "name": "Mouse", "price": 3.0, "animal_id": cat.id, "category_id": toys.id }),
    )
    .await;
    create(&shop.products, json!({ "name": "Ball", "price": 3.0, "category_id": toys.id })).await;
    create(&shop.products, json!({ "name": "Brush", "price": 3.0 })).await;

    let page = list(&shop.products, "animal=cat").await;
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].name, "Mouse");

    let other = uuid::Uuid::now_v7();
    let page = list(&shop.products, &format!("categories={}&categories={other}", toys.id)).await;
    assert_eq!(page.total_elements, 2);

    let page = list(&shop.products, "").await;
    assert_eq!(page.total_elements, 3);
}

#[tokio::test]
async fn test_list_rejects_bad_queries() {
    let shop = shop();
    for query in ["sort_by=color", "page_size=0", "page_size=101", "price_from=9&price_to=1"] {
        let response = shop
            .products
            .clone()
            .oneshot(empty_request("GET", &format!("/?{query}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "query: {query}");
    }
}

#[tokio::test]
async fn test_list_rejects_pages_past_the_last_row_offset() {
    let shop = shop();
    for query in [
        "page_number=1152921504606846976&page_size=100",
        "page_number=18446744073709551615",
    ] {
        let response = shop
            .products
            .clone()
            .oneshot(empty_request("GET", &format!("/?{query}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "query: {query}");
    }

    let page = list(&shop.products, "page_number=92233720368547758&page_size=100").await;
    assert!(page.content.is_empty());
}

#[tokio::test]
async fn test_update_applies_partial_fields() {
    let shop = shop();
    let created = create(&shop.products, json!({ "name": "Vase", "price": 10.0, "amount": 5 })).await;

    let response = shop
        .products
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", created.id),
            &json!({ "price": 12.0, "description": "Blue glaze" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Product = json_body(response).await;
    assert_eq!(updated.price, 12.0);
    assert_eq!(updated.description, "Blue glaze");
    assert_eq!(updated.amount, 5);

    let response = shop
        .products
        .oneshot(json_request(
            "PUT",
            &format!("/{}", uuid::Uuid::now_v7()),
            &json!({ "price": 1.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_404() {
    let shop = shop();
    let created = create(&shop.products, json!({ "name": "Vase", "price": 10.0 })).await;
    let uri = format!("/{}", created.id);

    let response = shop
        .products
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = shop
        .products
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_withdraw_scenario() {
    let shop = shop();
    let vase = create(&shop.products, json!({ "name": "Vase", "price": 10.0, "amount": 5 })).await;
    let uri = format!("/{}/withdraw", vase.id);

    let response = shop
        .products
        .clone()
        .oneshot(json_request("POST", &uri, &json!({ "quantity": 3 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let after: Product = json_body(response).await;
    assert_eq!(after.amount, 2);

    let response = shop
        .products
        .clone()
        .oneshot(json_request("POST", &uri, &json!({ "quantity": 10 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = shop
        .products
        .clone()
        .oneshot(json_request("POST", &uri, &json!({ "quantity": 0 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = shop
        .products
        .oneshot(empty_request("GET", &format!("/{}", vase.id)))
        .await
        .unwrap();
    let current: Product = json_body(response).await;
    assert_eq!(current.amount, 2);
}

#[tokio::test]
async fn test_taxonomy_duplicate_and_lookup() {
    let shop = shop();
    let body = json!({ "name": "dog" });

    let response = shop
        .animals
        .clone()
        .oneshot(json_request("POST", "/", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let dog: Taxon = json_body(response).await;

    let response = shop
        .animals
        .clone()
        .oneshot(json_request("POST", "/", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = shop
        .animals
        .clone()
        .oneshot(empty_request("GET", &format!("/{}", dog.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Animals and categories do not share ids
    let response = shop
        .categories
        .clone()
        .oneshot(empty_request("GET", &format!("/{}", dog.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = shop.animals.oneshot(empty_request("GET", "/")).await.unwrap();
    let animals: Vec<Taxon> = json_body(response).await;
    assert_eq!(animals, vec![dog]);
}
