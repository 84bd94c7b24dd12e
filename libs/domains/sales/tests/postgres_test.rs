//! PostgreSQL repository tests against a throwaway container.

use chrono::NaiveDate;
use domain_products::{CreateProduct, PgProductRepository, Product, ProductRepository};
use domain_sales::*;
use test_utils::{TestDataBuilder, TestDatabase};
use uuid::Uuid;

fn product(name: String) -> Product {
    Product::new(
        CreateProduct {
            name,
            description: String::new(),
            comments: String::new(),
            price: 10.0,
            amount: 1,
            category_id: None,
            animal_id: None,
            image_name: None,
        },
        None,
    )
}

fn sale(name: String, products: Vec<Uuid>) -> Sale {
    Sale::new(
        CreateSale {
            name,
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            expiration_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            discount: 15.0,
            products,
        },
        None,
    )
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_sale_links_follow_updates_and_deletes() {
    let db = TestDatabase::new().await;
    let data = TestDataBuilder::from_test_name("sales_postgres");
    let products = PgProductRepository::new(db.connection());
    let sales = PgSaleRepository::new(db.connection());

    let bowl = products.insert(product(data.name("product", "bowl"))).await.unwrap();
    let leash = products.insert(product(data.name("product", "leash"))).await.unwrap();

    let created = sales
        .insert(sale(data.name("sale", "spring"), vec![bowl.id, leash.id]))
        .await
        .unwrap();

    let mut expected = vec![bowl.id, leash.id];
    expected.sort();
    let fetched = sales.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.products, expected);
    assert_eq!(fetched.date, created.date);

    let by_name = sales.find_by_name(created.name.clone()).await.unwrap().unwrap();
    assert_eq!(by_name.id, created.id);

    let mut changed = fetched.clone();
    changed.products = vec![leash.id];
    changed.discount = 40.0;
    sales.update(changed).await.unwrap();
    let fetched = sales.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.products, vec![leash.id]);
    assert_eq!(fetched.discount, 40.0);

    // Deleting a product drops its link through the foreign key
    assert!(products.delete(leash.id).await.unwrap());
    let fetched = sales.get_by_id(created.id).await.unwrap().unwrap();
    assert!(fetched.products.is_empty());

    assert!(matches!(
        sales.update(sale("ghost".into(), vec![])).await,
        Err(SaleError::NotFound(_))
    ));

    assert!(sales.delete(created.id).await.unwrap());
    assert!(!sales.delete(created.id).await.unwrap());
    assert!(sales.get_by_id(created.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_list_pages_newest_first() {
    let db = TestDatabase::new().await;
    let data = TestDataBuilder::from_test_name("sales_list_postgres");
    let sales = PgSaleRepository::new(db.connection());

    let mut ids = Vec::new();
    for suffix in ["a", "b", "c"] {
        let created = sales
            .insert(sale(data.name("sale", suffix), vec![]))
            .await
            .unwrap();
        ids.push(created.id);
    }

    let page = sales
        .list(axum_helpers::PageParams::new(0, 2))
        .await
        .unwrap();
    assert_eq!(page.total_elements, 3);
    let listed: Vec<Uuid> = page.content.iter().map(|s| s.id).collect();
    assert_eq!(listed, vec![ids[2], ids[1]]);
}
