//! Product search criteria.
//!
//! A [`ProductSpecification`] is a conjunction of [`ProductPredicate`]s that
//! knows nothing about storage. The in-memory repository evaluates it with
//! [`ProductSpecification::matches`]; the PostgreSQL repository turns it into
//! a single `Condition::all()`.

use axum_helpers::pagination::{DEFAULT_PAGE_SIZE, PageParams, check_page_window};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::Product;

/// Columns a product list may be ordered by
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortField {
    Name,
    Price,
    Amount,
    Rating,
    #[default]
    CreatedAt,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProductSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl ProductSort {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Order two products; ties fall back to the id so pages are stable
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let by_field = match self.field {
            SortField::Name => a.name.cmp(&b.name),
            SortField::Price => a.price.total_cmp(&b.price),
            SortField::Amount => a.amount.cmp(&b.amount),
            SortField::Rating => a.rating.total_cmp(&b.rating),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        };

        let by_field = match self.direction {
            SortDirection::Asc => by_field,
            SortDirection::Desc => by_field.reverse(),
        };

        by_field.then_with(|| a.id.cmp(&b.id))
    }
}

/// One independent constraint on a product
#[derive(Debug, Clone, PartialEq)]
pub enum ProductPredicate {
    /// Exact match on the name of the product's animal
    AnimalNamed(String),
    /// Category is one of these
    CategoryIn(Vec<Uuid>),
    PriceAtLeast(f64),
    PriceAtMost(f64),
    /// Substring of the product name
    NameContains(String),
}

impl ProductPredicate {
    fn matches(&self, product: &Product, animal_name: Option<&str>) -> bool {
        match self {
            Self::AnimalNamed(name) => animal_name == Some(name.as_str()),
            Self::CategoryIn(ids) => product
                .category_id
                .is_some_and(|category| ids.contains(&category)),
            Self::PriceAtLeast(from) => product.price >= *from,
            Self::PriceAtMost(to) => product.price <= *to,
            Self::NameContains(text) => product.name.contains(text.as_str()),
        }
    }
}

/// All predicates must hold; an empty specification matches everything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductSpecification {
    predicates: Vec<ProductPredicate>,
}

impl ProductSpecification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, predicate: ProductPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn predicates(&self) -> &[ProductPredicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// `animal_name` is the name of the product's animal, if it has one
    pub fn matches(&self, product: &Product, animal_name: Option<&str>) -> bool {
        self.predicates
            .iter()
            .all(|predicate| predicate.matches(product, animal_name))
    }
}

/// Everything a repository needs to produce one page of products
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub specification: ProductSpecification,
    pub page: PageParams,
    pub sort: ProductSort,
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// `GET /products` query string
///
/// `categories` may be repeated: `?categories=<id>&categories=<id>`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
#[validate(schema(function = "validate_ranges"))]
pub struct ProductFilterParams {
    /// Animal name, exact match
    pub animal: Option<String>,
    #[serde(default)]
    pub categories: Vec<Uuid>,
    /// Inclusive lower price bound
    #[validate(range(min = 0.0))]
    pub price_from: Option<f64>,
    /// Inclusive upper price bound
    #[validate(range(min = 0.0))]
    pub price_to: Option<f64>,
    /// Substring of the product name
    pub search_text: Option<String>,
    #[serde(default)]
    pub page_number: u64,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub page_size: u64,
    #[serde(default)]
    pub sort_by: SortField,
    #[serde(default)]
    pub sort_direction: SortDirection,
}

impl Default for ProductFilterParams {
    fn default() -> Self {
        Self {
            animal: None,
            categories: Vec::new(),
            price_from: None,
            price_to: None,
            search_text: None,
            page_number: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: SortField::default(),
            sort_direction: SortDirection::default(),
        }
    }
}

fn validate_ranges(params: &ProductFilterParams) -> Result<(), ValidationError> {
    check_page_window(params.page_number, params.page_size)?;
    match (params.price_from, params.price_to) {
        (Some(from), Some(to)) if from > to => {
            let mut error = ValidationError::new("price_range");
            error.message = Some("price_from must not exceed price_to".into());
            Err(error)
        }
        _ => Ok(()),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ProductFilterParams {
    /// Omitted or blank criteria add no predicate
    pub fn into_query(self) -> ProductQuery {
        let mut specification = ProductSpecification::new();

        if let Some(animal) = non_blank(self.animal) {
            specification = specification.and(ProductPredicate::AnimalNamed(animal));
        }
        if !self.categories.is_empty() {
            specification = specification.and(ProductPredicate::CategoryIn(self.categories));
        }
        if let Some(from) = self.price_from {
            specification = specification.and(ProductPredicate::PriceAtLeast(from));
        }
        if let Some(to) = self.price_to {
            specification = specification.and(ProductPredicate::PriceAtMost(to));
        }
        if let Some(text) = non_blank(self.search_text) {
            specification = specification.and(ProductPredicate::NameContains(text));
        }

        ProductQuery {
            specification,
            page: PageParams::new(self.page_number, self.page_size),
            sort: ProductSort::new(self.sort_by, self.sort_direction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateProduct;
    use serde_json::json;

    fn product(name: &str, price: f64, category_id: Option<Uuid>) -> Product {
        Product::new(
            CreateProduct {
                name: name.into(),
                description: String::new(),
                comments: String::new(),
                price,
                amount: 1,
                category_id,
                animal_id: None,
                image_name: None,
            },
            None,
        )
    }

    #[test]
    fn test_no_criteria_yields_empty_specification() {
        let query = ProductFilterParams::default().into_query();
        assert!(query.specification.is_empty());
        assert_eq!(query.page, PageParams::new(0, DEFAULT_PAGE_SIZE));
        assert_eq!(query.sort, ProductSort::default());
    }

    #[test]
    fn test_blank_text_and_empty_categories_are_omitted() {
        let params = ProductFilterParams {
            animal: Some("  ".into()),
            search_text: Some(String::new()),
            categories: vec![],
            ..Default::default()
        };
        assert!(params.into_query().specification.is_empty());
    }

    #[test]
    fn test_every_criterion_becomes_a_predicate() {
        let category = Uuid::now_v7();
        let params = ProductFilterParams {
            animal: Some("cat".into()),
            categories: vec![category],
            price_from: Some(5.0),
            price_to: Some(20.0),
            search_text: Some("bowl".into()),
            ..Default::default()
        };

        let spec = params.into_query().specification;
        assert_eq!(
            spec.predicates(),
            &[
                ProductPredicate::AnimalNamed("cat".into()),
                ProductPredicate::CategoryIn(vec![category]),
                ProductPredicate::PriceAtLeast(5.0),
                ProductPredicate::PriceAtMost(20.0),
                ProductPredicate::NameContains("bowl".into()),
            ]
        );
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let spec = ProductSpecification::new()
            .and(ProductPredicate::PriceAtLeast(10.0))
            .and(ProductPredicate::PriceAtMost(20.0));

        assert!(spec.matches(&product("a", 10.0, None), None));
        assert!(spec.matches(&product("b", 20.0, None), None));
        assert!(!spec.matches(&product("c", 20.01, None), None));
        assert!(!spec.matches(&product("d", 9.99, None), None));
    }

    #[test]
    fn test_animal_and_category_predicates() {
        let toys = Uuid::now_v7();
        let by_animal = ProductSpecification::new().and(ProductPredicate::AnimalNamed("dog".into()));
        let by_category = ProductSpecification::new().and(ProductPredicate::CategoryIn(vec![toys]));

        let ball = product("Ball", 3.0, Some(toys));
        assert!(by_animal.matches(&ball, Some("dog")));
        assert!(!by_animal.matches(&ball, Some("cat")));
        assert!(!by_animal.matches(&ball, None));
        assert!(by_category.matches(&ball, None));
        assert!(!by_category.matches(&product("Bed", 3.0, None), None));
    }

    #[test]
    fn test_dropping_a_predicate_never_shrinks_results() {
        let toys = Uuid::now_v7();
        let catalog = vec![
            product("Cat bowl", 4.0, Some(toys)),
            product("Dog bowl", 12.0, None),
            product("Leash", 25.0, Some(toys)),
        ];
        let all = [
            ProductPredicate::CategoryIn(vec![toys]),
            ProductPredicate::PriceAtMost(15.0),
            ProductPredicate::NameContains("bowl".into()),
        ];

        let count = |spec: &ProductSpecification| {
            catalog.iter().filter(|p| spec.matches(p, None)).count()
        };

        let full = all
            .iter()
            .cloned()
            .fold(ProductSpecification::new(), ProductSpecification::and);

        for skip in 0..all.len() {
            let relaxed = all
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, p)| p.clone())
                .fold(ProductSpecification::new(), ProductSpecification::and);
            assert!(count(&relaxed) >= count(&full));
        }
        assert_eq!(count(&full), 1);
    }

    #[test]
    fn test_sort_compare_and_direction() {
        let cheap = product("b", 1.0, None);
        let pricey = product("a", 9.0, None);

        let asc = ProductSort::new(SortField::Price, SortDirection::Asc);
        let desc = ProductSort::new(SortField::Price, SortDirection::Desc);
        assert_eq!(asc.compare(&cheap, &pricey), Ordering::Less);
        assert_eq!(desc.compare(&cheap, &pricey), Ordering::Greater);

        let by_name = ProductSort::new(SortField::Name, SortDirection::Asc);
        assert_eq!(by_name.compare(&cheap, &pricey), Ordering::Greater);
    }

    #[test]
    fn test_inverted_price_range_is_rejected() {
        let params = ProductFilterParams {
            price_from: Some(30.0),
            price_to: Some(10.0),
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let negative = ProductFilterParams {
            price_from: Some(-1.0),
            ..Default::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_page_past_the_last_row_offset_is_rejected() {
        let params = ProductFilterParams {
            page_number: 1 << 60,
            page_size: 100,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let last = ProductFilterParams {
            page_number: i64::MAX as u64 / 100,
            page_size: 100,
            ..Default::default()
        };
        assert!(last.validate().is_ok());
    }

    #[test]
    fn test_unknown_sort_field_does_not_deserialize() {
        let parsed = serde_json::from_value::<ProductFilterParams>(json!({ "sort_by": "color" }));
        assert!(parsed.is_err());

        let parsed: ProductFilterParams =
            serde_json::from_value(json!({ "sort_by": "rating", "sort_direction": "desc" })).unwrap();
        assert_eq!(parsed.sort_by, SortField::Rating);
        assert_eq!(parsed.page_size, DEFAULT_PAGE_SIZE);
    }
}
