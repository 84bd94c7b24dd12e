use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A time-boxed discount over a set of products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Sale {
    pub id: Uuid,
    pub name: String,
    /// Banner image, a stored file id
    pub image_id: Option<Uuid>,
    /// First day of the sale
    pub date: NaiveDate,
    /// Last day of the sale, inclusive
    pub expiration_date: NaiveDate,
    /// Percentage taken off, in (0, 100]
    pub discount: f64,
    pub products: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Sale {
    pub fn new(input: CreateSale, image_id: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            image_id,
            date: input.date,
            expiration_date: input.expiration_date,
            discount: input.discount,
            products: input.products,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        self.date <= day && day <= self.expiration_date
    }

    pub fn discounted(&self, price: f64) -> f64 {
        discounted_price(price, self.discount)
    }

    /// Replace the fields present in `update`; the image is handled by the service
    pub fn apply_update(&mut self, update: UpdateSale) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(expiration_date) = update.expiration_date {
            self.expiration_date = expiration_date;
        }
        if let Some(discount) = update.discount {
            self.discount = discount;
        }
        if let Some(products) = update.products {
            self.products = products;
        }
        self.updated_at = Utc::now();
    }
}

/// `price × (1 − discount / 100)`, rounded to cents
pub fn discounted_price(price: f64, discount: f64) -> f64 {
    (price * (1.0 - discount / 100.0) * 100.0).round() / 100.0
}

fn validate_period(date: NaiveDate, expiration_date: NaiveDate) -> Result<(), ValidationError> {
    if date > expiration_date {
        let mut error = ValidationError::new("sale_period");
        error.message = Some("date must not be after expiration_date".into());
        return Err(error);
    }
    Ok(())
}

fn validate_create_period(input: &CreateSale) -> Result<(), ValidationError> {
    validate_period(input.date, input.expiration_date)
}

fn validate_update_period(input: &UpdateSale) -> Result<(), ValidationError> {
    match (input.date, input.expiration_date) {
        (Some(date), Some(expiration_date)) => validate_period(date, expiration_date),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq, Validate)]
#[validate(schema(function = "validate_create_period"))]
pub struct CreateSale {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub date: NaiveDate,
    pub expiration_date: NaiveDate,
    #[validate(range(exclusive_min = 0.0, max = 100.0))]
    pub discount: f64,
    pub products: Vec<Uuid>,
}

/// Fields given in a modify form; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Validate)]
#[validate(schema(function = "validate_update_period"))]
pub struct UpdateSale {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    #[validate(range(exclusive_min = 0.0, max = 100.0))]
    pub discount: Option<f64>,
    pub products: Option<Vec<Uuid>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SalePrice {
    pub product_id: Uuid,
    pub name: String,
    pub price: f64,
    pub discounted_price: f64,
}

/// Prices of a sale's products, as of `day`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SalePrices {
    pub sale_id: Uuid,
    pub discount: f64,
    pub day: NaiveDate,
    /// Whether `day` falls inside the sale period
    pub active: bool,
    pub products: Vec<SalePrice>,
}

/// OpenAPI shape of `POST /sale/add`
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct SaleForm {
    pub name: String,
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    /// `YYYY-MM-DD`
    pub date: NaiveDate,
    /// `YYYY-MM-DD`
    #[schema(rename = "expirationDate")]
    pub expiration_date: NaiveDate,
    pub discount: f64,
    /// Repeated field or comma-separated ids
    pub products: Vec<Uuid>,
}

/// OpenAPI shape of `PUT /sale/modify/{id}`; every field is optional
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct SaleModifyForm {
    pub name: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
    pub date: Option<NaiveDate>,
    #[schema(rename = "expirationDate")]
    pub expiration_date: Option<NaiveDate>,
    pub discount: Option<f64>,
    pub products: Option<Vec<Uuid>>,
}
