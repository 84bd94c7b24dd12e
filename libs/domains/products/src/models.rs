use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Internal notes from the maker
    pub comments: String,
    pub price: f64,
    /// Units in stock, never negative
    pub amount: i32,
    pub category_id: Option<Uuid>,
    pub animal_id: Option<Uuid>,
    pub rating: f64,
    /// Stored file used as the product picture
    pub image_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// A fresh catalog entry: new id, zero rating
    pub fn new(input: CreateProduct, image_id: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            comments: input.comments,
            price: input.price,
            amount: input.amount,
            category_id: input.category_id,
            animal_id: input.animal_id,
            rating: 0.0,
            image_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Copy the provided fields; the image is resolved separately
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(comments) = update.comments {
            self.comments = comments;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub comments: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub amount: i32,
    pub category_id: Option<Uuid>,
    pub animal_id: Option<Uuid>,
    /// Name of a previously uploaded file
    pub image_name: Option<String>,
}

/// Partial catalog edit; absent fields keep their value
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(range(min = 0))]
    pub amount: Option<i32>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(length(max = 2000))]
    pub comments: Option<String>,
    pub image_name: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate, ToSchema)]
pub struct WithdrawStock {
    #[validate(range(min = 1))]
    pub quantity: i32,
}

/// Which taxonomy table a name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum TaxonomyKind {
    Animal,
    Category,
}

/// An animal or a category; both share this shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Taxon {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Taxon {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTaxon {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}
