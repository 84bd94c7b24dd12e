use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::Product;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub comments: String,
    pub price: f64,
    pub amount: i32,
    pub category_id: Option<Uuid>,
    pub animal_id: Option<Uuid>,
    pub rating: f64,
    pub image_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            comments: model.comments,
            price: model.price,
            amount: model.amount,
            category_id: model.category_id,
            animal_id: model.animal_id,
            rating: model.rating,
            image_id: model.image_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Every column set, so the same value serves insert and full update
impl From<Product> for ActiveModel {
    fn from(product: Product) -> Self {
        ActiveModel {
            id: Set(product.id),
            name: Set(product.name),
            description: Set(product.description),
            comments: Set(product.comments),
            price: Set(product.price),
            amount: Set(product.amount),
            category_id: Set(product.category_id),
            animal_id: Set(product.animal_id),
            rating: Set(product.rating),
            image_id: Set(product.image_id),
            created_at: Set(product.created_at.into()),
            updated_at: Set(product.updated_at.into()),
        }
    }
}
