use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::Sale;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub image_id: Option<Uuid>,
    pub date: Date,
    pub expiration_date: Date,
    pub discount: f64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sale_product::Entity")]
    SaleProduct,
}

impl Related<super::sale_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleProduct.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Product ids live in `sale_products` and are loaded separately
    pub fn into_sale(self, products: Vec<Uuid>) -> Sale {
        Sale {
            id: self.id,
            name: self.name,
            image_id: self.image_id,
            date: self.date,
            expiration_date: self.expiration_date,
            discount: self.discount,
            products,
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
        }
    }
}

impl From<&Sale> for ActiveModel {
    fn from(sale: &Sale) -> Self {
        ActiveModel {
            id: Set(sale.id),
            name: Set(sale.name.clone()),
            image_id: Set(sale.image_id),
            date: Set(sale.date),
            expiration_date: Set(sale.expiration_date),
            discount: Set(sale.discount),
            created_at: Set(sale.created_at.into()),
            updated_at: Set(sale.updated_at.into()),
        }
    }
}
