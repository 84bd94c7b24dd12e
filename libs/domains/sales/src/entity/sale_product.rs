use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

/// Join row between a sale and one of its products
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sale_products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub sale_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sale::Entity",
        from = "Column::SaleId",
        to = "super::sale::Column::Id",
        on_delete = "Cascade"
    )]
    Sale,
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sale.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn rows(sale_id: Uuid, products: &[Uuid]) -> Vec<ActiveModel> {
    products
        .iter()
        .map(|product_id| ActiveModel {
            sale_id: Set(sale_id),
            product_id: Set(*product_id),
        })
        .collect()
}
