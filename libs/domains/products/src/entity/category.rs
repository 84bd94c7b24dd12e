use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::Taxon;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Taxon {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at.into(),
        }
    }
}

impl From<Taxon> for ActiveModel {
    fn from(taxon: Taxon) -> Self {
        ActiveModel {
            id: Set(taxon.id),
            name: Set(taxon.name),
            created_at: Set(taxon.created_at.into()),
        }
    }
}
