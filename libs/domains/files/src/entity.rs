use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::{NewFile, StoredFile};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "files")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub content: Vec<u8>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for StoredFile {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            content_type: model.content_type,
            size_bytes: model.size_bytes,
            created_at: model.created_at.into(),
        }
    }
}

impl From<NewFile> for ActiveModel {
    fn from(input: NewFile) -> Self {
        ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name),
            content_type: Set(input.content_type),
            size_bytes: Set(input.bytes.len() as i64),
            content: Set(input.bytes),
            created_at: Set(chrono::Utc::now().into()),
        }
    }
}
