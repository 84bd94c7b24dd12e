use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    entity,
    error::FileResult,
    models::{FileContent, NewFile, StoredFile},
    repository::FileStore,
};

/// `files` table; content lives in a `bytea` column next to the metadata
pub struct PgFileStore {
    base: BaseRepository<entity::Entity>,
}

impl PgFileStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl FileStore for PgFileStore {
    async fn store(&self, file: NewFile) -> FileResult<StoredFile> {
        let model = self.base.insert(file.into()).await?;

        tracing::info!(file_id = %model.id, name = %model.name, "Stored file");
        Ok(model.into())
    }

    async fn find_by_name(&self, name: &str) -> FileResult<Option<StoredFile>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Name.eq(name))
            .order_by_desc(entity::Column::CreatedAt)
            .order_by_desc(entity::Column::Id)
            .one(self.base.db())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn get(&self, id: Uuid) -> FileResult<Option<StoredFile>> {
        Ok(self.base.find_by_id(id).await?.map(Into::into))
    }

    async fn content(&self, id: Uuid) -> FileResult<Option<FileContent>> {
        Ok(self.base.find_by_id(id).await?.map(|model| FileContent {
            content_type: model.content_type,
            bytes: model.content,
        }))
    }

    async fn delete(&self, id: Uuid) -> FileResult<bool> {
        Ok(self.base.delete_by_id(id).await? > 0)
    }
}
