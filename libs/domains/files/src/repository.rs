use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::FileResult;
use crate::models::{FileContent, NewFile, StoredFile};

/// Storage for uploaded files
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn store(&self, file: NewFile) -> FileResult<StoredFile>;

    /// Latest upload with exactly this name
    async fn find_by_name(&self, name: &str) -> FileResult<Option<StoredFile>>;

    async fn get(&self, id: Uuid) -> FileResult<Option<StoredFile>>;

    async fn content(&self, id: Uuid) -> FileResult<Option<FileContent>>;

    async fn delete(&self, id: Uuid) -> FileResult<bool>;
}

#[derive(Debug, Clone)]
struct Entry {
    meta: StoredFile,
    bytes: Vec<u8>,
}

/// In-memory implementation of FileStore (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryFileStore {
    files: Arc<RwLock<HashMap<Uuid, Entry>>>,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileStore for InMemoryFileStore {
    async fn store(&self, file: NewFile) -> FileResult<StoredFile> {
        let meta = StoredFile {
            id: Uuid::now_v7(),
            name: file.name,
            content_type: file.content_type,
            size_bytes: file.bytes.len() as i64,
            created_at: chrono::Utc::now(),
        };

        self.files.write().await.insert(
            meta.id,
            Entry {
                meta: meta.clone(),
                bytes: file.bytes,
            },
        );

        tracing::info!(file_id = %meta.id, name = %meta.name, "Stored file");
        Ok(meta)
    }

    async fn find_by_name(&self, name: &str) -> FileResult<Option<StoredFile>> {
        let files = self.files.read().await;
        // v7 ids sort by creation time
        Ok(files
            .values()
            .filter(|entry| entry.meta.name == name)
            .max_by_key(|entry| entry.meta.id)
            .map(|entry| entry.meta.clone()))
    }

    async fn get(&self, id: Uuid) -> FileResult<Option<StoredFile>> {
        Ok(self.files.read().await.get(&id).map(|entry| entry.meta.clone()))
    }

    async fn content(&self, id: Uuid) -> FileResult<Option<FileContent>> {
        Ok(self.files.read().await.get(&id).map(|entry| FileContent {
            content_type: entry.meta.content_type.clone(),
            bytes: entry.bytes.clone(),
        }))
    }

    async fn delete(&self, id: Uuid) -> FileResult<bool> {
        Ok(self.files.write().await.remove(&id).is_some())
    }
}
