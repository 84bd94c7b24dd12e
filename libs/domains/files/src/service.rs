use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{FileError, FileResult};
use crate::models::{FileContent, NewFile, StoredFile};
use crate::repository::FileStore;

/// Upload validation in front of a [`FileStore`].
///
/// Product and sale services share one instance to resolve and store images.
pub struct FileService<S: FileStore> {
    store: Arc<S>,
    max_bytes: usize,
}

impl<S: FileStore> Clone for FileService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            max_bytes: self.max_bytes,
        }
    }
}

impl<S: FileStore> FileService<S> {
    pub fn new(store: S, max_bytes: usize) -> Self {
        Self {
            store: Arc::new(store),
            max_bytes,
        }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Only non-empty `image/*` uploads within the size limit are accepted
    pub fn validate(&self, file: &NewFile) -> FileResult<()> {
        if file.name.trim().is_empty() {
            return Err(FileError::EmptyName);
        }
        if file.bytes.is_empty() {
            return Err(FileError::EmptyContent(file.name.clone()));
        }
        if file.size() > self.max_bytes {
            return Err(FileError::TooLarge {
                size: file.size(),
                limit: self.max_bytes,
            });
        }
        if !file.content_type.starts_with("image/") {
            return Err(FileError::UnsupportedContentType(file.content_type.clone()));
        }
        Ok(())
    }

    #[instrument(skip(self, file), fields(name = %file.name, size = file.size()))]
    pub async fn upload(&self, file: NewFile) -> FileResult<StoredFile> {
        self.validate(&file)?;
        self.store.store(file).await
    }

    pub async fn get(&self, id: Uuid) -> FileResult<Option<StoredFile>> {
        self.store.get(id).await
    }

    pub async fn find_by_name(&self, name: &str) -> FileResult<Option<StoredFile>> {
        self.store.find_by_name(name).await
    }

    pub async fn download(&self, id: Uuid) -> FileResult<Option<FileContent>> {
        self.store.content(id).await
    }

    /// Remove an upload whose owning record was never written
    #[instrument(skip(self))]
    pub async fn discard(&self, id: Uuid) {
        if let Err(e) = self.store.delete(id).await {
            tracing::warn!(file_id = %id, "Failed to discard upload: {}", e);
        }
    }
}
