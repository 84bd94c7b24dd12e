use axum::extract::multipart::{Field, MultipartError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Metadata of an uploaded file; the bytes are served separately
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StoredFile {
    pub id: Uuid,
    /// Original file name, used by products to reference their image
    pub name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub created_at: DateTime<Utc>,
}

/// An upload that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl NewFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read a multipart file field; a missing file name becomes an empty name
    /// and is rejected later by validation.
    pub async fn from_field(field: Field<'_>) -> Result<Self, MultipartError> {
        let name = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let bytes = field.bytes().await?.to_vec();

        Ok(Self {
            name,
            content_type,
            bytes,
        })
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileContent {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// OpenAPI shape of the upload form
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct FileUploadForm {
    /// Image file; its file name becomes the stored name
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
