use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("File not found: {0}")]
    NotFound(Uuid),

    #[error("File name must not be empty")]
    EmptyName,

    #[error("File '{0}' is empty")]
    EmptyContent(String),

    #[error("File is {size} bytes, the limit is {limit}")]
    TooLarge { size: usize, limit: usize },

    #[error("Unsupported content type '{0}', expected an image")]
    UnsupportedContentType(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type FileResult<T> = Result<T, FileError>;

impl From<DbErr> for FileError {
    fn from(err: DbErr) -> Self {
        FileError::Internal(format!("Database error: {err}"))
    }
}

impl From<FileError> for AppError {
    fn from(err: FileError) -> Self {
        match err {
            FileError::NotFound(id) => AppError::NotFound(format!("File {id} not found")),
            FileError::TooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            FileError::EmptyName
            | FileError::EmptyContent(_)
            | FileError::UnsupportedContentType(_) => AppError::BadRequest(err.to_string()),
            FileError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for FileError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
