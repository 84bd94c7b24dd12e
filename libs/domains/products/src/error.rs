use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_files::FileError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

use crate::models::TaxonomyKind;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(Uuid),

    #[error("No uploaded image named '{0}'")]
    UnknownImage(String),

    #[error("Insufficient stock: available {available}, requested {requested}")]
    InsufficientStock { available: i32, requested: i32 },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<DbErr> for ProductError {
    fn from(err: DbErr) -> Self {
        ProductError::Internal(format!("Database error: {err}"))
    }
}

impl From<FileError> for ProductError {
    fn from(err: FileError) -> Self {
        match err {
            FileError::Internal(msg) => ProductError::Internal(msg),
            other => ProductError::Validation(other.to_string()),
        }
    }
}

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {id} not found")),
            ProductError::UnknownImage(_) => AppError::UnprocessableEntity(err.to_string()),
            ProductError::InsufficientStock { .. } => AppError::Conflict(err.to_string()),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: TaxonomyKind, id: Uuid },

    #[error("{kind} '{name}' already exists")]
    Duplicate { kind: TaxonomyKind, name: String },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type TaxonomyResult<T> = Result<T, TaxonomyError>;

impl From<DbErr> for TaxonomyError {
    fn from(err: DbErr) -> Self {
        TaxonomyError::Internal(format!("Database error: {err}"))
    }
}

impl From<TaxonomyError> for AppError {
    fn from(err: TaxonomyError) -> Self {
        match err {
            TaxonomyError::NotFound { .. } => AppError::NotFound(err.to_string()),
            TaxonomyError::Duplicate { .. } => AppError::Conflict(err.to_string()),
            TaxonomyError::Validation(msg) => AppError::BadRequest(msg),
            TaxonomyError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for TaxonomyError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
