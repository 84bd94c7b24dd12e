use axum::extract::multipart::MultipartError;
use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_files::FileError;
use domain_products::ProductError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SaleError {
    #[error("Sale not found: {0}")]
    NotFound(Uuid),

    #[error("No sale named '{0}'")]
    NameNotFound(String),

    #[error("Unknown products: {}", join_ids(.0))]
    UnknownProducts(Vec<Uuid>),

    #[error("Missing form field '{0}'")]
    MissingField(&'static str),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Multipart(#[from] MultipartError),

    #[error(transparent)]
    Image(#[from] FileError),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn join_ids(ids: &[Uuid]) -> String {
    ids.iter()
        .map(Uuid::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type SaleResult<T> = Result<T, SaleError>;

impl From<DbErr> for SaleError {
    fn from(err: DbErr) -> Self {
        SaleError::Internal(format!("Database error: {err}"))
    }
}

impl From<ProductError> for SaleError {
    fn from(err: ProductError) -> Self {
        SaleError::Internal(format!("Product lookup failed: {err}"))
    }
}

impl From<SaleError> for AppError {
    fn from(err: SaleError) -> Self {
        match err {
            SaleError::NotFound(id) => AppError::NotFound(format!("Sale {id} not found")),
            SaleError::NameNotFound(_) => AppError::NotFound(err.to_string()),
            SaleError::UnknownProducts(_) => AppError::UnprocessableEntity(err.to_string()),
            SaleError::MissingField(_) | SaleError::Validation(_) => {
                AppError::BadRequest(err.to_string())
            }
            SaleError::Multipart(e) => AppError::Multipart(e),
            SaleError::Image(e) => e.into(),
            SaleError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for SaleError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
