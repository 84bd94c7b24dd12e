use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AppError, UuidPath,
    errors::responses::{
        BadRequestMultipartResponse, BadRequestUuidResponse, InternalServerErrorResponse,
        NotFoundResponse, PayloadTooLargeResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::FileError;
use crate::models::{FileUploadForm, NewFile, StoredFile};
use crate::repository::FileStore;
use crate::service::FileService;
use crate::TAG;

#[derive(OpenApi)]
#[openapi(
    paths(upload_file, download_file, get_file_by_name),
    components(
        schemas(StoredFile, FileUploadForm),
        responses(
            NotFoundResponse,
            BadRequestMultipartResponse,
            BadRequestUuidResponse,
            PayloadTooLargeResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Image uploads referenced by products and sales")
    )
)]
pub struct ApiDoc;

pub fn router<S: FileStore + 'static>(service: FileService<S>) -> Router {
    Router::new()
        .route("/", post(upload_file::<S>))
        .route("/{id}", get(download_file::<S>))
        .route("/name/{name}", get(get_file_by_name::<S>))
        .with_state(Arc::new(service))
}

/// Upload an image
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body(content = FileUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "File stored", body = StoredFile),
        (status = 400, response = BadRequestMultipartResponse),
        (status = 413, response = PayloadTooLargeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn upload_file<S: FileStore>(
    State(service): State<Arc<FileService<S>>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let file = NewFile::from_field(field).await?;
            let stored = service.upload(file).await?;
            return Ok((StatusCode::CREATED, Json(stored)));
        }
    }

    Err(AppError::BadRequest("Missing multipart field 'file'".to_string()))
}

/// Download the raw bytes of a file
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "File content", content_type = "application/octet-stream", body = Vec<u8>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn download_file<S: FileStore>(
    State(service): State<Arc<FileService<S>>>,
    UuidPath(id): UuidPath,
) -> Result<impl IntoResponse, FileError> {
    let content = service.download(id).await?.ok_or(FileError::NotFound(id))?;
    Ok(([(header::CONTENT_TYPE, content.content_type)], content.bytes))
}

/// Look up the latest file uploaded under a name
#[utoipa::path(
    get,
    path = "/name/{name}",
    tag = TAG,
    params(
        ("name" = String, Path, description = "File name")
    ),
    responses(
        (status = 200, description = "File metadata", body = StoredFile),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_file_by_name<S: FileStore>(
    State(service): State<Arc<FileService<S>>>,
    Path(name): Path<String>,
) -> Result<Json<StoredFile>, AppError> {
    service
        .find_by_name(&name)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No file named '{name}'")))
}
