use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use axum_helpers::{
    Page, PageParams, UuidPath, ValidatedQuery,
    errors::responses::{
        BadRequestMultipartResponse, BadRequestUuidResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse, PayloadTooLargeResponse,
        UnprocessableEntityResponse,
    },
};
use chrono::Utc;
use domain_files::FileStore;
use domain_products::ProductRepository;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::TAG;
use crate::error::{SaleError, SaleResult};
use crate::form::SaleFormData;
use crate::models::{Sale, SaleForm, SaleModifyForm, SalePrice, SalePrices};
use crate::repository::SaleRepository;
use crate::service::SaleService;

#[derive(OpenApi)]
#[openapi(
    paths(
        get_sale,
        get_sale_by_name,
        list_sales,
        add_sale,
        modify_sale,
        delete_sale,
        get_sale_prices,
    ),
    components(
        schemas(Sale, SaleForm, SaleModifyForm, SalePrice, SalePrices),
        responses(
            NotFoundResponse,
            BadRequestUuidResponse,
            BadRequestValidationResponse,
            BadRequestMultipartResponse,
            UnprocessableEntityResponse,
            PayloadTooLargeResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Time-boxed discounts over catalog products")
    )
)]
pub struct ApiDoc;

type SharedSales<R, P, F> = State<Arc<SaleService<R, P, F>>>;

pub fn router<R, P, F>(service: SaleService<R, P, F>) -> Router
where
    R: SaleRepository + 'static,
    P: ProductRepository + 'static,
    F: FileStore + 'static,
{
    Router::new()
        .route("/get", get(list_sales::<R, P, F>))
        .route("/get/{id}", get(get_sale::<R, P, F>))
        .route("/get/{id}/prices", get(get_sale_prices::<R, P, F>))
        .route("/get/name/{name}", get(get_sale_by_name::<R, P, F>))
        .route("/add", post(add_sale::<R, P, F>))
        .route("/modify/{id}", put(modify_sale::<R, P, F>))
        .route("/delete/{id}", delete(delete_sale::<R, P, F>))
        .with_state(Arc::new(service))
}

/// Get a sale by ID
#[utoipa::path(
    get,
    path = "/get/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Sale ID")
    ),
    responses(
        (status = 200, description = "Sale found", body = Sale),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_sale<R: SaleRepository, P: ProductRepository, F: FileStore>(
    State(service): SharedSales<R, P, F>,
    UuidPath(id): UuidPath,
) -> SaleResult<Json<Sale>> {
    service
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or(SaleError::NotFound(id))
}

/// Get the latest sale with a given name
#[utoipa::path(
    get,
    path = "/get/name/{name}",
    tag = TAG,
    params(
        ("name" = String, Path, description = "Sale name")
    ),
    responses(
        (status = 200, description = "Sale found", body = Sale),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_sale_by_name<R: SaleRepository, P: ProductRepository, F: FileStore>(
    State(service): SharedSales<R, P, F>,
    Path(name): Path<String>,
) -> SaleResult<Json<Sale>> {
    service
        .get_by_name(&name)
        .await?
        .map(Json)
        .ok_or(SaleError::NameNotFound(name))
}

/// List sales, newest first
#[utoipa::path(
    get,
    path = "/get",
    tag = TAG,
    params(PageParams),
    responses(
        (status = 200, description = "One page of sales", body = Page<Sale>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_sales<R: SaleRepository, P: ProductRepository, F: FileStore>(
    State(service): SharedSales<R, P, F>,
    ValidatedQuery(page): ValidatedQuery<PageParams>,
) -> SaleResult<Json<Page<Sale>>> {
    Ok(Json(service.list(page).await?))
}

/// Create a sale with a banner image
#[utoipa::path(
    post,
    path = "/add",
    tag = TAG,
    request_body(content = SaleForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Sale created", body = Sale),
        (status = 400, response = BadRequestMultipartResponse),
        (status = 413, response = PayloadTooLargeResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_sale<R: SaleRepository, P: ProductRepository, F: FileStore>(
    State(service): SharedSales<R, P, F>,
    multipart: Multipart,
) -> SaleResult<Json<Sale>> {
    let (input, image) = SaleFormData::from_multipart(multipart).await?.into_create()?;
    Ok(Json(service.create(input, image).await?))
}

/// Change the fields present in the form
#[utoipa::path(
    put,
    path = "/modify/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Sale ID")
    ),
    request_body(content = SaleModifyForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Sale updated", body = Sale),
        (status = 400, response = BadRequestMultipartResponse),
        (status = 404, response = NotFoundResponse),
        (status = 413, response = PayloadTooLargeResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn modify_sale<R: SaleRepository, P: ProductRepository, F: FileStore>(
    State(service): SharedSales<R, P, F>,
    UuidPath(id): UuidPath,
    multipart: Multipart,
) -> SaleResult<Json<Sale>> {
    let (update, image) = SaleFormData::from_multipart(multipart).await?.into_update();
    service
        .modify(id, update, image)
        .await?
        .map(Json)
        .ok_or(SaleError::NotFound(id))
}

/// Delete a sale
#[utoipa::path(
    delete,
    path = "/delete/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Sale ID")
    ),
    responses(
        (status = 204, description = "Sale deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_sale<R: SaleRepository, P: ProductRepository, F: FileStore>(
    State(service): SharedSales<R, P, F>,
    UuidPath(id): UuidPath,
) -> SaleResult<StatusCode> {
    if service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(SaleError::NotFound(id))
    }
}

/// Today's discounted prices for every product in a sale
#[utoipa::path(
    get,
    path = "/get/{id}/prices",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Sale ID")
    ),
    responses(
        (status = 200, description = "Discounted prices", body = SalePrices),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_sale_prices<R: SaleRepository, P: ProductRepository, F: FileStore>(
    State(service): SharedSales<R, P, F>,
    UuidPath(id): UuidPath,
) -> SaleResult<Json<SalePrices>> {
    service
        .prices(id, Utc::now().date_naive())
        .await?
        .map(Json)
        .ok_or(SaleError::NotFound(id))
}
