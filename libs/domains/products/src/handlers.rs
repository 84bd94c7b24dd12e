//! HTTP handlers for products, animals and categories

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AppError, Page, UuidPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, UnprocessableEntityResponse,
    },
};
use domain_files::FileStore;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ProductError, ProductResult, TaxonomyError, TaxonomyResult};
use crate::filter::{ProductFilterParams, SortDirection, SortField};
use crate::models::{
    CreateProduct, CreateTaxon, Product, Taxon, TaxonomyKind, UpdateProduct, WithdrawStock,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;
use crate::taxonomy::{TaxonomyRepository, TaxonomyService};
use crate::{TAG, TAXONOMY_TAG};

#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        withdraw_stock,
    ),
    components(
        schemas(Product, CreateProduct, UpdateProduct, WithdrawStock, SortField, SortDirection),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            UnprocessableEntityResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Product catalog")
    )
)]
pub struct ApiDoc;

/// Animal and category endpoints. Paths carry their collection prefix, so
/// this document is nested at the API root rather than under `/products`.
#[derive(OpenApi)]
#[openapi(
    paths(
        list_animals,
        create_animal,
        get_animal,
        list_categories,
        create_category,
        get_category,
    ),
    components(
        schemas(Taxon, CreateTaxon),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAXONOMY_TAG, description = "Animals and categories products are filed under")
    )
)]
pub struct TaxonomyApiDoc;

type SharedProducts<R, F> = State<Arc<ProductService<R, F>>>;

pub fn router<R, F>(service: ProductService<R, F>) -> Router
where
    R: ProductRepository + 'static,
    F: FileStore + 'static,
{
    Router::new()
        .route("/", get(list_products::<R, F>).post(create_product::<R, F>))
        .route(
            "/{id}",
            get(get_product::<R, F>)
                .put(update_product::<R, F>)
                .delete(delete_product::<R, F>),
        )
        .route("/{id}/withdraw", post(withdraw_stock::<R, F>))
        .with_state(Arc::new(service))
}

/// List products matching optional filters
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ProductFilterParams),
    responses(
        (status = 200, description = "One page of products", body = Page<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository, F: FileStore>(
    State(service): SharedProducts<R, F>,
    ValidatedQuery(params): ValidatedQuery<ProductFilterParams>,
) -> ProductResult<Json<Page<Product>>> {
    let page = service.find_all_with_filters(params.into_query()).await?;
    Ok(Json(page))
}

/// Add a product to the catalog
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository, F: FileStore>(
    State(service): SharedProducts<R, F>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.save(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository, F: FileStore>(
    State(service): SharedProducts<R, F>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<Product>> {
    service
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or(ProductError::NotFound(id))
}

/// Edit catalog fields of a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository, F: FileStore>(
    State(service): SharedProducts<R, F>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    service
        .edit_catalog(id, input)
        .await?
        .map(Json)
        .ok_or(ProductError::NotFound(id))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository, F: FileStore>(
    State(service): SharedProducts<R, F>,
    UuidPath(id): UuidPath,
) -> ProductResult<StatusCode> {
    if service.delete_by_id(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ProductError::NotFound(id))
    }
}

/// Take units out of stock
#[utoipa::path(
    post,
    path = "/{id}/withdraw",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = WithdrawStock,
    responses(
        (status = 200, description = "Stock reduced", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn withdraw_stock<R: ProductRepository, F: FileStore>(
    State(service): SharedProducts<R, F>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<WithdrawStock>,
) -> ProductResult<Json<Product>> {
    service
        .withdraw_stock(id, input.quantity)
        .await?
        .map(Json)
        .ok_or(ProductError::NotFound(id))
}

type SharedTaxonomy<T> = State<Arc<TaxonomyService<T>>>;

pub fn animals_router<T: TaxonomyRepository + 'static>(service: TaxonomyService<T>) -> Router {
    Router::new()
        .route("/", get(list_animals::<T>).post(create_animal::<T>))
        .route("/{id}", get(get_animal::<T>))
        .with_state(Arc::new(service))
}

pub fn categories_router<T: TaxonomyRepository + 'static>(service: TaxonomyService<T>) -> Router {
    Router::new()
        .route("/", get(list_categories::<T>).post(create_category::<T>))
        .route("/{id}", get(get_category::<T>))
        .with_state(Arc::new(service))
}

async fn create_taxon<T: TaxonomyRepository>(
    service: &TaxonomyService<T>,
    kind: TaxonomyKind,
    input: CreateTaxon,
) -> Result<(StatusCode, Json<Taxon>), AppError> {
    let taxon = service.create(kind, input).await?;
    Ok((StatusCode::CREATED, Json(taxon)))
}

async fn find_taxon<T: TaxonomyRepository>(
    service: &TaxonomyService<T>,
    kind: TaxonomyKind,
    id: uuid::Uuid,
) -> TaxonomyResult<Json<Taxon>> {
    service
        .get(kind, id)
        .await?
        .map(Json)
        .ok_or(TaxonomyError::NotFound { kind, id })
}

/// List animals by name
#[utoipa::path(
    get,
    path = "/animals",
    tag = TAXONOMY_TAG,
    responses(
        (status = 200, description = "All animals", body = Vec<Taxon>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_animals<T: TaxonomyRepository>(
    State(service): SharedTaxonomy<T>,
) -> TaxonomyResult<Json<Vec<Taxon>>> {
    Ok(Json(service.list(TaxonomyKind::Animal).await?))
}

/// Register an animal
#[utoipa::path(
    post,
    path = "/animals",
    tag = TAXONOMY_TAG,
    request_body = CreateTaxon,
    responses(
        (status = 201, description = "Animal created", body = Taxon),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_animal<T: TaxonomyRepository>(
    State(service): SharedTaxonomy<T>,
    ValidatedJson(input): ValidatedJson<CreateTaxon>,
) -> Result<impl IntoResponse, AppError> {
    create_taxon(&service, TaxonomyKind::Animal, input).await
}

/// Get an animal by ID
#[utoipa::path(
    get,
    path = "/animals/{id}",
    tag = TAXONOMY_TAG,
    params(
        ("id" = Uuid, Path, description = "Animal ID")
    ),
    responses(
        (status = 200, description = "Animal found", body = Taxon),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_animal<T: TaxonomyRepository>(
    State(service): SharedTaxonomy<T>,
    UuidPath(id): UuidPath,
) -> TaxonomyResult<Json<Taxon>> {
    find_taxon(&service, TaxonomyKind::Animal, id).await
}

/// List categories by name
#[utoipa::path(
    get,
    path = "/categories",
    tag = TAXONOMY_TAG,
    responses(
        (status = 200, description = "All categories", body = Vec<Taxon>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<T: TaxonomyRepository>(
    State(service): SharedTaxonomy<T>,
) -> TaxonomyResult<Json<Vec<Taxon>>> {
    Ok(Json(service.list(TaxonomyKind::Category).await?))
}

/// Register a category
#[utoipa::path(
    post,
    path = "/categories",
    tag = TAXONOMY_TAG,
    request_body = CreateTaxon,
    responses(
        (status = 201, description = "Category created", body = Taxon),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<T: TaxonomyRepository>(
    State(service): SharedTaxonomy<T>,
    ValidatedJson(input): ValidatedJson<CreateTaxon>,
) -> Result<impl IntoResponse, AppError> {
    create_taxon(&service, TaxonomyKind::Category, input).await
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = TAXONOMY_TAG,
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = Taxon),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category<T: TaxonomyRepository>(
    State(service): SharedTaxonomy<T>,
    UuidPath(id): UuidPath,
) -> TaxonomyResult<Json<Taxon>> {
    find_taxon(&service, TaxonomyKind::Category, id).await
}
