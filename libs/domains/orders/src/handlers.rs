use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use axum_helpers::{
    Page, UuidPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::TAG;
use crate::error::{OrderError, OrderResult};
use crate::models::{CreateOrder, Order, OrderFilter, UpdateOrder};
use crate::repository::OrderRepository;
use crate::service::OrderService;

#[derive(OpenApi)]
#[openapi(
    paths(list_orders, create_order, get_order, update_order, delete_order),
    components(
        schemas(Order, CreateOrder, UpdateOrder),
        responses(
            NotFoundResponse,
            BadRequestUuidResponse,
            BadRequestValidationResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Customer orders")
    )
)]
pub struct ApiDoc;

type SharedOrders<R> = State<Arc<OrderService<R>>>;

pub fn router<R: OrderRepository + 'static>(service: OrderService<R>) -> Router {
    Router::new()
        .route("/", get(list_orders::<R>).post(create_order::<R>))
        .route(
            "/{id}",
            get(get_order::<R>)
                .put(update_order::<R>)
                .delete(delete_order::<R>),
        )
        .with_state(Arc::new(service))
}

/// List orders, newest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(OrderFilter),
    responses(
        (status = 200, description = "One page of orders", body = Page<Order>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_orders<R: OrderRepository>(
    State(service): SharedOrders<R>,
    ValidatedQuery(filter): ValidatedQuery<OrderFilter>,
) -> OrderResult<Json<Page<Order>>> {
    Ok(Json(service.list_orders(filter).await?))
}

/// Place an order
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateOrder,
    responses(
        (status = 201, description = "Order created", body = Order),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_order<R: OrderRepository>(
    State(service): SharedOrders<R>,
    ValidatedJson(input): ValidatedJson<CreateOrder>,
) -> OrderResult<(StatusCode, Json<Order>)> {
    let order = service.create_order(input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order found", body = Order),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_order<R: OrderRepository>(
    State(service): SharedOrders<R>,
    UuidPath(id): UuidPath,
) -> OrderResult<Json<Order>> {
    service
        .get_order(id)
        .await?
        .map(Json)
        .ok_or(OrderError::NotFound(id))
}

/// Change status, type or contact details
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    request_body = UpdateOrder,
    responses(
        (status = 200, description = "Order updated", body = Order),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_order<R: OrderRepository>(
    State(service): SharedOrders<R>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateOrder>,
) -> OrderResult<Json<Order>> {
    service
        .update_order(id, input)
        .await?
        .map(Json)
        .ok_or(OrderError::NotFound(id))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_order<R: OrderRepository>(
    State(service): SharedOrders<R>,
    UuidPath(id): UuidPath,
) -> OrderResult<StatusCode> {
    if service.delete_order(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(OrderError::NotFound(id))
    }
}
