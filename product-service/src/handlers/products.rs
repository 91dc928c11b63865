use crate::dtos::{ProductRequest, ProductResponse};
use crate::startup::{AppState, API_PREFIX};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use validator::Validate;

/// List every product.
#[utoipa::path(
    get,
    path = "/v1/api/products",
    responses(
        (status = 200, description = "All products", body = [ProductResponse]),
        (status = 500, description = "Store failure")
    ),
    tag = "Products"
)]
#[tracing::instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state.store.find_all().await?;
    Ok(Json(
        products.into_iter().map(ProductResponse::from).collect(),
    ))
}

/// Fetch one product. Unknown and malformed ids both answer 404.
#[utoipa::path(
    get,
    path = "/v1/api/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = ProductResponse),
        (status = 404, description = "No product with this id")
    ),
    tag = "Products"
)]
#[tracing::instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state
        .store
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Product {} not found", id)))?;

    Ok(Json(ProductResponse::from(product)))
}

/// Create a product. The id is always assigned by the store.
#[utoipa::path(
    post,
    path = "/v1/api/products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse,
            headers(("location" = String, description = "URL of the new product"))),
        (status = 400, description = "Missing or invalid fields")
    ),
    tag = "Products"
)]
#[tracing::instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    let created = state.store.insert(request.into_product()).await?;
    let response = ProductResponse::from(created);
    let location = format!("{}/products/{}", API_PREFIX, response.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(response),
    ))
}

/// Replace a product wholesale. Succeeds whether or not the id exists.
#[utoipa::path(
    put,
    path = "/v1/api/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    request_body = ProductRequest,
    responses(
        (status = 204, description = "Product replaced"),
        (status = 400, description = "Missing or invalid fields")
    ),
    tag = "Products"
)]
#[tracing::instrument(skip(state, payload))]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    state.store.replace(&id, request.into_product()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a product. Succeeds whether or not the id exists.
#[utoipa::path(
    delete,
    path = "/v1/api/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses((status = 204, description = "Product deleted")),
    tag = "Products"
)]
#[tracing::instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
