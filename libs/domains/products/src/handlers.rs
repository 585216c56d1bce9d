//! HTTP handlers for Products API

use axum::{
    Json, Router,
    body::Bytes,
    extract::{OriginalUri, Query, State, rejection::QueryRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
        UnsupportedMediaTypeResponse,
    },
    require_json_content_type,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ProductError, ProductResult};
use crate::filter::{ProductFilter, ProductQuery};
use crate::models::{Category, Product, ProductPayload};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(Product, ProductPayload, Category),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            UnsupportedMediaTypeResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// `Location` of a newly created product.
///
/// Absolute when the request carried a `Host` header, otherwise the
/// request path with the id appended.
fn location(headers: &HeaderMap, path: &str, id: i32) -> Option<HeaderValue> {
    let path = path.trim_end_matches('/');
    let value = match headers.get(header::HOST).and_then(|h| h.to_str().ok()) {
        Some(host) => format!("http://{}{}/{}", host, path, id),
        None => format!("{}/{}", path, id),
    };
    HeaderValue::from_str(&value).ok()
}

/// List products with optional filters
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Products matching every criterion", body = Vec<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> ProductResult<Json<Vec<Product>>> {
    let Query(query) = query.map_err(|e| ProductError::Validation(e.body_text()))?;
    let filter = ProductFilter::try_from(query)?;
    let products = service.list_products(filter).await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Product created successfully", body = Product,
            headers(("Location" = String, description = "URL of the new product"))),
        (status = 400, response = BadRequestValidationResponse),
        (status = 415, response = UnsupportedMediaTypeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> ProductResult<impl IntoResponse> {
    require_json_content_type(&headers)?;
    let input = ProductPayload::from_json(&body)?;

    let product = service.create_product(input).await?;

    let mut response_headers = HeaderMap::new();
    if let Some(location) = location(&headers, uri.path(), product.id) {
        response_headers.insert(header::LOCATION, location);
    }

    Ok((StatusCode::CREATED, response_headers, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Replace a product
///
/// An unknown id is reported before the body is looked at.
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Product replaced", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 415, response = UnsupportedMediaTypeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    headers: HeaderMap,
    body: Bytes,
) -> ProductResult<Json<Product>> {
    service.get_product(id).await?;

    require_json_content_type(&headers)?;
    let input = ProductPayload::from_json(&body)?;

    let product = service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<StatusCode> {
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
