pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,
    ),
    components(schemas(dtos::ProductRequest, dtos::ProductResponse)),
    tags(
        (name = "Products", description = "Product catalogue CRUD"),
        (name = "Observability", description = "Service health and monitoring"),
    )
)]
pub struct ApiDoc;
