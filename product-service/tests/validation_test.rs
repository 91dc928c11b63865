//! Router-level tests with a recording store: invalid bodies must never reach
//! the persistence layer, and store failures surface as 500s.

mod common;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use common::test_config;
use http_body_util::BodyExt;
use product_service::config::StoreBackend;
use product_service::models::Product;
use product_service::services::ProductStore;
use product_service::startup::Application;
use serde_json::{json, Value};
use service_core::error::AppError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

#[derive(Default)]
struct RecordingStore {
    calls: AtomicUsize,
    fail: bool,
}

impl RecordingStore {
    fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    fn touch(&self) -> Result<(), AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(AppError::DatabaseError(anyhow::anyhow!("connection refused")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ProductStore for RecordingStore {
    async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        self.touch().map(|_| Vec::new())
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<Product>, AppError> {
        self.touch().map(|_| None)
    }

    async fn insert(&self, product: Product) -> Result<Product, AppError> {
        self.touch().map(|_| product)
    }

    async fn replace(&self, _id: &str, _product: Product) -> Result<(), AppError> {
        self.touch()
    }

    async fn delete(&self, _id: &str) -> Result<(), AppError> {
        self.touch()
    }

    async fn health_check(&self) -> Result<(), AppError> {
        if self.fail {
            Err(AppError::ServiceUnavailable)
        } else {
            Ok(())
        }
    }
}

async fn router_with(store: Arc<RecordingStore>) -> Router {
    let app = Application::build_with_store(test_config(StoreBackend::Memory), store)
        .await
        .expect("Failed to build test application");
    app.router()
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn invalid_create_never_reaches_store() {
    let store = Arc::new(RecordingStore::default());
    let router = router_with(store.clone()).await;

    let response = router
        .oneshot(json_request(
            Method::POST,
            "/v1/api/products",
            json!({ "price": 10.0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["fields"]["name"][0], "Name is required");
    assert_eq!(store.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn invalid_update_never_reaches_store() {
    let store = Arc::new(RecordingStore::default());
    let router = router_with(store.clone()).await;

    let response = router
        .oneshot(json_request(
            Method::PUT,
            "/v1/api/products/65f1c0d2a4b7e93c1d2e4f60",
            json!({ "name": "Gloves", "price": null }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["fields"]["price"][0], "Price is required");
    assert_eq!(store.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn valid_create_reaches_store_once() {
    let store = Arc::new(RecordingStore::default());
    let router = router_with(store.clone()).await;

    let response = router
        .oneshot(json_request(
            Method::POST,
            "/v1/api/products",
            json!({ "name": "Gloves", "price": 4.5 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(store.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn store_failures_surface_as_500() {
    let store = Arc::new(RecordingStore::failing());
    let router = router_with(store.clone()).await;

    let requests = [
        Request::builder()
            .uri("/v1/api/products")
            .body(Body::empty())
            .unwrap(),
        Request::builder()
            .uri("/v1/api/products/65f1c0d2a4b7e93c1d2e4f60")
            .body(Body::empty())
            .unwrap(),
        json_request(
            Method::POST,
            "/v1/api/products",
            json!({ "name": "Gloves", "price": 4.5 }),
        ),
        Request::builder()
            .method(Method::DELETE)
            .uri("/v1/api/products/65f1c0d2a4b7e93c1d2e4f60")
            .body(Body::empty())
            .unwrap(),
    ];

    for request in requests {
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "Database error");
    }
    assert_eq!(store.calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn unhealthy_store_fails_probes() {
    let router = router_with(Arc::new(RecordingStore::failing())).await;

    let response = router
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["status"], "unhealthy");

    let response = router
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
