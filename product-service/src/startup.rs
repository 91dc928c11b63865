//! Application wiring: store selection, router and server lifecycle.

use crate::config::{ProductConfig, StoreBackend};
use crate::handlers;
use crate::services::{MemoryProductStore, MongoProductStore, ProductStore};
use crate::ApiDoc;
use axum::{
    http::{header, Method},
    middleware::from_fn,
    routing::get,
    Json, Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    security_headers::security_headers_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Fixed, versioned prefix of the product resource.
pub const API_PREFIX: &str = "/v1/api";

#[derive(Clone)]
pub struct AppState {
    pub config: ProductConfig,
    pub store: Arc<dyn ProductStore>,
}

/// Connects the store selected by `config.store.backend`.
pub async fn connect_store(config: &ProductConfig) -> Result<Arc<dyn ProductStore>, AppError> {
    match config.store.backend {
        StoreBackend::Mongo => {
            let store = MongoProductStore::connect(
                &config.mongodb.uri,
                &config.mongodb.database,
                &config.mongodb.collection,
            )
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to MongoDB: {}", e);
                e
            })?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory product store; data is lost on restart");
            Ok(Arc::new(MemoryProductStore::new()))
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let products = Router::new()
        .route(
            "/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/products/:id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        );

    let mut app = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .nest(API_PREFIX, products);

    if state.config.swagger.enabled {
        app = app.merge(SwaggerUi::new("/docs").url("/.well-known/openapi.json", ApiDoc::openapi()));
    } else {
        app = app.route(
            "/.well-known/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        );
    }

    app.with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE])
                .expose_headers([header::LOCATION]),
        )
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    pub async fn build(config: ProductConfig) -> Result<Self, AppError> {
        let store = connect_store(&config).await?;
        Self::build_with_store(config, store).await
    }

    /// Builds the application around an already constructed store.
    pub async fn build_with_store(
        config: ProductConfig,
        store: Arc<dyn ProductStore>,
    ) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            backend = ?config.store.backend,
            "Product service listening on port {}",
            port
        );

        Ok(Self {
            port,
            listener,
            state: AppState { config, store },
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn store(&self) -> Arc<dyn ProductStore> {
        self.state.store.clone()
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
