#![allow(dead_code)]

use product_service::config::{
    MongoConfig, ProductConfig, StoreBackend, StoreConfig, SwaggerConfig,
};
use product_service::services::init_metrics;
use product_service::startup::Application;
use serde_json::Value;
use service_core::config::Config as CoreConfig;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

pub fn test_config(backend: StoreBackend) -> ProductConfig {
    ProductConfig {
        common: CoreConfig {
            port: 0, // Random port for testing
            ..CoreConfig::default()
        },
        store: StoreConfig { backend },
        mongodb: MongoConfig {
            uri: std::env::var("TEST_MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: format!("product_test_{}", uuid::Uuid::new_v4().simple()),
            collection: "products".to_string(),
        },
        swagger: SwaggerConfig { enabled: true },
    }
}

impl TestApp {
    /// Spawns the application backed by the in-memory store.
    pub async fn spawn() -> Self {
        Self::spawn_with(StoreBackend::Memory).await
    }

    pub async fn spawn_with(backend: StoreBackend) -> Self {
        init_metrics();

        let app = Application::build(test_config(backend))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub fn products_url(&self) -> String {
        format!("{}/v1/api/products", self.address)
    }

    pub fn product_url(&self, id: &str) -> String {
        format!("{}/v1/api/products/{}", self.address, id)
    }

    pub async fn create_product(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(self.products_url())
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Creates a product and returns its generated id.
    pub async fn seed_product(&self, body: &Value) -> String {
        let response = self.create_product(body).await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let created: Value = response.json().await.expect("Failed to parse response");
        created["id"]
            .as_str()
            .expect("Created product has no id")
            .to_string()
    }

    pub async fn get_product(&self, id: &str) -> reqwest::Response {
        self.client
            .get(self.product_url(id))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn update_product(&self, id: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(self.product_url(id))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_product(&self, id: &str) -> reqwest::Response {
        self.client
            .delete(self.product_url(id))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
