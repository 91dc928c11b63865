use crate::models::Product;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

/// Persistence gateway for products.
///
/// Ids cross this boundary as strings; implementations own the translation to
/// the native `ObjectId`. `replace` and `delete` do not report whether a
/// document matched.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Product>, AppError>;

    /// `Ok(None)` when nothing matches, including ids that do not parse.
    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, AppError>;

    /// Persists `product`, assigning a fresh id when it has none, and returns
    /// the stored document.
    async fn insert(&self, product: Product) -> Result<Product, AppError>;

    async fn replace(&self, id: &str, product: Product) -> Result<(), AppError>;

    async fn delete(&self, id: &str) -> Result<(), AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

/// Parses the external id form. Failures surface as store errors; lookups
/// that must treat a bad id as absent check for `None` via `.ok()`.
pub fn parse_product_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|e| {
        AppError::DatabaseError(anyhow::anyhow!("Invalid product id '{}': {}", id, e))
    })
}
