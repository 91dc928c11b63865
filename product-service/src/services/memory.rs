use crate::models::Product;
use crate::services::metrics::record_store_operation;
use crate::services::store::{parse_product_id, ProductStore};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-process product store with the same id rules as the MongoDB store.
/// Documents are kept in insertion order.
#[derive(Clone, Default)]
pub struct MemoryProductStore {
    products: Arc<RwLock<Vec<Product>>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Product>>, AppError> {
        self.products
            .read()
            .map_err(|_| AppError::InternalError(anyhow::anyhow!("product store lock poisoned")))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Product>>, AppError> {
        self.products
            .write()
            .map_err(|_| AppError::InternalError(anyhow::anyhow!("product store lock poisoned")))
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        record_store_operation("find_all", "ok");
        Ok(self.read()?.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, AppError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        record_store_operation("find_by_id", "ok");
        Ok(self.read()?.iter().find(|p| p.id == Some(oid)).cloned())
    }

    async fn insert(&self, mut product: Product) -> Result<Product, AppError> {
        let id = *product.id.get_or_insert_with(ObjectId::new);
        let mut products = self.write()?;
        if products.iter().any(|p| p.id == Some(id)) {
            record_store_operation("insert", "error");
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "duplicate key: product {} already exists",
                id
            )));
        }
        products.push(product.clone());
        record_store_operation("insert", "ok");
        tracing::info!(product_id = %id, "Product created");
        Ok(product)
    }

    async fn replace(&self, id: &str, mut product: Product) -> Result<(), AppError> {
        let oid = parse_product_id(id)?;
        product.id = Some(oid);

        let mut products = self.write()?;
        let matched = match products.iter_mut().find(|p| p.id == Some(oid)) {
            Some(existing) => {
                *existing = product;
                1
            }
            None => 0,
        };
        record_store_operation("replace", "ok");
        tracing::info!(product_id = %id, matched, "Product replaced");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let oid = parse_product_id(id)?;

        let mut products = self.write()?;
        let before = products.len();
        products.retain(|p| p.id != Some(oid));
        let deleted = before - products.len();
        record_store_operation("delete", "ok");
        tracing::info!(product_id = %id, deleted, "Product deleted");
        Ok(())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}
