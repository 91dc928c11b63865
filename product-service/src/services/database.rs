use crate::models::Product;
use crate::services::metrics::record_store_operation;
use crate::services::store::{parse_product_id, ProductStore};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct MongoProductStore {
    client: MongoClient,
    db: Database,
    collection: String,
}

impl MongoProductStore {
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(
            database = %database,
            collection = %collection,
            "Successfully connected to MongoDB database"
        );
        Ok(Self {
            client,
            db,
            collection: collection.to_string(),
        })
    }

    pub fn products(&self) -> Collection<Product> {
        self.db.collection(&self.collection)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

fn outcome<T>(operation: &'static str, result: &Result<T, mongodb::error::Error>) {
    record_store_operation(operation, if result.is_ok() { "ok" } else { "error" });
}

#[async_trait]
impl ProductStore for MongoProductStore {
    async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        let result = match self.products().find(doc! {}, None).await {
            Ok(cursor) => cursor.try_collect::<Vec<Product>>().await,
            Err(e) => Err(e),
        };
        outcome("find_all", &result);

        result.map_err(|e| {
            tracing::error!("Failed to list products: {}", e);
            AppError::from(e)
        })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, AppError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            tracing::debug!(product_id = %id, "Lookup with unparsable product id");
            return Ok(None);
        };

        let result = self.products().find_one(doc! { "_id": oid }, None).await;
        outcome("find_by_id", &result);

        result.map_err(|e| {
            tracing::error!(product_id = %id, "Failed to find product: {}", e);
            AppError::from(e)
        })
    }

    async fn insert(&self, mut product: Product) -> Result<Product, AppError> {
        let id = *product.id.get_or_insert_with(ObjectId::new);

        let result = self.products().insert_one(&product, None).await;
        outcome("insert", &result);

        result.map_err(|e| {
            tracing::error!(product_id = %id, "Failed to insert product: {}", e);
            AppError::from(e)
        })?;

        tracing::info!(product_id = %id, "Product created");
        Ok(product)
    }

    async fn replace(&self, id: &str, mut product: Product) -> Result<(), AppError> {
        let oid = parse_product_id(id)?;
        product.id = Some(oid);

        let result = self
            .products()
            .replace_one(doc! { "_id": oid }, &product, None)
            .await;
        outcome("replace", &result);

        let updated = result.map_err(|e| {
            tracing::error!(product_id = %id, "Failed to replace product: {}", e);
            AppError::from(e)
        })?;

        tracing::info!(
            product_id = %id,
            matched = updated.matched_count,
            "Product replaced"
        );
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let oid = parse_product_id(id)?;

        let result = self.products().delete_one(doc! { "_id": oid }, None).await;
        outcome("delete", &result);

        let deleted = result.map_err(|e| {
            tracing::error!(product_id = %id, "Failed to delete product: {}", e);
            AppError::from(e)
        })?;

        tracing::info!(
            product_id = %id,
            deleted = deleted.deleted_count,
            "Product deleted"
        );
        Ok(())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
