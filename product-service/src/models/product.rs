use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A product as persisted in the `products` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Product {
    pub fn new(name: String, price: f64) -> Self {
        Self {
            id: None,
            name,
            price,
            description: None,
            category: None,
        }
    }

    /// External string form of the id, empty until the store assigns one.
    pub fn id_hex(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }
}
