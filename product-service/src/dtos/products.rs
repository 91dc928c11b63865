use crate::models::Product;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Body accepted by create and update.
///
/// Required fields are optional at the serde level so that a missing field is
/// reported by `validate()` together with every other violation instead of
/// failing deserialization on the first one. Any `id` the client sends is
/// ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    #[validate(
        required(message = "Name is required"),
        length(min = 1, message = "Name cannot be empty")
    )]
    #[schema(example = "Hard Hat")]
    pub name: Option<String>,
    #[validate(required(message = "Price is required"))]
    #[schema(example = 19.99)]
    pub price: Option<f64>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl ProductRequest {
    /// Converts a validated request into a product without an id.
    pub fn into_product(self) -> Product {
        Product {
            id: None,
            name: self.name.unwrap_or_default(),
            price: self.price.unwrap_or_default(),
            description: self.description,
            category: self.category,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[schema(example = "65f1c0d2a4b7e93c1d2e4f60")]
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id_hex(),
            name: product.name,
            price: product.price,
            description: product.description,
            category: product.category,
        }
    }
}
