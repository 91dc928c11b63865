pub mod products;

pub use products::{ProductRequest, ProductResponse};
