//! Product API request/response types.
//!
//! Products are stored in the document as a plain name-to-price mapping,
//! so there is no separate stored struct; these types cover the API side.

use serde::{Deserialize, Serialize};

/// A catalog product as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub name: String,
    pub price: f64,
}

/// Request body for adding a new product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub price: f64,
}

/// Request body for editing an existing product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub new_name: String,
    pub price: f64,
}
