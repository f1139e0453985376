//! Product API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::models::{CreateProductRequest, ProductView, UpdateProductRequest};
use crate::AppState;

/// GET /api/products - List all products.
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Vec<ProductView>> {
    success(state.store.products().await)
}

/// POST /api/products - Add a new product.
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> ApiResult<ProductView> {
    let product = state.store.add_product(&request.name, request.price).await?;
    success(product)
}

/// PUT /api/products/:name - Edit a product.
pub async fn update_product(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<UpdateProductRequest>,
) -> ApiResult<ProductView> {
    let product = state
        .store
        .upsert_product(&name, &request.new_name, request.price)
        .await?;
    success(product)
}
