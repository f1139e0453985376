//! Document API endpoints.

use axum::extract::State;

use super::{success, ApiResult};
use crate::models::Document;
use crate::AppState;

/// GET /api/document - Get the full document in its persisted shape.
pub async fn get_document(State(state): State<AppState>) -> ApiResult<Document> {
    success(state.store.document().await)
}
