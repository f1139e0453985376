//! Client API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{ClientView, CreateClientRequest, UpdateClientRequest};
use crate::AppState;

/// GET /api/clients - List all clients.
pub async fn list_clients(State(state): State<AppState>) -> ApiResult<Vec<ClientView>> {
    success(state.store.clients().await)
}

/// GET /api/clients/:name - Get a single client.
pub async fn get_client(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<ClientView> {
    match state.store.get_client(&name).await {
        Some(client) => success(client),
        None => Err(AppError::NotFound(format!("Client {} not found", name))),
    }
}

/// POST /api/clients - Add a new client.
pub async fn create_client(
    State(state): State<AppState>,
    Json(request): Json<CreateClientRequest>,
) -> ApiResult<ClientView> {
    let client = state
        .store
        .add_client(&request.name, request.initial_credit)
        .await?;
    success(client)
}

/// PUT /api/clients/:name - Edit a client.
///
/// The path segment is the name being edited; the body carries the new name
/// (possibly unchanged) and the new initial credit. Editing resets the
/// current credit to the new initial credit.
pub async fn update_client(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<UpdateClientRequest>,
) -> ApiResult<ClientView> {
    let client = state
        .store
        .upsert_client(&name, &request.new_name, request.initial_credit)
        .await?;
    success(client)
}

/// POST /api/clients/:name/reset-credit - Restore a client's initial credit.
pub async fn reset_client_credit(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<ClientView> {
    let client = state.store.reset_credit(&name).await?;
    success(client)
}
