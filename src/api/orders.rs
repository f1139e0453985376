//! Order API endpoints: placement and the per-client report.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::models::{OrderReceipt, OrderView, PlaceOrderRequest};
use crate::AppState;

/// POST /api/orders - Place an order for a client.
pub async fn place_order(
    State(state): State<AppState>,
    Json(request): Json<PlaceOrderRequest>,
) -> ApiResult<OrderReceipt> {
    let placed = state
        .store
        .place_order(&request.client_name, &request.items)
        .await?;

    success(OrderReceipt {
        client_name: request.client_name,
        datetime: placed.order.datetime,
        products: placed.order.products,
        total_price: placed.order.total_price,
        remaining_credit: placed.remaining_credit,
    })
}

/// GET /api/orders/:name - A client's order history, oldest first.
pub async fn order_report(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Vec<OrderView>> {
    let orders = state.store.orders_for(&name).await?;
    success(orders.iter().map(OrderView::from).collect())
}
