//! Order model and the order-facing API request/response types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An accepted order as stored in the document's append-only log.
///
/// `total_price` is frozen at acceptance time; later catalog price edits
/// never change past orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// RFC 3339 timestamp stamped when the order was accepted.
    pub datetime: String,
    /// Product name to quantity; quantities are always greater than zero.
    pub products: BTreeMap<String, u32>,
    pub total_price: f64,
}

/// Request body for placing an order.
///
/// Zero-quantity entries in `items` are allowed and ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub client_name: String,
    pub items: BTreeMap<String, u32>,
}

/// Response body for an accepted order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub client_name: String,
    pub datetime: String,
    pub products: BTreeMap<String, u32>,
    pub total_price: f64,
    pub remaining_credit: f64,
}

/// A single entry in a client's order report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub datetime: String,
    pub products: BTreeMap<String, u32>,
    pub total_price: f64,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            datetime: order.datetime.clone(),
            products: order.products.clone(),
            total_price: order.total_price,
        }
    }
}
