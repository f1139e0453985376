//! Credit-and-order ledger rules.
//!
//! Pure in-memory transitions over a [`Document`]; persistence is the
//! store's job. Every operation either completes fully or leaves the
//! document untouched.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::errors::AppError;
use crate::models::{Client, Document, Order};

/// Clients seeded into an empty document on first boot.
const DEFAULT_CLIENTS: [(&str, f64); 2] = [("Client1", 1000.0), ("Client2", 1500.0)];

/// Products seeded into an empty catalog on first boot.
const DEFAULT_PRODUCTS: [(&str, f64); 3] =
    [("Product1", 200.0), ("Product2", 300.0), ("Product3", 400.0)];

/// An accepted order together with the client's balance after the debit.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order: Order,
    pub remaining_credit: f64,
}

/// Seed default clients and products into whichever collections are empty.
///
/// Each collection is seeded independently, so a file with clients but no
/// products still gets the default catalog. Returns whether anything
/// changed so the caller knows to persist.
pub fn bootstrap_defaults(doc: &mut Document) -> bool {
    let mut changed = false;

    if doc.clients.is_empty() {
        for (name, credit) in DEFAULT_CLIENTS {
            doc.clients.insert(
                name.to_string(),
                Client {
                    credit,
                    initial_credit: credit,
                },
            );
        }
        changed = true;
    }

    if doc.products.is_empty() {
        for (name, price) in DEFAULT_PRODUCTS {
            doc.products.insert(name.to_string(), price);
        }
        changed = true;
    }

    changed
}

/// Validate and settle an order.
///
/// Zero-quantity line items are dropped, never rejected. The order is
/// accepted when its total does not exceed the client's credit (exact
/// equality passes); on acceptance the credit is debited and the order is
/// appended to the client's log with the current UTC timestamp.
pub fn place_order(
    doc: &mut Document,
    client_name: &str,
    items: &BTreeMap<String, u32>,
) -> Result<PlacedOrder, AppError> {
    let client = doc
        .clients
        .get_mut(client_name)
        .ok_or_else(|| AppError::NotFound(format!("Client {} not found", client_name)))?;

    let mut selected = BTreeMap::new();
    let mut total = 0.0;
    for (product_name, &quantity) in items {
        if quantity == 0 {
            continue;
        }
        let price = doc
            .products
            .get(product_name)
            .copied()
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", product_name)))?;
        total += price * f64::from(quantity);
        selected.insert(product_name.clone(), quantity);
    }

    if total > client.credit {
        return Err(AppError::InsufficientCredit {
            available: client.credit,
            requested: total,
        });
    }

    client.credit -= total;
    let remaining_credit = client.credit;

    let order = Order {
        datetime: Utc::now().to_rfc3339(),
        products: selected,
        total_price: total,
    };
    doc.orders
        .entry(client_name.to_string())
        .or_default()
        .push(order.clone());

    Ok(PlacedOrder {
        order,
        remaining_credit,
    })
}

/// Restore a client's credit to its initial value. Idempotent.
pub fn reset_credit(doc: &mut Document, client_name: &str) -> Result<Client, AppError> {
    let client = doc
        .clients
        .get_mut(client_name)
        .ok_or_else(|| AppError::NotFound(format!("Client {} not found", client_name)))?;

    client.credit = client.initial_credit;
    Ok(*client)
}

/// Add a new client with the given starting credit.
pub fn add_client(doc: &mut Document, name: &str, initial_credit: f64) -> Result<Client, AppError> {
    if name.trim().is_empty() {
        return Err(AppError::EmptyName("Client name cannot be empty".to_string()));
    }
    if doc.clients.contains_key(name) {
        return Err(AppError::DuplicateName(format!(
            "Client {} already exists",
            name
        )));
    }

    let client = Client {
        credit: initial_credit,
        initial_credit,
    };
    doc.clients.insert(name.to_string(), client);
    Ok(client)
}

/// Edit a client: rename and/or replace its initial credit.
///
/// The entry under `old_name` is removed and `new_name` is written with
/// both balances set to `initial_credit`; the current credit resets on
/// every edit. A rename carries the order history to the new name.
pub fn upsert_client(
    doc: &mut Document,
    old_name: &str,
    new_name: &str,
    initial_credit: f64,
) -> Result<Client, AppError> {
    if new_name != old_name && doc.clients.contains_key(new_name) {
        return Err(AppError::DuplicateName(format!(
            "Client {} already exists",
            new_name
        )));
    }

    doc.clients.remove(old_name);
    let client = Client {
        credit: initial_credit,
        initial_credit,
    };
    doc.clients.insert(new_name.to_string(), client);

    if new_name != old_name {
        if let Some(history) = doc.orders.remove(old_name) {
            doc.orders
                .entry(new_name.to_string())
                .or_default()
                .extend(history);
        }
    }

    Ok(client)
}

/// Add a new product with the given unit price.
pub fn add_product(doc: &mut Document, name: &str, price: f64) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::EmptyName("Product name cannot be empty".to_string()));
    }
    if doc.products.contains_key(name) {
        return Err(AppError::DuplicateName(format!(
            "Product {} already exists",
            name
        )));
    }

    doc.products.insert(name.to_string(), price);
    Ok(())
}

/// Edit a product: rename and/or replace its price.
pub fn upsert_product(
    doc: &mut Document,
    old_name: &str,
    new_name: &str,
    price: f64,
) -> Result<(), AppError> {
    if new_name != old_name && doc.products.contains_key(new_name) {
        return Err(AppError::DuplicateName(format!(
            "Product {} already exists",
            new_name
        )));
    }

    doc.products.remove(old_name);
    doc.products.insert(new_name.to_string(), price);
    Ok(())
}

/// A client's order log, oldest first. Empty when no orders exist yet.
pub fn orders_for<'a>(doc: &'a Document, client_name: &str) -> Result<&'a [Order], AppError> {
    if !doc.clients.contains_key(client_name) {
        return Err(AppError::NotFound(format!(
            "Client {} not found",
            client_name
        )));
    }

    Ok(doc
        .orders
        .get(client_name)
        .map(Vec::as_slice)
        .unwrap_or(&[]))
}
