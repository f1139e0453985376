//! Integration tests for the Order Desk backend.

use std::sync::Arc;

use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::store::Store;
use crate::{create_router, AppState};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_path = temp_dir.path().join("orders.json");

        // Open the store on a fresh file; defaults get seeded
        let store = Arc::new(Store::open(&data_path).await.expect("Failed to open store"));

        let state = AppState { store };
        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Add a client and a product used by most order tests.
    async fn with_catalog_entry(&self) {
        let resp = self
            .client
            .post(self.url("/api/clients"))
            .json(&json!({ "name": "X", "initialCredit": 1000.0 }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let resp = self
            .client
            .post(self.url("/api/products"))
            .json(&json!({ "name": "A", "price": 200.0 }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_defaults_seeded_on_first_boot() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/clients"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    let clients = body["data"].as_array().unwrap();
    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0]["name"], "Client1");
    assert_eq!(clients[0]["credit"].as_f64().unwrap(), 1000.0);
    assert_eq!(clients[0]["initialCredit"].as_f64().unwrap(), 1000.0);
    assert_eq!(clients[1]["name"], "Client2");
    assert_eq!(clients[1]["credit"].as_f64().unwrap(), 1500.0);

    let resp = fixture
        .client
        .get(fixture.url("/api/products"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let products = body["data"].as_array().unwrap();
    assert_eq!(products.len(), 3);
    assert_eq!(products[0]["name"], "Product1");
    assert_eq!(products[0]["price"].as_f64().unwrap(), 200.0);
}

#[tokio::test]
async fn test_place_order_debits_credit() {
    let fixture = TestFixture::new().await;
    fixture.with_catalog_entry().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/orders"))
        .json(&json!({ "clientName": "X", "items": { "A": 3 } }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["clientName"], "X");
    assert_eq!(body["data"]["totalPrice"].as_f64().unwrap(), 600.0);
    assert_eq!(body["data"]["remainingCredit"].as_f64().unwrap(), 400.0);
    assert_eq!(body["data"]["products"]["A"], 3);
    assert!(body["data"]["datetime"].is_string());

    // Debit is visible on the client resource
    let resp = fixture
        .client
        .get(fixture.url("/api/clients/X"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["credit"].as_f64().unwrap(), 400.0);
    assert_eq!(body["data"]["initialCredit"].as_f64().unwrap(), 1000.0);
}

#[tokio::test]
async fn test_insufficient_credit_is_rejected() {
    let fixture = TestFixture::new().await;
    fixture.with_catalog_entry().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/orders"))
        .json(&json!({ "clientName": "X", "items": { "A": 6 } }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "INSUFFICIENT_CREDIT");
    assert_eq!(
        body["error"]["details"]["availableCredit"].as_f64().unwrap(),
        1000.0
    );
    assert_eq!(
        body["error"]["details"]["requestedTotal"].as_f64().unwrap(),
        1200.0
    );

    // Credit unchanged, no order recorded
    let resp = fixture
        .client
        .get(fixture.url("/api/clients/X"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["credit"].as_f64().unwrap(), 1000.0);

    let resp = fixture
        .client
        .get(fixture.url("/api/orders/X"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_zero_quantity_items_are_excluded() {
    let fixture = TestFixture::new().await;
    fixture.with_catalog_entry().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/orders"))
        .json(&json!({
            "clientName": "X",
            "items": { "A": 2, "Product1": 0, "Product2": 0 }
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let products = body["data"]["products"].as_object().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products["A"], 2);
    assert_eq!(body["data"]["totalPrice"].as_f64().unwrap(), 400.0);
}

#[tokio::test]
async fn test_reset_credit_restores_initial() {
    let fixture = TestFixture::new().await;
    fixture.with_catalog_entry().await;

    fixture
        .client
        .post(fixture.url("/api/orders"))
        .json(&json!({ "clientName": "X", "items": { "A": 3 } }))
        .send()
        .await
        .unwrap();

    let resp = fixture
        .client
        .post(fixture.url("/api/clients/X/reset-credit"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["credit"].as_f64().unwrap(), 1000.0);

    // Resetting again is a no-op
    let resp = fixture
        .client
        .post(fixture.url("/api/clients/X/reset-credit"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["credit"].as_f64().unwrap(), 1000.0);
}

#[tokio::test]
async fn test_order_report_lists_history() {
    let fixture = TestFixture::new().await;
    fixture.with_catalog_entry().await;

    fixture
        .client
        .post(fixture.url("/api/orders"))
        .json(&json!({ "clientName": "X", "items": { "A": 3 } }))
        .send()
        .await
        .unwrap();
    fixture
        .client
        .post(fixture.url("/api/orders"))
        .json(&json!({ "clientName": "X", "items": { "A": 1 } }))
        .send()
        .await
        .unwrap();

    let resp = fixture
        .client
        .get(fixture.url("/api/orders/X"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let orders = body["data"].as_array().unwrap();
    assert_eq!(orders.len(), 2);
    // Chronological order
    assert_eq!(orders[0]["totalPrice"].as_f64().unwrap(), 600.0);
    assert_eq!(orders[1]["totalPrice"].as_f64().unwrap(), 200.0);
    assert_eq!(orders[0]["products"]["A"], 3);
    assert!(orders[0]["datetime"].is_string());
}

#[tokio::test]
async fn test_validation_error_codes() {
    let fixture = TestFixture::new().await;

    // Blank client name
    let resp = fixture
        .client
        .post(fixture.url("/api/clients"))
        .json(&json!({ "name": "   ", "initialCredit": 500.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "EMPTY_NAME");

    // Duplicate client name (Client1 is seeded)
    let resp = fixture
        .client
        .post(fixture.url("/api/clients"))
        .json(&json!({ "name": "Client1", "initialCredit": 500.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "DUPLICATE_NAME");

    // Same pattern for products
    let resp = fixture
        .client
        .post(fixture.url("/api/products"))
        .json(&json!({ "name": "", "price": 50.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = fixture
        .client
        .post(fixture.url("/api/products"))
        .json(&json!({ "name": "Product1", "price": 50.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
}

#[tokio::test]
async fn test_update_client_renames_and_resets_credit() {
    let fixture = TestFixture::new().await;
    fixture.with_catalog_entry().await;

    // Spend some credit first
    fixture
        .client
        .post(fixture.url("/api/orders"))
        .json(&json!({ "clientName": "X", "items": { "A": 3 } }))
        .send()
        .await
        .unwrap();

    let resp = fixture
        .client
        .put(fixture.url("/api/clients/X"))
        .json(&json!({ "newName": "Y", "initialCredit": 1000.0 }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["name"], "Y");
    assert_eq!(body["data"]["credit"].as_f64().unwrap(), 1000.0);

    // Old name is gone
    let resp = fixture
        .client
        .get(fixture.url("/api/clients/X"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    // Order history followed the rename
    let resp = fixture
        .client
        .get(fixture.url("/api/orders/Y"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Renaming onto another existing client is rejected
    let resp = fixture
        .client
        .put(fixture.url("/api/clients/Y"))
        .json(&json!({ "newName": "Client1", "initialCredit": 1000.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "DUPLICATE_NAME");
}

#[tokio::test]
async fn test_update_product_reprices_future_orders_only() {
    let fixture = TestFixture::new().await;
    fixture.with_catalog_entry().await;

    fixture
        .client
        .post(fixture.url("/api/orders"))
        .json(&json!({ "clientName": "X", "items": { "A": 1 } }))
        .send()
        .await
        .unwrap();

    let resp = fixture
        .client
        .put(fixture.url("/api/products/A"))
        .json(&json!({ "newName": "A", "price": 300.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // New orders use the new price
    let resp = fixture
        .client
        .post(fixture.url("/api/orders"))
        .json(&json!({ "clientName": "X", "items": { "A": 1 } }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["totalPrice"].as_f64().unwrap(), 300.0);

    // The recorded total of the earlier order is unchanged
    let resp = fixture
        .client
        .get(fixture.url("/api/orders/X"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let orders = body["data"].as_array().unwrap();
    assert_eq!(orders[0]["totalPrice"].as_f64().unwrap(), 200.0);
    assert_eq!(orders[1]["totalPrice"].as_f64().unwrap(), 300.0);
}

#[tokio::test]
async fn test_not_found_errors() {
    let fixture = TestFixture::new().await;

    // Unknown client on every order path
    let resp = fixture
        .client
        .post(fixture.url("/api/orders"))
        .json(&json!({ "clientName": "Ghost", "items": { "Product1": 1 } }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let resp = fixture
        .client
        .get(fixture.url("/api/orders/Ghost"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = fixture
        .client
        .get(fixture.url("/api/clients/Ghost"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    // Unknown product inside an order
    let resp = fixture
        .client
        .post(fixture.url("/api/orders"))
        .json(&json!({ "clientName": "Client1", "items": { "Nothing": 1 } }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = fixture
        .client
        .post(fixture.url("/api/clients/Ghost/reset-credit"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_document_endpoint_returns_persisted_shape() {
    let fixture = TestFixture::new().await;
    fixture.with_catalog_entry().await;

    fixture
        .client
        .post(fixture.url("/api/orders"))
        .json(&json!({ "clientName": "X", "items": { "A": 2 } }))
        .send()
        .await
        .unwrap();

    let resp = fixture
        .client
        .get(fixture.url("/api/document"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["schema_version"], 1);
    assert_eq!(
        body["data"]["clients"]["X"]["initial_credit"].as_f64().unwrap(),
        1000.0
    );
    assert_eq!(body["data"]["products"]["A"].as_f64().unwrap(), 200.0);
    let orders = body["data"]["orders"]["X"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["total_price"].as_f64().unwrap(), 400.0);
}
