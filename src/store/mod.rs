//! Document store for JSON-file persistence.
//!
//! The data file is the source of truth: it is read whole once at startup
//! and rewritten whole after every mutating operation. Writes go to a
//! sibling temp file first and are renamed into place so a crash cannot
//! truncate the document.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::ledger::{self, PlacedOrder};
use crate::models::{ClientView, Document, Order, ProductView};

/// Owns the persisted document and the path it lives at.
///
/// Mutating operations hold the write lock across the ledger transition
/// and the save, so the file always reflects a serial history.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    doc: RwLock<Document>,
}

impl Store {
    /// Load the document and seed defaults into empty collections.
    ///
    /// A missing file yields the empty skeleton; a file that exists but
    /// does not parse is a fatal [`AppError::CorruptData`].
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        let mut doc = load_document(&path).await?;

        let seeded = ledger::bootstrap_defaults(&mut doc);
        let store = Self {
            path,
            doc: RwLock::new(doc),
        };
        if seeded {
            let doc = store.doc.read().await;
            store.persist(&doc).await?;
            tracing::info!("Seeded default clients and products");
        }

        Ok(store)
    }

    /// Cloned snapshot of the whole document.
    pub async fn document(&self) -> Document {
        self.doc.read().await.clone()
    }

    /// All clients, sorted by name.
    pub async fn clients(&self) -> Vec<ClientView> {
        let doc = self.doc.read().await;
        doc.clients
            .iter()
            .map(|(name, client)| ClientView::new(name, *client))
            .collect()
    }

    /// A single client by name.
    pub async fn get_client(&self, name: &str) -> Option<ClientView> {
        let doc = self.doc.read().await;
        doc.clients
            .get(name)
            .map(|client| ClientView::new(name, *client))
    }

    /// All products, sorted by name.
    pub async fn products(&self) -> Vec<ProductView> {
        let doc = self.doc.read().await;
        doc.products
            .iter()
            .map(|(name, price)| ProductView {
                name: name.clone(),
                price: *price,
            })
            .collect()
    }

    /// A client's order log, oldest first.
    pub async fn orders_for(&self, client_name: &str) -> Result<Vec<Order>, AppError> {
        let doc = self.doc.read().await;
        ledger::orders_for(&doc, client_name).map(<[Order]>::to_vec)
    }

    /// Validate, settle, and record an order.
    pub async fn place_order(
        &self,
        client_name: &str,
        items: &BTreeMap<String, u32>,
    ) -> Result<PlacedOrder, AppError> {
        let mut doc = self.doc.write().await;
        let placed = ledger::place_order(&mut doc, client_name, items)?;
        self.persist(&doc).await?;
        Ok(placed)
    }

    /// Restore a client's credit to its initial value.
    pub async fn reset_credit(&self, client_name: &str) -> Result<ClientView, AppError> {
        let mut doc = self.doc.write().await;
        let client = ledger::reset_credit(&mut doc, client_name)?;
        self.persist(&doc).await?;
        Ok(ClientView::new(client_name, client))
    }

    /// Add a new client.
    pub async fn add_client(
        &self,
        name: &str,
        initial_credit: f64,
    ) -> Result<ClientView, AppError> {
        let mut doc = self.doc.write().await;
        let client = ledger::add_client(&mut doc, name, initial_credit)?;
        self.persist(&doc).await?;
        Ok(ClientView::new(name, client))
    }

    /// Edit a client (rename and/or replace its initial credit).
    pub async fn upsert_client(
        &self,
        old_name: &str,
        new_name: &str,
        initial_credit: f64,
    ) -> Result<ClientView, AppError> {
        let mut doc = self.doc.write().await;
        let client = ledger::upsert_client(&mut doc, old_name, new_name, initial_credit)?;
        self.persist(&doc).await?;
        Ok(ClientView::new(new_name, client))
    }

    /// Add a new product.
    pub async fn add_product(&self, name: &str, price: f64) -> Result<ProductView, AppError> {
        let mut doc = self.doc.write().await;
        ledger::add_product(&mut doc, name, price)?;
        self.persist(&doc).await?;
        Ok(ProductView {
            name: name.to_string(),
            price,
        })
    }

    /// Edit a product (rename and/or replace its price).
    pub async fn upsert_product(
        &self,
        old_name: &str,
        new_name: &str,
        price: f64,
    ) -> Result<ProductView, AppError> {
        let mut doc = self.doc.write().await;
        ledger::upsert_product(&mut doc, old_name, new_name, price)?;
        self.persist(&doc).await?;
        Ok(ProductView {
            name: new_name.to_string(),
            price,
        })
    }

    /// Serialize the full document and replace the data file atomically.
    async fn persist(&self, doc: &Document) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.ok();
        }

        let json = serde_json::to_string_pretty(doc)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, json.as_bytes()).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

/// Read and parse the data file; a missing file is the empty skeleton.
async fn load_document(path: &Path) -> Result<Document, AppError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
            AppError::CorruptData(format!("Corrupt data file {}: {}", path.display(), e))
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!("No data file at {}, starting empty", path.display());
            Ok(Document::default())
        }
        Err(e) => Err(AppError::Io(format!(
            "Failed to read data file {}: {}",
            path.display(),
            e
        ))),
    }
}
