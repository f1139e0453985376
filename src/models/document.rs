//! The root persisted document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Client, Order};

/// Current schema version written to new documents.
pub const SCHEMA_VERSION: u32 = 1;

/// The whole persisted state: clients, product catalog, and order logs.
///
/// Serialization matches the data file byte layout; reading tolerates the
/// pre-versioned format (missing `schema_version` or `orders`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub clients: BTreeMap<String, Client>,
    /// Product name to unit price.
    #[serde(default)]
    pub products: BTreeMap<String, f64>,
    /// Client name to chronological order log.
    #[serde(default)]
    pub orders: BTreeMap<String, Vec<Order>>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl Default for Document {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            clients: BTreeMap::new(),
            products: BTreeMap::new(),
            orders: BTreeMap::new(),
        }
    }
}
