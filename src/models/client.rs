//! Client model and the client-facing API request/response types.

use serde::{Deserialize, Serialize};

/// A client's balance as stored in the document, keyed by name.
///
/// `initial_credit` is the balance that an explicit credit reset restores.
/// Older data files omit it; on read it defaults to the stored `credit`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ClientWire")]
pub struct Client {
    pub credit: f64,
    pub initial_credit: f64,
}

/// On-disk shape of a client entry before the back-compat default is applied.
#[derive(Debug, Clone, Copy, Deserialize)]
struct ClientWire {
    credit: f64,
    #[serde(default)]
    initial_credit: Option<f64>,
}

impl From<ClientWire> for Client {
    fn from(wire: ClientWire) -> Self {
        Self {
            credit: wire.credit,
            initial_credit: wire.initial_credit.unwrap_or(wire.credit),
        }
    }
}

/// A client together with its name, as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientView {
    pub name: String,
    pub credit: f64,
    pub initial_credit: f64,
}

impl ClientView {
    pub fn new(name: impl Into<String>, client: Client) -> Self {
        Self {
            name: name.into(),
            credit: client.credit,
            initial_credit: client.initial_credit,
        }
    }
}

/// Request body for adding a new client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    pub name: String,
    pub initial_credit: f64,
}

/// Request body for editing an existing client.
///
/// The path segment names the client being edited; `new_name` may equal it.
/// Editing always resets the current credit to the new initial credit.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientRequest {
    pub new_name: String,
    pub initial_credit: f64,
}
