//! Data models for the Order Desk application.
//!
//! The document types mirror the persisted JSON file exactly; the request
//! and response types follow the camelCase contract of the HTTP API.

mod client;
mod document;
mod order;
mod product;

pub use client::*;
pub use document::*;
pub use order::*;
pub use product::*;
