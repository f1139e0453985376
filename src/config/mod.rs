//! Configuration module for the Order Desk backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the JSON data file
    pub data_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let data_path = env::var("ORDERDESK_DATA_PATH")
            .unwrap_or_else(|_| "./data/orders.json".to_string())
            .into();

        let bind_addr = env::var("ORDERDESK_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid ORDERDESK_BIND_ADDR format");

        let log_level = env::var("ORDERDESK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            data_path,
            bind_addr,
            log_level,
        }
    }
}
