//! Error handling module for the Order Desk backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and response envelopes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const INSUFFICIENT_CREDIT: &str = "INSUFFICIENT_CREDIT";
    pub const DUPLICATE_NAME: &str = "DUPLICATE_NAME";
    pub const EMPTY_NAME: &str = "EMPTY_NAME";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const CORRUPT_DATA: &str = "CORRUPT_DATA";
    pub const IO_ERROR: &str = "IO_ERROR";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Order total exceeds the client's available credit
    InsufficientCredit { available: f64, requested: f64 },
    /// A client or product with the requested name already exists
    DuplicateName(String),
    /// A client or product name was blank after trimming
    EmptyName(String),
    /// Client or product not found
    NotFound(String),
    /// The data file exists but does not parse
    CorruptData(String),
    /// Filesystem failure while reading or writing the data file
    Io(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InsufficientCredit { .. } => StatusCode::CONFLICT,
            AppError::DuplicateName(_) => StatusCode::CONFLICT,
            AppError::EmptyName(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::CorruptData(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InsufficientCredit { .. } => codes::INSUFFICIENT_CREDIT,
            AppError::DuplicateName(_) => codes::DUPLICATE_NAME,
            AppError::EmptyName(_) => codes::EMPTY_NAME,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::CorruptData(_) => codes::CORRUPT_DATA,
            AppError::Io(_) => codes::IO_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::InsufficientCredit {
                available,
                requested,
            } => format!(
                "Insufficient credit: order total {} exceeds available credit {}",
                requested, available
            ),
            AppError::DuplicateName(msg) => msg.clone(),
            AppError::EmptyName(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::CorruptData(msg) => msg.clone(),
            AppError::Io(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("I/O error: {:?}", err);
        AppError::Io(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::CorruptData(format!("JSON error: {}", err))
    }
}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        let details = match error {
            AppError::InsufficientCredit {
                available,
                requested,
            } => Some(serde_json::json!({
                "availableCredit": available,
                "requestedTotal": requested,
            })),
            _ => None,
        };

        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
                details,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(&self);
        (status, Json(body)).into_response()
    }
}
