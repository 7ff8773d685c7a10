//! Client error types

use shared::error::{ErrorCode, format_missing_options};
use shared::order::OrderStatus;
use thiserror::Error;

/// Generic text shown when a request fails for reasons the user cannot act on
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Structured failure reported by the backend
    #[error("API error {code}: {message}")]
    Api { code: ErrorCode, message: String },

    /// Cart add rejected because required option types have no selection
    #[error("Missing required options: {}", .0.join(", "))]
    MissingOptions(Vec<String>),

    /// Status change the lifecycle does not offer
    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session file I/O
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Text for the user-facing notification
    pub fn user_message(&self) -> String {
        match self {
            ClientError::MissingOptions(names) => format_missing_options(names),
            ClientError::Unauthorized => "Your session has expired. Please sign in again.".into(),
            ClientError::Forbidden(_) => "You do not have permission to do that.".into(),
            ClientError::InvalidTransition { .. } => "This order can no longer be changed.".into(),
            ClientError::Validation(msg) | ClientError::Api { message: msg, .. }
                if !msg.trim().is_empty() =>
            {
                msg.clone()
            }
            _ => GENERIC_FAILURE.into(),
        }
    }

    /// Closest [`ErrorCode`] for logging and tests
    pub fn code(&self) -> ErrorCode {
        match self {
            ClientError::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            ClientError::Http(_) => ErrorCode::NetworkError,
            ClientError::InvalidResponse(_) | ClientError::Serialization(_) => {
                ErrorCode::InvalidFormat
            }
            ClientError::Unauthorized => ErrorCode::NotAuthenticated,
            ClientError::Forbidden(_) => ErrorCode::PermissionDenied,
            ClientError::NotFound(_) => ErrorCode::NotFound,
            ClientError::Validation(_) => ErrorCode::ValidationFailed,
            ClientError::Api { code, .. } => *code,
            ClientError::MissingOptions(_) => ErrorCode::MissingRequiredOptions,
            ClientError::InvalidTransition { .. } => ErrorCode::OrderStatusInvalid,
            ClientError::Config(_) => ErrorCode::ConfigError,
            ClientError::Internal(_) => ErrorCode::InternalError,
            ClientError::Io(_) => ErrorCode::StorageError,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
