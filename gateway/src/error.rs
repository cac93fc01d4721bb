//! Error handling for the Warehouse Inventory Management gateway
//!
//! Every failure leaving the gateway is a `{message, errors?}` JSON body;
//! nothing propagates to the client as an unhandled error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Unauthorized: missing token")]
    MissingToken,

    #[error("Failed to get current user")]
    IdentityUnresolved,

    // Configuration errors
    #[error("Backend API config is missing")]
    MissingBackendConfig,

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Validation errors (pre-network, nothing was forwarded)
    #[error("{0}")]
    Validation(String),

    // Upstream errors
    /// Backend answered with a non-2xx status; relayed as-is
    #[error("{message}")]
    Upstream {
        status: StatusCode,
        message: String,
        errors: Option<Value>,
    },

    /// The bounded call ran out of time
    #[error("{0}")]
    UpstreamTimeout(String),

    /// The backend could not be reached or sent garbage
    #[error("{0}")]
    Transport(String),

    // Document generation errors
    #[error("Failed to generate PDF: {0}")]
    Document(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error response body relayed to the client
#[derive(Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
}

impl ErrorBody {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::message("Unauthorized: missing token"),
            ),
            AppError::IdentityUnresolved => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::message("Failed to get current user"),
            ),
            AppError::MissingBackendConfig => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::message("Backend API config is missing"),
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::message(format!("Configuration error: {}", msg)),
            ),
            AppError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorBody::message(msg))
            }
            AppError::Upstream {
                status,
                message,
                errors,
            } => (
                *status,
                ErrorBody {
                    message: message.clone(),
                    errors: errors.clone(),
                },
            ),
            AppError::UpstreamTimeout(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::message(msg))
            }
            AppError::Transport(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::message(msg))
            }
            AppError::Document(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::message(format!("Failed to generate PDF: {}", msg)),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::message("An internal server error occurred"),
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
