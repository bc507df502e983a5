//! Error types for the SEO optimizer service.
//!
//! This module provides structured error handling with:
//! - `AppError`: Domain-specific errors for analysis and history operations
//! - `ErrorBody`: The JSON payload returned to HTTP callers
//! - `Result<T>`: Type alias for Results using AppError

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Message returned when a page offers nothing to analyze without JavaScript.
pub const EMPTY_CONTENT_MESSAGE: &str =
    "This page may require JavaScript to load. SEO data unavailable.";

// ============================================================================
// DOMAIN ERROR TYPE
// ============================================================================

/// Domain-specific errors for application operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request body missing or malformed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Page fetch failed or timed out
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Page carries no title and no meta tags (likely script-rendered)
    #[error("{}", EMPTY_CONTENT_MESSAGE)]
    EmptyContent,

    /// Store operation failed
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::NetworkError(msg.into())
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::DatabaseError(msg.into())
    }

    /// Client-caused failures map to 400, everything else to 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::EmptyContent => StatusCode::BAD_REQUEST,
            Self::NetworkError(_) | Self::DatabaseError(_) | Self::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

// ============================================================================
// HTTP ERROR PAYLOAD
// ============================================================================

/// JSON body sent to the caller on any failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("request failed: {:#}", self);
        } else {
            tracing::warn!("request rejected: {}", self);
        }
        let body = ErrorBody {
            error: format!("{:#}", self),
        };
        (status, Json(body)).into_response()
    }
}
