//! Unified error types for PageKit.
//!
//! Every failure in the pagination pipeline is an [`AppError`] so that the
//! host framework can map it onto a response in one place.

use std::fmt;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::types::response::ApiErrorResponse;

/// Message carried by every [`ErrorKind::InvalidSort`] error.
pub const INVALID_SORT_MESSAGE: &str =
    "Invalid sort direction, expected one of: ascending, descending";

/// Top-level error kind categorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A `page` or `size` query value is not a valid integer.
    NumberFormat,
    /// An explicit sort direction is neither ascending nor descending.
    InvalidSort,
    /// A configuration error occurred.
    Configuration,
    /// An internal error occurred.
    Internal,
}

impl ErrorKind {
    /// HTTP status the host framework should answer with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NumberFormat | Self::InvalidSort => StatusCode::BAD_REQUEST,
            Self::Configuration | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the error was caused by request input.
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NumberFormat => write!(f, "NUMBER_FORMAT"),
            Self::InvalidSort => write!(f, "INVALID_SORT"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified error used throughout PageKit.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a number-format error naming the offending input.
    pub fn number_format(input: &str) -> Self {
        Self::new(
            ErrorKind::NumberFormat,
            format!("Invalid number format: '{input}' is not a valid integer"),
        )
    }

    /// Create an invalid-sort error.
    pub fn invalid_sort() -> Self {
        Self::new(ErrorKind::InvalidSort, INVALID_SORT_MESSAGE)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(kind = %self.kind, error = %self.message, "Internal server error");
        } else {
            tracing::debug!(kind = %self.kind, error = %self.message, "Rejected request");
        }

        (status, Json(ApiErrorResponse::from(&self))).into_response()
    }
}
