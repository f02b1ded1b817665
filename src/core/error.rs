//! Typed error handling for the order service
//!
//! Errors are grouped by the concern that produces them:
//!
//! - [`StoreError`]: the order store could not complete an operation
//! - [`ConfigError`]: the process environment is missing or has a bad value
//! - [`DispatchFault`]: a single outbound message was not accepted by the mail transport
//!
//! Only [`StoreError`] ever reaches a caller as a failed request, wrapped in
//! [`HoneybeeError`]. A [`ConfigError`] stops the process at startup. Dispatch
//! faults are reported next to a successful outcome, and field validation
//! problems are not errors at all
//! (see [`FieldErrors`](crate::core::validation::FieldErrors)).
//!
//! # Example
//!
//! ```rust,ignore
//! match workflow.submit(form).await {
//!     Ok(SubmissionOutcome::Accepted { order, .. }) => redirect(order),
//!     Ok(SubmissionOutcome::Rejected { form, errors }) => rerender(form, errors),
//!     Err(HoneybeeError::Persistence(e)) => tracing::error!("{e}"),
//!     Err(e) => return e.into_response(),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type surfaced by request handlers
#[derive(Debug, Error)]
pub enum HoneybeeError {
    /// The order could not be persisted
    #[error(transparent)]
    Persistence(#[from] StoreError),

    /// A page template failed to render
    #[error("failed to render page '{template}': {message}")]
    Render { template: String, message: String },
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl HoneybeeError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            HoneybeeError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HoneybeeError::Render { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            HoneybeeError::Persistence(e) => e.error_code(),
            HoneybeeError::Render { .. } => "RENDER_ERROR",
        }
    }

    /// Convert to an error response.
    ///
    /// Every variant is a server-side fault, so the message is opaque; the
    /// underlying cause only goes to the log.
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            HoneybeeError::Persistence(_) => {
                "Your order could not be saved. Please try again later."
            }
            HoneybeeError::Render { .. } => {
                "Something went wrong on our side. Please try again later."
            }
        };
        ErrorResponse {
            code: self.error_code().to_string(),
            message: message.to_string(),
        }
    }
}

impl IntoResponse for HoneybeeError {
    fn into_response(self) -> Response {
        tracing::error!(code = self.error_code(), error = %self, "request failed");
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by an [`OrderStore`](crate::core::OrderStore) implementation
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be reached
    #[error("{backend} connection error: {message}")]
    Connection { backend: String, message: String },

    /// An operation was attempted and failed; nothing was written
    #[error("failed to {operation} order: {message}")]
    OperationFailed { operation: String, message: String },

    /// A stored row could not be decoded
    #[error("stored order is corrupt: {message}")]
    Corrupt { message: String },
}

impl StoreError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::Connection { .. } => "STORAGE_CONNECTION_ERROR",
            StoreError::OperationFailed { .. } => "STORAGE_OPERATION_FAILED",
            StoreError::Corrupt { .. } => "STORAGE_CORRUPT_RECORD",
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors raised while loading [`AppConfig`](crate::config::AppConfig).
///
/// Always fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required environment variable is not set (or is empty)
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),

    /// An environment variable has an invalid value
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

// =============================================================================
// Dispatch Faults
// =============================================================================

/// Why one outbound message was not delivered to the mail transport
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DispatchFault {
    /// The transport could not be reached
    #[error("mail transport unreachable: {message}")]
    Connection { message: String },

    /// A header (address, subject) was refused as malformed
    #[error("malformed mail header: {message}")]
    MalformedHeader { message: String },

    /// The transport refused the recipient or the message
    #[error("mail transport rejected the message: {message}")]
    Rejected { message: String },

    /// The transport did not answer within the configured bound
    #[error("mail transport timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },

    /// The message body could not be rendered, so nothing was sent
    #[error("failed to compose message: {message}")]
    Compose { message: String },
}

impl DispatchFault {
    /// Short classification used in logs and monitoring events
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchFault::Connection { .. } => "connection",
            DispatchFault::MalformedHeader { .. } => "malformed_header",
            DispatchFault::Rejected { .. } => "rejected",
            DispatchFault::Timeout { .. } => "timeout",
            DispatchFault::Compose { .. } => "compose",
        }
    }
}
