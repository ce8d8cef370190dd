//! Core error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ConvertApiError>;

/// Coarse error kind, useful for deciding how to report a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Missing or invalid client configuration
    Configuration,
    /// Invalid caller input (unreadable file, bad parameter)
    Input,
    /// Network failure or local deadline exceeded before a response
    Transport,
    /// The service answered with a non-200 status
    Service,
    /// The service answered 200 but the body could not be decoded
    Decode,
    /// Caller-initiated cancellation
    Cancelled,
}

/// All errors returned by the ConvertAPI client.
#[derive(Debug, Error)]
pub enum ConvertApiError {
    /// Missing credentials, bad base URL or timeout
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A parameter could not be turned into request content
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Local I/O failed while reading file content
    #[error("IO error: {0}")]
    IoError(String),

    /// Network, DNS or TLS failure
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Local deadline exceeded before the exchange completed
    #[error("Timeout error: {0}")]
    TimeoutError(String),

    /// Non-200 HTTP response
    #[error("{message} (status {status})")]
    ServiceError {
        status: u16,
        reason: String,
        message: String,
        body: String,
    },

    /// Response body (or inline file data) could not be decoded
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The operation was cancelled by the caller
    #[error("Cancelled: {0}")]
    Cancelled(String),

    /// Uploading a file parameter failed; the conversion was not sent
    #[error("Upload of '{file}' failed: {source}")]
    UploadError {
        file: String,
        #[source]
        source: Box<ConvertApiError>,
    },
}

impl ConvertApiError {
    /// Build a `ServiceError` from the parts of an HTTP response.
    pub fn service_error(
        status: u16,
        reason: impl Into<String>,
        message: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self::ServiceError {
            status,
            reason: reason.into(),
            message: message.into(),
            body: body.into(),
        }
    }

    /// Wrap an error raised while uploading `file`.
    pub fn upload_error(file: impl Into<String>, source: ConvertApiError) -> Self {
        Self::UploadError {
            file: file.into(),
            source: Box::new(source),
        }
    }

    /// Error category (upload errors report the category of their cause).
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationError(_) => ErrorCategory::Configuration,
            Self::InvalidParameter(_) | Self::IoError(_) => ErrorCategory::Input,
            Self::HttpError(_) | Self::TimeoutError(_) => ErrorCategory::Transport,
            Self::ServiceError { .. } => ErrorCategory::Service,
            Self::ParseError(_) => ErrorCategory::Decode,
            Self::Cancelled(_) => ErrorCategory::Cancelled,
            Self::UploadError { source, .. } => source.category(),
        }
    }

    /// HTTP status of the service response, if one was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ServiceError { status, .. } => Some(*status),
            Self::UploadError { source, .. } => source.status_code(),
            _ => None,
        }
    }

    /// Raw response body of a service error.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::ServiceError { body, .. } => Some(body),
            Self::UploadError { source, .. } => source.response_body(),
            _ => None,
        }
    }

    /// Parse the service's JSON error object out of a service error body.
    ///
    /// Returns `None` for other variants or when the body is not the
    /// service's error shape.
    pub fn service_details(&self) -> Option<ServiceErrorDetails> {
        self.response_body()
            .and_then(|body| serde_json::from_str(body).ok())
    }

    pub fn is_cancelled(&self) -> bool {
        self.category() == ErrorCategory::Cancelled
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            Self::TimeoutError(_) => true,
            Self::UploadError { source, .. } => source.is_timeout(),
            _ => false,
        }
    }
}

/// Error object returned by the service in the body of a failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceErrorDetails {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_parameters: Option<serde_json::Value>,
}
