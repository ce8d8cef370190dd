//! Type Conversions for ConvertApiError
//!
//! This module contains From trait implementations for converting
//! common error types into ConvertApiError.

use super::types::ConvertApiError;

impl From<reqwest::Error> for ConvertApiError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries credentials in its query.
        let err = err.without_url();
        if err.is_timeout() {
            Self::TimeoutError(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ConvertApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for ConvertApiError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}
