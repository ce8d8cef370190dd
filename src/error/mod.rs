//! Error Handling Module
//!
//! This module provides the error type shared by every part of the client:
//! - Core error types (`ConvertApiError`, `ErrorCategory`)
//! - The service's JSON error body (`ServiceErrorDetails`)
//! - Type conversions from common error types
//!
//! # Example
//!
//! ```rust,ignore
//! use convertapi::error::{ConvertApiError, ErrorCategory};
//!
//! let error = ConvertApiError::service_error(401, "Unauthorized", "Conversion failed", "{}");
//! assert_eq!(error.category(), ErrorCategory::Service);
//! assert_eq!(error.status_code(), Some(401));
//! ```

mod conversions;
pub mod types;

pub use types::*;
