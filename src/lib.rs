//! # ConvertAPI - async client for the ConvertAPI conversion service
//!
//! Converts files between formats (PDF, DOCX, images, ...) by delegating
//! the work to the remote service. Local files are uploaded first, the
//! conversion is posted as a multipart form, and the decoded result lists
//! the produced files.
//!
#![deny(unsafe_code)]

//! ## Quick Start
//!
//! ```rust,no_run
//! use convertapi::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ConvertApi::builder()
//!         .secret("your-api-secret")
//!         .timeout_secs(120)
//!         .build()?;
//!
//!     // `*` lets the service infer the source format from the uploaded file
//!     let result = client
//!         .convert("*", "pdf", vec![Param::file("File", "report.docx")])
//!         .await?;
//!     for file in &result.files {
//!         println!("{} ({} bytes): {:?}", file.file_name, file.file_size, file.url);
//!     }
//!
//!     let user = client.get_user().await?;
//!     println!("{} seconds left", user.seconds_left);
//!     Ok(())
//! }
//! ```
//!
//! ## Chaining conversions
//!
//! Outputs of one conversion can feed the next without downloading them:
//!
//! ```rust,no_run
//! use convertapi::prelude::*;
//!
//! # async fn run(client: ConvertApi) -> Result<(), ConvertApiError> {
//! let pdf = client
//!     .convert("docx", "pdf", vec![Param::file("File", "a.docx")])
//!     .await?;
//! let merged = client
//!     .convert("pdf", "merge", vec![Param::from_response("Files", &pdf)])
//!     .await?;
//! # let _ = merged;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod client;
pub mod config;
pub mod defaults;
pub mod error;
pub mod execution;
pub mod params;
pub mod types;
pub mod utils;

pub use builder::ConvertApiBuilder;
pub use client::ConvertApi;
pub use config::{ConvertApiConfig, Credentials};
pub use error::{ConvertApiError, ErrorCategory, Result, ServiceErrorDetails};
pub use execution::http::{HttpTransport, HttpTransportRequest, HttpTransportResponse, ReqwestTransport};
pub use params::{FileRef, FileSource, Param, ParamValue};
pub use types::{ConversionResponse, FileDescriptor, ProcessedFile, UserInfo};
pub use utils::{CancelHandle, new_cancel_handle};

/// Commonly used imports.
pub mod prelude {
    pub use crate::builder::ConvertApiBuilder;
    pub use crate::client::ConvertApi;
    pub use crate::error::{ConvertApiError, Result};
    pub use crate::params::{FileRef, FileSource, Param};
    pub use crate::types::{ConversionResponse, FileDescriptor, ProcessedFile, UserInfo};
    pub use crate::utils::{CancelHandle, new_cancel_handle};
}
