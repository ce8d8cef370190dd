//! Executors for service-side operations

pub mod files;

pub use files::{HttpUploadExecutor, UploadExecutor};
