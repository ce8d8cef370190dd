//! Execution layer
//!
//! Transport, uploads and request composition used by the client.

pub mod executors;
pub mod http;
pub mod request;
