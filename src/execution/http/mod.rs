//! HTTP layer: multipart bodies and the injectable transport

pub mod multipart;
pub mod transport;

pub use multipart::{MultipartBody, MultipartPart, PartContent};
pub use transport::{HttpTransport, HttpTransportRequest, HttpTransportResponse, ReqwestTransport};
