//! Data types exchanged with the service

pub mod conversion;
pub mod file;
pub mod user;

pub use conversion::{ConversionResponse, ProcessedFile};
pub use file::FileDescriptor;
pub use user::UserInfo;
