//! Uploaded file descriptor

use serde::{Deserialize, Serialize};

/// Service-side handle for an uploaded file.
///
/// Returned by the upload endpoint and referenced by `FileId` in later
/// conversion requests. Descriptors are tied to the service's upload
/// session; the client never persists them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileDescriptor {
    pub file_id: String,
    pub file_name: String,
    pub file_ext: String,
    pub file_size: u64,
}

impl FileDescriptor {
    pub fn new(
        file_id: impl Into<String>,
        file_name: impl Into<String>,
        file_ext: impl Into<String>,
        file_size: u64,
    ) -> Self {
        Self {
            file_id: file_id.into(),
            file_name: file_name.into(),
            file_ext: file_ext.into(),
            file_size,
        }
    }
}
