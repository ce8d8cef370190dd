//! Conversion response types

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{ConvertApiError, Result};

/// Result of a conversion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConversionResponse {
    /// Conversion cost charged by the service (seconds or credits)
    #[serde(default)]
    pub conversion_cost: u64,
    /// Conversion duration, reported by older service revisions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_time: Option<u64>,
    /// Output files
    #[serde(default)]
    pub files: Vec<ProcessedFile>,
}

impl ConversionResponse {
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Total size of all output files in bytes.
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.file_size).sum()
    }

    /// Output files carrying a retrieval URL.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.files.iter().filter_map(|f| f.url.as_deref())
    }
}

/// One output file of a conversion.
///
/// Depending on `StoreFile`, the service returns either a retrieval URL or
/// the file content inline as base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProcessedFile {
    pub file_name: String,
    #[serde(default)]
    pub file_ext: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_data: Option<String>,
}

impl ProcessedFile {
    /// Value to send when this file feeds another conversion: the file id
    /// when present, otherwise the URL.
    pub fn reference(&self) -> Option<&str> {
        self.file_id.as_deref().or(self.url.as_deref())
    }

    /// Decode the inline base64 content, if the service returned any.
    pub fn decode_data(&self) -> Result<Option<Vec<u8>>> {
        self.file_data
            .as_deref()
            .map(|data| {
                STANDARD.decode(data).map_err(|e| {
                    ConvertApiError::ParseError(format!(
                        "FileData of '{}' is not valid base64: {e}",
                        self.file_name
                    ))
                })
            })
            .transpose()
    }
}
