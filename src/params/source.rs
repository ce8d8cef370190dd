//! Local file content awaiting upload

use std::fmt;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::{ConvertApiError, Result};

/// Upper bound for the buffer reserved up front for a stream; the declared
/// length is caller input and only grows the buffer as bytes arrive.
const MAX_PREALLOC: usize = 8 * 1024 * 1024;

/// Local content that must be uploaded before it can be converted.
pub enum FileSource {
    /// A file on disk
    Path(PathBuf),
    /// In-memory content
    Bytes { file_name: String, data: Bytes },
    /// A stream of known length; exactly `length` bytes are read
    Reader {
        file_name: String,
        reader: Box<dyn AsyncRead + Send + Unpin>,
        length: u64,
    },
}

impl FileSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn bytes(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self::Bytes {
            file_name: file_name.into(),
            data: data.into(),
        }
    }

    pub fn reader<R>(file_name: impl Into<String>, reader: R, length: u64) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        Self::Reader {
            file_name: file_name.into(),
            reader: Box::new(reader),
            length,
        }
    }

    /// Name sent to the upload endpoint.
    pub fn file_name(&self) -> String {
        match self {
            Self::Path(path) => file_name_of(path),
            Self::Bytes { file_name, .. } | Self::Reader { file_name, .. } => file_name.clone(),
        }
    }

    /// Read the whole content into memory.
    pub async fn into_content(self) -> Result<(String, Bytes)> {
        let file_name = self.file_name();
        let data = match self {
            Self::Path(path) => Bytes::from(tokio::fs::read(&path).await.map_err(|e| {
                ConvertApiError::IoError(format!("failed to read '{}': {e}", path.display()))
            })?),
            Self::Bytes { data, .. } => data,
            Self::Reader { reader, length, .. } => {
                let hint = usize::try_from(length).map_or(MAX_PREALLOC, |n| n.min(MAX_PREALLOC));
                let mut buf = Vec::with_capacity(hint);
                reader.take(length).read_to_end(&mut buf).await?;
                if buf.len() as u64 != length {
                    return Err(ConvertApiError::IoError(format!(
                        "stream for '{file_name}' ended after {} of {length} bytes",
                        buf.len()
                    )));
                }
                Bytes::from(buf)
            }
        };
        Ok((file_name, data))
    }
}

impl fmt::Debug for FileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Bytes { file_name, data } => f
                .debug_struct("Bytes")
                .field("file_name", file_name)
                .field("len", &data.len())
                .finish(),
            Self::Reader {
                file_name, length, ..
            } => f
                .debug_struct("Reader")
                .field("file_name", file_name)
                .field("length", length)
                .finish(),
        }
    }
}

impl From<PathBuf> for FileSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for FileSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string())
}
