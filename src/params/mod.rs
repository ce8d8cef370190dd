//! Conversion parameters
//!
//! A [`Param`] is a named value in one of three shapes:
//! - scalar: one or more strings, emitted as repeated text fields
//! - file content: local data that is uploaded first, then referenced by id
//! - file reference: already-uploaded descriptors, file ids or URLs
//!
//! Parameter names are sent verbatim; the request builder compares them
//! case-insensitively only when filtering reserved names and locating the
//! `converter` selector.

mod source;

use futures::future::try_join_all;

use crate::error::{ConvertApiError, Result};
use crate::execution::executors::files::UploadExecutor;
use crate::types::{ConversionResponse, FileDescriptor, ProcessedFile};

pub use source::FileSource;

/// A reference to a file the service can already reach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileRef {
    /// A descriptor returned by a previous upload
    Descriptor(FileDescriptor),
    /// A bare file id
    Id(String),
    /// A remote URL the service downloads itself
    Url(String),
}

impl From<FileDescriptor> for FileRef {
    fn from(descriptor: FileDescriptor) -> Self {
        Self::Descriptor(descriptor)
    }
}

impl ProcessedFile {
    /// Reference to this output for use in a follow-up conversion.
    ///
    /// Outputs with a file id become descriptors (so the source format can
    /// be inferred from them); URL-only outputs become URL references.
    pub fn as_file_ref(&self) -> Option<FileRef> {
        match (&self.file_id, &self.url) {
            (Some(id), _) => Some(FileRef::Descriptor(FileDescriptor::new(
                id.clone(),
                self.file_name.clone(),
                self.file_ext.clone(),
                self.file_size,
            ))),
            (None, Some(url)) => Some(FileRef::Url(url.clone())),
            (None, None) => None,
        }
    }

    /// Parameter referencing this output.
    pub fn as_param(&self, name: impl Into<String>) -> Option<Param> {
        self.as_file_ref()
            .map(|r| Param::references(name, std::iter::once(r)))
    }
}

/// Parameter value, one variant per shape.
#[derive(Debug)]
pub enum ParamValue {
    Scalar(Vec<String>),
    FileContent(Vec<FileSource>),
    FileReference(Vec<FileRef>),
}

/// A named conversion parameter.
#[derive(Debug)]
pub struct Param {
    name: String,
    value: ParamValue,
}

/// Value contributed to the request body by a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContributionValue {
    Text(String),
    File(FileDescriptor),
}

impl ContributionValue {
    /// Text emitted for this value: the string itself or the file id.
    pub fn as_field_value(&self) -> &str {
        match self {
            Self::Text(s) => s,
            Self::File(d) => &d.file_id,
        }
    }
}

/// One name/value pair contributed by a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    pub name: String,
    pub value: ContributionValue,
}

impl Param {
    pub fn with_value(name: impl Into<String>, value: ParamValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Single-valued scalar.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_value(name, ParamValue::Scalar(vec![value.into()]))
    }

    /// Multi-valued scalar, emitted as repeated fields.
    pub fn values<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_value(
            name,
            ParamValue::Scalar(values.into_iter().map(Into::into).collect()),
        )
    }

    /// File on disk, uploaded before the conversion.
    pub fn file(name: impl Into<String>, path: impl Into<std::path::PathBuf>) -> Self {
        Self::with_value(name, ParamValue::FileContent(vec![FileSource::path(path)]))
    }

    /// Several files on disk, uploaded concurrently.
    pub fn files<I, P>(name: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<std::path::PathBuf>,
    {
        Self::sources(name, paths.into_iter().map(FileSource::path))
    }

    /// In-memory content, uploaded before the conversion.
    pub fn bytes(
        name: impl Into<String>,
        file_name: impl Into<String>,
        data: impl Into<bytes::Bytes>,
    ) -> Self {
        Self::with_value(
            name,
            ParamValue::FileContent(vec![FileSource::bytes(file_name, data)]),
        )
    }

    /// Stream of known length, uploaded before the conversion.
    pub fn reader<R>(name: impl Into<String>, file_name: impl Into<String>, reader: R, length: u64) -> Self
    where
        R: tokio::io::AsyncRead + Send + Unpin + 'static,
    {
        Self::with_value(
            name,
            ParamValue::FileContent(vec![FileSource::reader(file_name, reader, length)]),
        )
    }

    pub fn sources(name: impl Into<String>, sources: impl IntoIterator<Item = FileSource>) -> Self {
        Self::with_value(name, ParamValue::FileContent(sources.into_iter().collect()))
    }

    /// Already uploaded file, by id.
    pub fn file_id(name: impl Into<String>, file_id: impl Into<String>) -> Self {
        Self::references(name, [FileRef::Id(file_id.into())])
    }

    /// Remote file the service downloads itself.
    pub fn url(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::references(name, [FileRef::Url(url.into())])
    }

    /// Descriptor from a previous upload.
    pub fn descriptor(name: impl Into<String>, descriptor: FileDescriptor) -> Self {
        Self::references(name, [FileRef::Descriptor(descriptor)])
    }

    pub fn references(name: impl Into<String>, refs: impl IntoIterator<Item = FileRef>) -> Self {
        Self::with_value(name, ParamValue::FileReference(refs.into_iter().collect()))
    }

    /// Feed every output of a previous conversion into this parameter.
    pub fn from_response(name: impl Into<String>, response: &ConversionResponse) -> Self {
        Self::references(
            name,
            response.files.iter().filter_map(ProcessedFile::as_file_ref),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &ParamValue {
        &self.value
    }

    /// True if contributing this parameter triggers uploads.
    pub fn needs_upload(&self) -> bool {
        matches!(&self.value, ParamValue::FileContent(s) if !s.is_empty())
    }

    /// Turn this parameter into body contributions, uploading file content
    /// through `uploader` (several sources are uploaded concurrently, results
    /// keep source order).
    pub async fn contribute(self, uploader: &dyn UploadExecutor) -> Result<Vec<Contribution>> {
        let name = self.name;
        let values: Vec<ContributionValue> = match self.value {
            ParamValue::Scalar(values) => values.into_iter().map(ContributionValue::Text).collect(),
            ParamValue::FileContent(sources) => {
                let uploads = sources.into_iter().map(|source| {
                    let file = source.file_name();
                    async move {
                        uploader
                            .upload(source)
                            .await
                            .map(ContributionValue::File)
                            .map_err(|e| ConvertApiError::upload_error(file, e))
                    }
                });
                try_join_all(uploads).await?
            }
            ParamValue::FileReference(refs) => refs
                .into_iter()
                .map(|r| match r {
                    FileRef::Descriptor(d) => ContributionValue::File(d),
                    FileRef::Id(s) | FileRef::Url(s) => ContributionValue::Text(s),
                })
                .collect(),
        };
        Ok(values
            .into_iter()
            .map(|value| Contribution {
                name: name.clone(),
                value,
            })
            .collect())
    }
}
