//! In-memory multipart body.
//!
//! Parts are kept in insertion order so that the emitted form is
//! deterministic and can be inspected by custom transports before it is
//! turned into a `reqwest::multipart::Form`.

use bytes::Bytes;

use crate::error::Result;

/// Content of a single multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartContent {
    /// Plain text field
    Text(String),
    /// File field with a filename and content type
    File {
        file_name: String,
        content_type: String,
        data: Bytes,
    },
}

/// A named multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartPart {
    pub name: String,
    pub content: PartContent,
}

impl MultipartPart {
    /// Text value of the part, if it is a text field.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            PartContent::Text(s) => Some(s),
            PartContent::File { .. } => None,
        }
    }
}

/// Ordered multipart/form-data body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartBody {
    parts: Vec<MultipartPart>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_text(name, value);
        self
    }

    /// Append a file field.
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        self.parts.push(MultipartPart {
            name: name.into(),
            content: PartContent::File {
                file_name: file_name.into(),
                content_type: content_type.into(),
                data: data.into(),
            },
        });
        self
    }

    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parts.push(MultipartPart {
            name: name.into(),
            content: PartContent::Text(value.into()),
        });
    }

    pub fn parts(&self) -> &[MultipartPart] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Text values of every part named exactly `name`, in order.
    pub fn text_values(&self, name: &str) -> Vec<&str> {
        self.parts
            .iter()
            .filter(|p| p.name == name)
            .filter_map(MultipartPart::text)
            .collect()
    }

    /// Returns true if a part with this name exists (case-insensitive).
    pub fn contains_ignore_case(&self, name: &str) -> bool {
        self.parts.iter().any(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Field names in emission order.
    pub fn names(&self) -> Vec<&str> {
        self.parts.iter().map(|p| p.name.as_str()).collect()
    }

    /// Convert into a reqwest form, preserving part order.
    pub fn into_form(self) -> Result<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for part in self.parts {
            form = match part.content {
                PartContent::Text(value) => form.text(part.name, value),
                PartContent::File {
                    file_name,
                    content_type,
                    data,
                } => {
                    let length = data.len() as u64;
                    let file_part = reqwest::multipart::Part::stream_with_length(data, length)
                        .file_name(file_name)
                        .mime_str(&content_type)?;
                    form.part(part.name, file_part)
                }
            };
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order_and_repeated_names() {
        let body = MultipartBody::new()
            .text("StoreFile", "true")
            .text("Files", "a")
            .text("PageRange", "1-3")
            .text("Files", "b");
        assert_eq!(body.names(), vec!["StoreFile", "Files", "PageRange", "Files"]);
        assert_eq!(body.text_values("Files"), vec!["a", "b"]);
        assert!(body.contains_ignore_case("pagerange"));
        assert!(!body.contains_ignore_case("converter"));
    }

    #[test]
    fn file_parts_have_no_text_value() {
        let body = MultipartBody::new().file("file", "a.pdf", "application/pdf", vec![1u8, 2, 3]);
        assert_eq!(body.len(), 1);
        assert!(body.text_values("file").is_empty());
        match &body.parts()[0].content {
            PartContent::File { file_name, data, .. } => {
                assert_eq!(file_name, "a.pdf");
                assert_eq!(data.len(), 3);
            }
            other => panic!("unexpected part: {other:?}"),
        }
    }

    #[test]
    fn converts_to_reqwest_form() {
        let body = MultipartBody::new()
            .text("StoreFile", "true")
            .file("file", "a.pdf", "application/pdf", vec![1u8]);
        let form = body.into_form().expect("valid form");
        assert!(!form.boundary().is_empty());
    }

    #[test]
    fn rejects_invalid_content_type() {
        let body = MultipartBody::new().file("file", "a", "not a mime", vec![1u8]);
        assert!(body.into_form().is_err());
    }
}
