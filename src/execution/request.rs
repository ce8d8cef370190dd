//! Conversion request builder.
//!
//! Turns `(from, to, params)` into a fully formed request:
//! 1. seed the body with `StoreFile=true` and `TimeOut=<configured>`;
//! 2. drop caller parameters with reserved names (case-insensitive);
//! 3. resolve every parameter into contributions, uploading file content
//!    concurrently while keeping parameter order;
//! 4. pull out the `converter` selector and infer a wildcard source format
//!    from the first file descriptor;
//! 5. freeze the URL `convert/<from>/to/<to>[/converter/<c>]?<auth>`.
//!
//! Contributions are collected before the URL is composed, so body emission
//! never mutates an already built URL.

use futures::future::try_join_all;

use crate::config::ConvertApiConfig;
use crate::defaults::{fields, service};
use crate::error::{ConvertApiError, Result};
use crate::execution::executors::files::UploadExecutor;
use crate::execution::http::multipart::MultipartBody;
use crate::params::{Contribution, ContributionValue, Param};

/// A conversion request ready for dispatch.
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    /// Absolute URL including the authentication query
    pub url: String,
    /// Source format after wildcard resolution
    pub from_format: String,
    pub to_format: String,
    pub converter: Option<String>,
    pub body: MultipartBody,
}

/// Builds [`ConvertRequest`]s against one configuration.
pub struct ConvertRequestBuilder<'a> {
    config: &'a ConvertApiConfig,
    uploader: &'a dyn UploadExecutor,
}

impl<'a> ConvertRequestBuilder<'a> {
    pub fn new(config: &'a ConvertApiConfig, uploader: &'a dyn UploadExecutor) -> Self {
        Self { config, uploader }
    }

    pub async fn build(
        &self,
        from_format: &str,
        to_format: &str,
        params: Vec<Param>,
    ) -> Result<ConvertRequest> {
        if from_format.trim().is_empty() || to_format.trim().is_empty() {
            return Err(ConvertApiError::InvalidParameter(
                "source and target formats must not be empty".into(),
            ));
        }

        let accepted: Vec<Param> = params
            .into_iter()
            .filter(|p| {
                let reserved = fields::is_reserved(p.name());
                if reserved {
                    tracing::debug!(param = %p.name(), "dropping reserved parameter");
                }
                !reserved
            })
            .collect();

        let uploads = accepted.iter().filter(|p| p.needs_upload()).count();
        if uploads > 0 {
            tracing::debug!(count = uploads, "resolving file parameters");
        }
        let contributions: Vec<Contribution> =
            try_join_all(accepted.into_iter().map(|p| p.contribute(self.uploader)))
                .await?
                .into_iter()
                .flatten()
                .collect();

        let mut body = MultipartBody::new()
            .text(fields::STORE_FILE, "true")
            .text(fields::TIMEOUT, self.config.timeout_secs().to_string());
        let mut from_format = from_format.to_string();
        let mut converter: Option<String> = None;

        for contribution in contributions {
            if contribution.name.eq_ignore_ascii_case(service::CONVERTER_PARAM) {
                if converter.is_none() {
                    let value = contribution.value.as_field_value().trim();
                    if !value.is_empty() {
                        converter = Some(value.to_string());
                    }
                }
                continue;
            }
            if let ContributionValue::File(descriptor) = &contribution.value
                && from_format.eq_ignore_ascii_case(service::WILDCARD_FORMAT)
                && !descriptor.file_ext.is_empty()
            {
                from_format = descriptor.file_ext.clone();
            }
            body.push_text(contribution.name, contribution.value.as_field_value());
        }

        let url = self.compose_url(&from_format, to_format, converter.as_deref())?;
        tracing::debug!(
            from = %from_format,
            to = %to_format,
            converter = converter.as_deref().unwrap_or(""),
            fields = body.len(),
            "conversion request composed"
        );

        Ok(ConvertRequest {
            url,
            from_format,
            to_format: to_format.to_string(),
            converter,
            body,
        })
    }

    fn compose_url(&self, from: &str, to: &str, converter: Option<&str>) -> Result<String> {
        let mut path = format!("convert/{}/to/{}", encode_segment(from), encode_segment(to));
        if let Some(c) = converter {
            path.push_str("/converter/");
            path.push_str(&encode_segment(c));
        }
        let query = self.config.credentials().auth_query()?;
        Ok(self.config.endpoint(&path, &query))
    }
}

/// Percent-encode a path segment; the wildcard format is sent as is.
fn encode_segment(segment: &str) -> std::borrow::Cow<'_, str> {
    if segment == service::WILDCARD_FORMAT {
        std::borrow::Cow::Borrowed(segment)
    } else {
        urlencoding::encode(segment)
    }
}
