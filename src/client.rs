//! ConvertAPI client: conversion dispatcher and account query.

use std::sync::Arc;
use std::time::Instant;

use tracing::Instrument;

use crate::builder::ConvertApiBuilder;
use crate::config::ConvertApiConfig;
use crate::defaults;
use crate::error::{ConvertApiError, Result};
use crate::execution::executors::files::{HttpUploadExecutor, UploadExecutor};
use crate::execution::http::transport::{HttpTransportRequest, HttpTransportResponse};
use crate::execution::request::{ConvertRequest, ConvertRequestBuilder};
use crate::params::{FileSource, Param};
use crate::types::{ConversionResponse, FileDescriptor, UserInfo};
use crate::utils::cancel::{CancelHandle, run_cancellable};

/// Client for the ConvertAPI conversion service.
///
/// Cheap to clone; clones share the configuration and transport. The client
/// keeps no per-request state, so concurrent calls are independent.
///
/// # Example
/// ```rust,no_run
/// use convertapi::{ConvertApi, Param};
///
/// #[tokio::main]
/// async fn main() -> Result<(), convertapi::ConvertApiError> {
///     let client = ConvertApi::with_secret("your-api-secret")?;
///     let result = client
///         .convert("pdf", "docx", vec![Param::file("File", "/tmp/a.pdf")])
///         .await?;
///     for file in &result.files {
///         println!("{} -> {:?}", file.file_name, file.url);
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct ConvertApi {
    config: Arc<ConvertApiConfig>,
    uploader: Arc<dyn UploadExecutor>,
}

impl ConvertApi {
    pub fn builder() -> ConvertApiBuilder {
        ConvertApiBuilder::new()
    }

    /// Client authenticated with an API secret.
    pub fn with_secret(secret: impl Into<String>) -> Result<Self> {
        Self::builder().secret(secret).build()
    }

    /// Client authenticated with a token and its numeric API key.
    pub fn with_token(token: impl Into<String>, api_key: u64) -> Result<Self> {
        Self::builder().token(token).api_key(api_key).build()
    }

    pub(crate) fn from_config(config: ConvertApiConfig) -> Self {
        let config = Arc::new(config);
        let uploader = Arc::new(HttpUploadExecutor::new(config.clone()));
        Self { config, uploader }
    }

    pub fn config(&self) -> &ConvertApiConfig {
        &self.config
    }

    /// Convert `params` from `from_format` to `to_format`.
    ///
    /// `from_format` may be `*` to infer the source format from the first
    /// uploaded file. File parameters are uploaded first; the conversion is
    /// then posted with a local deadline of the configured timeout plus a
    /// grace period.
    pub async fn convert(
        &self,
        from_format: &str,
        to_format: &str,
        params: impl IntoIterator<Item = Param>,
    ) -> Result<ConversionResponse> {
        let params: Vec<Param> = params.into_iter().collect();
        let span = tracing::debug_span!("convert", from = %from_format, to = %to_format);
        async {
            let request = self.prepare(from_format, to_format, params).await?;
            self.dispatch(request).await
        }
        .instrument(span)
        .await
    }

    /// Like [`convert`](Self::convert), but aborts the in-flight exchange
    /// (pending uploads included) when `cancel` fires.
    pub async fn convert_with_cancel(
        &self,
        from_format: &str,
        to_format: &str,
        params: impl IntoIterator<Item = Param>,
        cancel: &CancelHandle,
    ) -> Result<ConversionResponse> {
        let what = format!("conversion from {from_format} to {to_format}");
        run_cancellable(cancel, &what, self.convert(from_format, to_format, params)).await
    }

    /// Resolve parameters (uploading files) and compose the request without
    /// sending it.
    pub async fn prepare(
        &self,
        from_format: &str,
        to_format: &str,
        params: Vec<Param>,
    ) -> Result<ConvertRequest> {
        ConvertRequestBuilder::new(&self.config, self.uploader.as_ref())
            .build(from_format, to_format, params)
            .await
    }

    /// Send a composed request and decode the response.
    pub async fn dispatch(&self, request: ConvertRequest) -> Result<ConversionResponse> {
        let ConvertRequest {
            url,
            from_format,
            to_format,
            body,
            ..
        } = request;

        let started = Instant::now();
        let resp = self
            .config
            .transport()
            .post(HttpTransportRequest {
                url,
                deadline: self.config.request_deadline(),
                body,
            })
            .await?;

        let message = format!("Conversion from {from_format} to {to_format} error.");
        let result: ConversionResponse = decode_response(resp, &message)?;
        tracing::debug!(
            files = result.file_count(),
            cost = result.conversion_cost,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "conversion completed"
        );
        Ok(result)
    }

    /// Upload a file once and reuse the descriptor in later conversions
    /// (via [`Param::descriptor`]).
    pub async fn upload(&self, source: FileSource) -> Result<FileDescriptor> {
        let file = source.file_name();
        self.uploader
            .upload(source)
            .await
            .map_err(|e| ConvertApiError::upload_error(file, e))
    }

    /// Retrieve account status (user name, seconds left, ...).
    pub async fn get_user(&self) -> Result<UserInfo> {
        let query = self.config.credentials().user_query()?;
        let url = self.config.endpoint(defaults::service::USER_PATH, &query);
        let resp = self
            .config
            .transport()
            .get(&url, self.config.download_deadline())
            .await?;
        decode_response(resp, "Retrieve user information failed.")
    }
}

impl std::fmt::Debug for ConvertApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConvertApi")
            .field("config", &self.config)
            .finish()
    }
}

/// Map a non-200 response to a `ServiceError`, otherwise decode the JSON body.
fn decode_response<T: serde::de::DeserializeOwned>(
    resp: HttpTransportResponse,
    message: &str,
) -> Result<T> {
    if !resp.is_ok() {
        tracing::warn!(status = resp.status, reason = %resp.reason, "service returned an error");
        let message = format!("{message} {}", resp.reason).trim_end().to_string();
        let body = resp.text();
        return Err(ConvertApiError::service_error(
            resp.status,
            resp.reason,
            message,
            body,
        ));
    }
    serde_json::from_slice(&resp.body)
        .map_err(|e| ConvertApiError::ParseError(format!("invalid response body: {e}")))
}
