//! HTTP transport abstraction.
//!
//! The client talks to the service through the narrow [`HttpTransport`]
//! capability set (`post` multipart, `get`), each call carrying an explicit
//! wall-clock deadline. The default implementation wraps `reqwest`; custom
//! transports can observe the final URL and body and return a synthetic
//! response without touching the network.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::HeaderMap;

use crate::error::{ConvertApiError, Result};
use crate::execution::http::multipart::MultipartBody;

/// Transport-level request data for multipart POST requests.
#[derive(Debug, Clone)]
pub struct HttpTransportRequest {
    /// Absolute URL including the authentication query
    pub url: String,
    /// Deadline covering the whole exchange, body read included
    pub deadline: Duration,
    pub body: MultipartBody,
}

/// Transport-level response data.
#[derive(Debug, Clone)]
pub struct HttpTransportResponse {
    pub status: u16,
    /// Reason phrase for the status (may be empty)
    pub reason: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpTransportResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Custom HTTP transport.
///
/// Implementations must be safe for concurrent use: one transport instance
/// is shared by every request of a client. Network failures and exceeded
/// deadlines are reported as `HttpError` / `TimeoutError`; non-2xx statuses
/// are NOT errors at this level.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post(&self, request: HttpTransportRequest) -> Result<HttpTransportResponse>;

    async fn get(&self, url: &str, deadline: Duration) -> Result<HttpTransportResponse>;
}

/// Default transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
        deadline: Duration,
    ) -> Result<HttpTransportResponse> {
        let started = Instant::now();
        let exchange = async {
            let resp = request.send().await?;
            let status = resp.status();
            let reason = reason_phrase(&resp);
            let headers = resp.headers().clone();
            let body = resp.bytes().await?;
            Ok::<_, ConvertApiError>(HttpTransportResponse {
                status: status.as_u16(),
                reason,
                headers,
                body: body.to_vec(),
            })
        };

        let result = tokio::time::timeout(deadline, exchange)
            .await
            .map_err(|_| {
                ConvertApiError::TimeoutError(format!(
                    "request to {} exceeded deadline of {}s",
                    redact_query(url),
                    deadline.as_secs()
                ))
            })?;

        match &result {
            Ok(resp) => tracing::debug!(
                url = %redact_query(url),
                status = resp.status,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "http exchange completed"
            ),
            Err(e) => tracing::debug!(url = %redact_query(url), error = %e, "http exchange failed"),
        }
        result
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(&self, request: HttpTransportRequest) -> Result<HttpTransportResponse> {
        let form = request.body.into_form()?;
        let builder = self.client.post(&request.url).multipart(form);
        self.execute(builder, &request.url, request.deadline).await
    }

    async fn get(&self, url: &str, deadline: Duration) -> Result<HttpTransportResponse> {
        let builder = self.client.get(url);
        self.execute(builder, url, deadline).await
    }
}

/// Reason phrase sent by the server, or the canonical one for the status.
///
/// hyper only records the phrase when it differs from the canonical text.
fn reason_phrase(resp: &reqwest::Response) -> String {
    match resp.extensions().get::<hyper::ext::ReasonPhrase>() {
        Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
        None => resp
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string(),
    }
}

/// Strip the query string (which carries credentials) from a URL for logging.
pub(crate) fn redact_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}
