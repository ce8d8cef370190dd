//! Files executor: uploads local content to the service.

use std::sync::Arc;
use std::time::Instant;

use crate::config::ConvertApiConfig;
use crate::defaults;
use crate::error::{ConvertApiError, Result};
use crate::execution::http::multipart::MultipartBody;
use crate::execution::http::transport::HttpTransportRequest;
use crate::params::FileSource;
use crate::types::FileDescriptor;
use crate::utils::mime::guess_mime;

/// Uploads a file and returns the service-side descriptor.
///
/// Implementations hold no state shared between uploads, so independent
/// files may be uploaded concurrently.
#[async_trait::async_trait]
pub trait UploadExecutor: Send + Sync {
    async fn upload(&self, source: FileSource) -> Result<FileDescriptor>;
}

/// Generic HTTP-based upload executor
pub struct HttpUploadExecutor {
    config: Arc<ConvertApiConfig>,
}

impl HttpUploadExecutor {
    pub fn new(config: Arc<ConvertApiConfig>) -> Self {
        Self { config }
    }

    fn upload_url(&self) -> Result<String> {
        let query = self.config.credentials().auth_query()?;
        Ok(self.config.endpoint(defaults::service::UPLOAD_PATH, &query))
    }
}

#[async_trait::async_trait]
impl UploadExecutor for HttpUploadExecutor {
    async fn upload(&self, source: FileSource) -> Result<FileDescriptor> {
        let (file_name, data) = source.into_content().await?;
        let content_type = guess_mime(Some(&data[..]), Some(file_name.as_str()));
        let size = data.len();

        let request = HttpTransportRequest {
            url: self.upload_url()?,
            deadline: self.config.request_deadline(),
            body: MultipartBody::new().file(
                defaults::fields::UPLOAD_FILE,
                file_name.clone(),
                content_type,
                data,
            ),
        };

        tracing::debug!(file = %file_name, size, "uploading file");
        let started = Instant::now();
        let resp = self.config.transport().post(request).await?;
        let text = resp.text();
        if !resp.is_ok() {
            tracing::warn!(file = %file_name, status = resp.status, "upload rejected");
            return Err(ConvertApiError::service_error(
                resp.status,
                resp.reason.clone(),
                format!("Upload of '{file_name}' failed. {}", resp.reason),
                text,
            ));
        }

        let descriptor: FileDescriptor = serde_json::from_str(&text).map_err(|e| {
            ConvertApiError::ParseError(format!("invalid upload response for '{file_name}': {e}"))
        })?;
        tracing::debug!(
            file = %file_name,
            file_id = %descriptor.file_id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "file uploaded"
        );
        Ok(descriptor)
    }
}

impl std::fmt::Debug for HttpUploadExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpUploadExecutor")
            .field("base_url", &self.config.base_url())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;
    use crate::execution::http::multipart::PartContent;
    use crate::execution::http::transport::{HttpTransport, HttpTransportResponse};
    use reqwest::header::HeaderMap;
    use std::sync::Mutex;
    use std::time::Duration;

    struct CannedTransport {
        status: u16,
        body: &'static str,
        calls: Mutex<Vec<HttpTransportRequest>>,
    }

    #[async_trait::async_trait]
    impl HttpTransport for CannedTransport {
        async fn post(&self, request: HttpTransportRequest) -> Result<HttpTransportResponse> {
            self.calls.lock().unwrap().push(request);
            Ok(HttpTransportResponse {
                status: self.status,
                reason: if self.status == 200 { "OK" } else { "Bad Request" }.into(),
                headers: HeaderMap::new(),
                body: self.body.as_bytes().to_vec(),
            })
        }

        async fn get(&self, _url: &str, _deadline: Duration) -> Result<HttpTransportResponse> {
            unreachable!("uploads never GET")
        }
    }

    fn executor(transport: Arc<CannedTransport>) -> HttpUploadExecutor {
        let config = ConvertApiConfig::new(
            None,
            Credentials::secret("S"),
            180,
            15,
            None,
            Some(transport as Arc<dyn HttpTransport>),
        )
        .unwrap();
        HttpUploadExecutor::new(Arc::new(config))
    }

    #[tokio::test]
    async fn uploads_content_as_file_part() {
        let transport = Arc::new(CannedTransport {
            status: 200,
            body: r#"{"FileId":"u1","FileName":"a.pdf","FileExt":"pdf","FileSize":8}"#,
            calls: Mutex::new(Vec::new()),
        });
        let exec = executor(transport.clone());

        let desc = exec
            .upload(FileSource::bytes("a.pdf", &b"%PDF-1.4"[..]))
            .await
            .unwrap();
        assert_eq!(desc, FileDescriptor::new("u1", "a.pdf", "pdf", 8));

        let calls = transport.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].url, "https://v2.convertapi.com/upload?secret=S");
        assert_eq!(calls[0].deadline, Duration::from_secs(190));
        let part = &calls[0].body.parts()[0];
        assert_eq!(part.name, "file");
        match &part.content {
            PartContent::File {
                file_name,
                content_type,
                data,
            } => {
                assert_eq!(file_name, "a.pdf");
                assert_eq!(content_type, "application/pdf");
                assert_eq!(data.len(), 8);
            }
            other => panic!("expected file part, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_200_is_a_service_error() {
        let transport = Arc::new(CannedTransport {
            status: 400,
            body: r#"{"Code":4000,"Message":"bad file"}"#,
            calls: Mutex::new(Vec::new()),
        });
        let err = executor(transport)
            .upload(FileSource::bytes("a.pdf", &b"x"[..]))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(400));
        assert_eq!(err.service_details().unwrap().message, "bad file");
    }

    #[tokio::test]
    async fn malformed_upload_response_is_a_parse_error() {
        let transport = Arc::new(CannedTransport {
            status: 200,
            body: "not json",
            calls: Mutex::new(Vec::new()),
        });
        let err = executor(transport)
            .upload(FileSource::bytes("a.pdf", &b"x"[..]))
            .await
            .unwrap_err();
        assert!(matches!(err, ConvertApiError::ParseError(_)));
    }
}
