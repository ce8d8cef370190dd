use std::sync::Arc;

use crate::client::ConvertApi;
use crate::config::{ConvertApiConfig, Credentials};
use crate::defaults;
use crate::error::{ConvertApiError, Result};
use crate::execution::http::transport::HttpTransport;

/// Builder for configuring a [`ConvertApi`] client.
///
/// # Example
/// ```rust,no_run
/// use convertapi::ConvertApi;
///
/// # fn main() -> Result<(), convertapi::ConvertApiError> {
/// let client = ConvertApi::builder()
///     .secret("your-api-secret")
///     .timeout_secs(300)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ConvertApiBuilder {
    secret: Option<String>,
    token: Option<String>,
    api_key: Option<u64>,
    base_url: Option<String>,
    timeout_secs: u64,
    download_timeout_secs: u64,
    http_client: Option<reqwest::Client>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl Default for ConvertApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvertApiBuilder {
    pub fn new() -> Self {
        Self {
            secret: None,
            token: None,
            api_key: None,
            base_url: None,
            timeout_secs: defaults::timeouts::REQUEST_TIMEOUT_SECS,
            download_timeout_secs: defaults::timeouts::DOWNLOAD_TIMEOUT_SECS,
            http_client: None,
            transport: None,
        }
    }

    /// Set the API secret
    pub fn secret<S: Into<String>>(mut self, secret: S) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Set the API token (requires `api_key`)
    pub fn token<S: Into<String>>(mut self, token: S) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the numeric API key paired with the token
    pub const fn api_key(mut self, api_key: u64) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Override the service endpoint
    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the conversion timeout in seconds (sent to the server as `TimeOut`)
    pub const fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the timeout for download-class requests such as account queries
    pub const fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.download_timeout_secs = secs;
        self
    }

    /// Use a preconfigured reqwest client for the default transport
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set a custom HTTP transport
    pub fn with_http_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Alias for `with_http_transport(...)`
    pub fn fetch(self, transport: Arc<dyn HttpTransport>) -> Self {
        self.with_http_transport(transport)
    }

    /// Validate the configuration and build the client.
    pub fn build(self) -> Result<ConvertApi> {
        let token = match (self.token, self.api_key) {
            (Some(token), Some(key)) => Some((token, key)),
            (Some(token), None) if !token.is_empty() => {
                return Err(ConvertApiError::ConfigurationError(
                    "token authentication requires an api key".into(),
                ));
            }
            _ => None,
        };
        let credentials = Credentials::from_parts(self.secret, token);
        let config = ConvertApiConfig::new(
            self.base_url,
            credentials,
            self.timeout_secs,
            self.download_timeout_secs,
            self.http_client,
            self.transport,
        )?;
        Ok(ConvertApi::from_config(config))
    }
}

impl std::fmt::Debug for ConvertApiBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConvertApiBuilder")
            .field("has_secret", &self.secret.is_some())
            .field("has_token", &self.token.is_some())
            .field("api_key", &self.api_key)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("has_transport", &self.transport.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credentials_fail() {
        let err = ConvertApiBuilder::new().build().unwrap_err();
        assert!(matches!(err, ConvertApiError::ConfigurationError(_)));
        let err = ConvertApiBuilder::new().secret("").build().unwrap_err();
        assert!(matches!(err, ConvertApiError::ConfigurationError(_)));
    }

    #[test]
    fn token_without_api_key_fails() {
        let err = ConvertApiBuilder::new().token("T").build().unwrap_err();
        assert!(matches!(err, ConvertApiError::ConfigurationError(m) if m.contains("api key")));
    }

    #[test]
    fn builds_with_overrides() {
        let client = ConvertApiBuilder::new()
            .token("T")
            .api_key(42)
            .secret("S")
            .base_url("http://localhost:1234/")
            .timeout_secs(60)
            .download_timeout_secs(5)
            .build()
            .unwrap();
        let cfg = client.config();
        assert_eq!(cfg.base_url(), "http://localhost:1234");
        assert_eq!(cfg.timeout_secs(), 60);
        assert_eq!(cfg.download_deadline().as_secs(), 5);
        assert!(cfg.credentials().has_token());
        assert!(cfg.credentials().has_secret());
    }

    #[test]
    fn debug_hides_secret() {
        let builder = ConvertApiBuilder::new().secret("hunter2");
        assert!(!format!("{builder:?}").contains("hunter2"));
    }
}
