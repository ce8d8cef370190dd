//! Client configuration root.
//!
//! [`ConvertApiConfig`] is immutable once built and shared by every request
//! of a client through an `Arc`. It owns the credentials, the endpoint and
//! timeouts, and the HTTP transport (injected, or a lazily created default).

use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::defaults;
use crate::error::{ConvertApiError, Result};
use crate::execution::http::transport::{HttpTransport, ReqwestTransport};

/// Authentication credentials.
///
/// Either mode may be configured, or both. Conversions use token mode when
/// a token is present; the account query prefers the secret.
#[derive(Clone, Default)]
pub struct Credentials {
    secret: Option<SecretString>,
    token: Option<(SecretString, u64)>,
}

impl Credentials {
    pub fn secret(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(SecretString::from(secret.into())),
            token: None,
        }
    }

    pub fn token(token: impl Into<String>, api_key: u64) -> Self {
        Self {
            secret: None,
            token: Some((SecretString::from(token.into()), api_key)),
        }
    }

    pub(crate) fn from_parts(secret: Option<String>, token: Option<(String, u64)>) -> Self {
        Self {
            secret: secret
                .filter(|s| !s.is_empty())
                .map(SecretString::from),
            token: token
                .filter(|(t, _)| !t.is_empty())
                .map(|(t, k)| (SecretString::from(t), k)),
        }
    }

    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Query string used for conversions and uploads.
    ///
    /// `token=<t>&apikey=<k>` when a token is set, otherwise `secret=<s>`.
    pub(crate) fn auth_query(&self) -> Result<String> {
        if let Some((token, api_key)) = &self.token {
            return Ok(format!(
                "token={}&apikey={}",
                urlencoding::encode(token.expose_secret()),
                api_key
            ));
        }
        self.secret_query()
    }

    /// Query string used for the account query: the secret when present,
    /// otherwise the token.
    pub(crate) fn user_query(&self) -> Result<String> {
        if self.secret.is_some() {
            self.secret_query()
        } else {
            self.auth_query()
        }
    }

    fn secret_query(&self) -> Result<String> {
        self.secret
            .as_ref()
            .map(|s| format!("secret={}", urlencoding::encode(s.expose_secret())))
            .ok_or_else(|| ConvertApiError::ConfigurationError("no credentials configured".into()))
    }

    fn validate(&self) -> Result<()> {
        if self.secret.is_none() && self.token.is_none() {
            return Err(ConvertApiError::ConfigurationError(
                "a non-empty secret or token is required".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field(
                "token",
                &self.token.as_ref().map(|(_, key)| ("[REDACTED]", key)),
            )
            .finish()
    }
}

/// Immutable client configuration.
#[derive(Clone)]
pub struct ConvertApiConfig {
    pub(crate) base_url: String,
    pub(crate) credentials: Credentials,
    pub(crate) timeout_secs: u64,
    pub(crate) download_timeout_secs: u64,
    pub(crate) http_client: Option<reqwest::Client>,
    transport: OnceLock<Arc<dyn HttpTransport>>,
}

impl ConvertApiConfig {
    pub(crate) fn new(
        base_url: Option<String>,
        credentials: Credentials,
        timeout_secs: u64,
        download_timeout_secs: u64,
        http_client: Option<reqwest::Client>,
        transport: Option<Arc<dyn HttpTransport>>,
    ) -> Result<Self> {
        credentials.validate()?;
        if timeout_secs == 0 {
            return Err(ConvertApiError::ConfigurationError(
                "request timeout must be at least one second".into(),
            ));
        }
        if download_timeout_secs == 0 {
            return Err(ConvertApiError::ConfigurationError(
                "download timeout must be at least one second".into(),
            ));
        }

        let base_url = base_url.unwrap_or_else(|| defaults::service::BASE_URL.to_string());
        let parsed = reqwest::Url::parse(&base_url).map_err(|e| {
            ConvertApiError::ConfigurationError(format!("invalid base URL '{base_url}': {e}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConvertApiError::ConfigurationError(format!(
                "base URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        let slot = OnceLock::new();
        if let Some(t) = transport {
            let _ = slot.set(t);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            timeout_secs,
            download_timeout_secs,
            http_client,
            transport: slot,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Server-side conversion timeout, sent as the `TimeOut` field.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Local deadline for conversions and uploads: the server-side timeout
    /// plus a grace period so that the server can report its own timeout.
    pub fn request_deadline(&self) -> Duration {
        Duration::from_secs(self.timeout_secs) + defaults::timeouts::CLIENT_GRACE
    }

    /// Local deadline for download-class requests (account queries).
    pub fn download_deadline(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }

    /// The injected transport, or the default reqwest transport created on
    /// first use.
    pub fn transport(&self) -> Arc<dyn HttpTransport> {
        self.transport
            .get_or_init(|| {
                let client = self.http_client.clone().unwrap_or_default();
                Arc::new(ReqwestTransport::new(client)) as Arc<dyn HttpTransport>
            })
            .clone()
    }

    /// Join a relative endpoint path onto the base URL.
    pub(crate) fn endpoint(&self, path: &str, query: &str) -> String {
        format!("{}/{}?{}", self.base_url, path.trim_start_matches('/'), query)
    }
}

impl fmt::Debug for ConvertApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertApiConfig")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("timeout_secs", &self.timeout_secs)
            .field("download_timeout_secs", &self.download_timeout_secs)
            .field("has_custom_transport", &self.transport.get().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(credentials: Credentials) -> Result<ConvertApiConfig> {
        ConvertApiConfig::new(None, credentials, 180, 15, None, None)
    }

    #[test]
    fn token_takes_priority_for_conversions() {
        let creds = Credentials::from_parts(Some("S".into()), Some(("T".into(), 42)));
        assert_eq!(creds.auth_query().unwrap(), "token=T&apikey=42");
        assert_eq!(creds.user_query().unwrap(), "secret=S");
    }

    #[test]
    fn token_only_user_query_falls_back_to_token() {
        let creds = Credentials::token("T", 7);
        assert_eq!(creds.user_query().unwrap(), "token=T&apikey=7");
    }

    #[test]
    fn query_values_are_percent_encoded() {
        let creds = Credentials::secret("a b&c");
        assert_eq!(creds.auth_query().unwrap(), "secret=a%20b%26c");
    }

    #[test]
    fn empty_credentials_are_rejected() {
        let err = config(Credentials::from_parts(Some(String::new()), None)).unwrap_err();
        assert!(matches!(err, ConvertApiError::ConfigurationError(_)));
        let err = config(Credentials::from_parts(None, Some((String::new(), 1)))).unwrap_err();
        assert!(matches!(err, ConvertApiError::ConfigurationError(_)));
        assert!(config(Credentials::default()).is_err());
    }

    #[test]
    fn defaults_and_deadlines() {
        let cfg = config(Credentials::secret("S")).unwrap();
        assert_eq!(cfg.base_url(), "https://v2.convertapi.com");
        assert_eq!(cfg.timeout_secs(), 180);
        assert_eq!(cfg.request_deadline(), Duration::from_secs(190));
        assert_eq!(cfg.download_deadline(), Duration::from_secs(15));
        assert_eq!(
            cfg.endpoint("upload", "secret=S"),
            "https://v2.convertapi.com/upload?secret=S"
        );
    }

    #[test]
    fn rejects_bad_base_url_and_zero_timeout() {
        assert!(
            ConvertApiConfig::new(
                Some("ftp://example.com".into()),
                Credentials::secret("S"),
                180,
                15,
                None,
                None
            )
            .is_err()
        );
        assert!(
            ConvertApiConfig::new(
                Some("not a url".into()),
                Credentials::secret("S"),
                180,
                15,
                None,
                None
            )
            .is_err()
        );
        assert!(ConvertApiConfig::new(None, Credentials::secret("S"), 0, 15, None, None).is_err());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let cfg = ConvertApiConfig::new(
            Some("http://localhost:8080/".into()),
            Credentials::secret("S"),
            30,
            15,
            None,
            None,
        )
        .unwrap();
        assert_eq!(cfg.base_url(), "http://localhost:8080");
    }

    #[test]
    fn debug_redacts_credentials() {
        let cfg = ConvertApiConfig::new(
            None,
            Credentials::from_parts(Some("top-secret".into()), Some(("tok".into(), 1))),
            180,
            15,
            None,
            None,
        )
        .unwrap();
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("top-secret"));
        assert!(!dbg.contains("tok\""));
        assert!(dbg.contains("[REDACTED]"));
    }

    #[test]
    fn default_transport_is_created_once() {
        let cfg = config(Credentials::secret("S")).unwrap();
        let a = cfg.transport();
        let b = cfg.transport();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
