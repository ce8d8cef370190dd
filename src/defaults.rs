//! Default Configuration Values
//!
//! This module centralizes the default values used by the ConvertAPI client.

use std::time::Duration;

/// Service endpoint defaults
pub mod service {
    /// Default ConvertAPI endpoint
    pub const BASE_URL: &str = "https://v2.convertapi.com";

    /// Upload endpoint path, relative to the base URL
    pub const UPLOAD_PATH: &str = "upload";

    /// Account information endpoint path, relative to the base URL
    pub const USER_PATH: &str = "user";

    /// Wildcard source format: infer from the first uploaded file
    pub const WILDCARD_FORMAT: &str = "*";

    /// Name of the parameter that selects a converter backend
    pub const CONVERTER_PARAM: &str = "converter";
}

/// Timeout configurations
pub mod timeouts {
    use super::*;

    /// Default conversion timeout, sent to the server as `TimeOut`
    pub const REQUEST_TIMEOUT_SECS: u64 = 180;

    /// Local headroom added on top of the server-side timeout
    pub const CLIENT_GRACE: Duration = Duration::from_secs(10);

    /// Timeout for short, download-class requests (account queries)
    pub const DOWNLOAD_TIMEOUT_SECS: u64 = 15;
}

/// Multipart field names managed by the client
pub mod fields {
    /// Always emitted as `true`
    pub const STORE_FILE: &str = "StoreFile";

    /// Always emitted with the configured timeout
    pub const TIMEOUT: &str = "TimeOut";

    /// Caller-supplied parameters with these names are dropped (case-insensitive)
    pub const RESERVED: [&str; 4] = ["StoreFile", "Async", "JobId", "TimeOut"];

    /// Part name used for file content sent to the upload endpoint
    pub const UPLOAD_FILE: &str = "file";

    /// Returns true if `name` is one of the reserved field names.
    pub fn is_reserved(name: &str) -> bool {
        RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
    }
}
