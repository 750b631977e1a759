//! HTTP client for the Immich server.
//!
//! Covers the handful of endpoints the relay needs: liveness and identity
//! probes for the status banner, the album lookup done at startup, and the
//! asset create/update pair driven by the upload protocol. Every request
//! carries the `x-api-key` header.

pub mod api;

use std::fmt;
use std::time::Duration;

use reqwest::Client;

pub use api::{AlbumInfo, UserInfo};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to read local file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Immich returned status {status}: {body}")]
    Status { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Client for one Immich instance.
///
/// No global timeout is set: uploads of large videos may take arbitrarily
/// long. The status calls apply their own per-request timeout.
#[derive(Clone)]
pub struct ImmichClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for ImmichClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImmichClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl ImmichClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder().build()?;
        let base_url: String = base_url.into();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header("x-api-key", self.api_key.as_str())
    }

    fn status_timeout() -> Duration {
        Duration::from_secs(relay_core::constants::STATUS_TIMEOUT_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trimmed() {
        let client = ImmichClient::new("http://immich:2283/api//", "key").unwrap();
        assert_eq!(client.base_url(), "http://immich:2283/api");
        assert_eq!(
            client.build_url("/server/ping"),
            "http://immich:2283/api/server/ping"
        );
    }

    #[test]
    fn test_status_error_message() {
        let err = ClientError::Status {
            status: 404,
            body: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "Immich returned status 404: not found");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = ImmichClient::new("http://immich", "very-secret").unwrap();
        assert!(!format!("{:?}", client).contains("very-secret"));
    }
}
