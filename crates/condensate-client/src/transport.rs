//! HTTP transport for the Condensate client.
//!
//! The transport performs one request and hands back the raw status and
//! body. It never interprets the status code; that is the client's job.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::{Client, Method, Url};
use secrecy::ExposeSecret;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the server reported a client or server error (status >= 400).
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }
}

/// Sends a single request to the memory store.
///
/// `path` is relative to the configured base URL and may carry a query
/// string. Implementations must be safe to share across tasks.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse, ClientError>;
}

/// reqwest-backed [`Transport`].
///
/// Every request carries `Content-Type: application/json`, and
/// `Authorization: Bearer <key>` when a credential is configured.
/// Redirects are not followed; a 3xx is returned as is.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport from client configuration.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidConfig` if the base URL is not an absolute
    /// http(s) URL or the API key is not a valid header value.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let url = Url::parse(config.base_url()).map_err(|e| {
            ClientError::invalid_config(format!("base URL '{}': {}", config.base_url(), e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::invalid_config(format!(
                "base URL '{}': unsupported scheme '{}'",
                config.base_url(),
                url.scheme()
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(api_key) = config.api_key() {
            let mut auth_value =
                HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
                    .map_err(|e| ClientError::invalid_config(format!("API key: {}", e)))?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .redirect(Policy::none())
            .build()
            .map_err(|e| ClientError::invalid_config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, url = %url, "Sending request");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        debug!(status, bytes = body.len(), "Received response");
        Ok(RawResponse::new(status, body.to_vec()))
    }
}
