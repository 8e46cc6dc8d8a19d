//! Live network fetch.
//!
//! ### Transport errors vs. HTTP errors
//! Receiving any HTTP response, including 4xx/5xx, is a success for this
//! client. Only a transport-level failure (connect, DNS, TLS, a broken
//! body stream) is an error.
//!
//! ### No request timeout
//! The interceptor implements no timeout of its own, so none is set on the
//! underlying client; an indefinitely hanging call delays both the response
//! and the fallback path.

pub mod scheme;

use bytes::Bytes;
use reqwest::{Client, Method, header};

pub use scheme::is_network_url;

use portal_core::Error;
use portal_core::store::request_key;

/// Configuration for the network client.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// User agent string (default: "portal-gateway/0.1")
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self { user_agent: "portal-gateway/0.1".to_string() }
    }
}

/// An outbound fetch descriptor: method and URL.
///
/// Treated as opaque by the interceptor except for reading the URL; its
/// identity doubles as the cache key.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub method: String,
    pub url: String,
}

impl FetchRequest {
    /// A GET request for the given URL.
    pub fn get(url: impl Into<String>) -> Self {
        Self { method: "GET".to_string(), url: url.into() }
    }

    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self { method: method.into(), url: url.into() }
    }

    /// The store key identifying this request.
    pub fn key(&self) -> String {
        request_key(&self.method, &self.url)
    }
}

/// What the live network produced for a request.
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    /// HTTP status code (any status, including 4xx/5xx).
    pub status: u16,
    /// The final URL after redirects.
    pub final_url: String,
    /// Content-Type header.
    pub content_type: Option<String>,
    /// Response header pairs.
    pub headers: Vec<(String, String)>,
    /// Response body bytes.
    pub body: Bytes,
}

/// HTTP client for the live network leg of interception.
pub struct NetworkClient {
    http: Client,
    config: NetworkConfig,
}

impl NetworkClient {
    /// Create a new network client with the given configuration.
    pub fn new(config: NetworkConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Issue the request unmodified against the live network.
    pub async fn fetch(&self, request: &FetchRequest) -> Result<FetchedResponse, Error> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| Error::InvalidInput(format!("invalid method: {}", request.method)))?;

        let response = self
            .http
            .request(method, &request.url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("transport failure: {}", e)))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();

        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Network(format!("failed to read response body: {}", e)))?;

        tracing::debug!(url = %request.url, status, bytes = body.len(), "fetched");

        Ok(FetchedResponse { status, final_url, content_type, headers, body })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }
}
