//! Fetch interception with network-first delivery and cache fallback.
//!
//! For every qualifying request the interceptor issues the live network
//! request, hands the response to the caller as soon as it arrives, and
//! writes a duplicate into the bucket from a detached task. When the network
//! attempt fails at the transport level, a previously stored response for
//! the same request is served instead; with nothing stored, the failure
//! propagates.
//!
//! Collaborators are injected through the `ResponseStore` and `NetworkFetch`
//! seams; host event wiring lives outside this component.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use portal_core::store::Bucket;
use portal_core::{CachedResponse, Error};

use crate::fetch::scheme::is_network_url;
use crate::fetch::{FetchRequest, FetchedResponse, NetworkClient};

/// Persistent store seam: independent insert and independent lookup, no
/// read-modify-write.
#[async_trait]
pub trait ResponseStore: Send + Sync + 'static {
    /// Insert-or-overwrite the entry for its request key.
    async fn put(&self, entry: CachedResponse) -> Result<(), Error>;

    /// Look up a previously stored entry by request key.
    async fn match_request(&self, key: &str) -> Result<Option<CachedResponse>, Error>;
}

#[async_trait]
impl ResponseStore for Bucket {
    async fn put(&self, entry: CachedResponse) -> Result<(), Error> {
        self.put_response(&entry).await
    }

    async fn match_request(&self, key: &str) -> Result<Option<CachedResponse>, Error> {
        self.match_response(key).await
    }
}

/// Live network seam. Any received HTTP status is a successful resolution;
/// only transport failures surface as `Error::Network`.
#[async_trait]
pub trait NetworkFetch: Send + Sync + 'static {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchedResponse, Error>;
}

#[async_trait]
impl NetworkFetch for NetworkClient {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchedResponse, Error> {
        NetworkClient::fetch(self, request).await
    }
}

/// Where a delivered response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServedFrom {
    Network,
    Cache,
}

impl ServedFrom {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServedFrom::Network => "network",
            ServedFrom::Cache => "cache",
        }
    }
}

/// The response delivered to the caller, from either source.
#[derive(Debug, Clone)]
pub struct InterceptedResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
    pub served_from: ServedFrom,
}

impl InterceptedResponse {
    fn from_network(response: FetchedResponse) -> Self {
        Self {
            status: response.status,
            content_type: response.content_type,
            headers: response.headers,
            body: response.body,
            served_from: ServedFrom::Network,
        }
    }

    fn from_cache(entry: CachedResponse) -> Self {
        Self {
            status: entry.status_code,
            content_type: entry.content_type.clone(),
            headers: entry.headers(),
            body: Bytes::from(entry.body),
            served_from: ServedFrom::Cache,
        }
    }
}

/// Intercepts fetches and applies the network-first, cache-fallback policy.
pub struct FetchInterceptor {
    store: Arc<dyn ResponseStore>,
    network: Arc<dyn NetworkFetch>,
}

impl FetchInterceptor {
    pub fn new(store: Arc<dyn ResponseStore>, network: Arc<dyn NetworkFetch>) -> Self {
        Self { store, network }
    }

    /// Handle one intercepted request.
    ///
    /// Non-qualifying URLs return `Error::UnsupportedScheme` without touching
    /// the network, the store, or the diagnostic sink. Qualifying requests
    /// resolve to the live response (with a background write-through), to a
    /// previously stored response after a transport failure, or to
    /// `Error::CacheMiss` when neither is available.
    pub async fn handle(&self, request: FetchRequest) -> Result<InterceptedResponse, Error> {
        if !is_network_url(&request.url) {
            return Err(Error::UnsupportedScheme(request.url));
        }

        tracing::info!(url = %request.url, "intercepted resource");

        match self.network.fetch(&request).await {
            Ok(response) => {
                self.persist_in_background(&request, &response);
                Ok(InterceptedResponse::from_network(response))
            }
            Err(Error::Network(reason)) => {
                tracing::debug!(url = %request.url, %reason, "network failed, falling back to cache");
                match self.store.match_request(&request.key()).await? {
                    Some(entry) => Ok(InterceptedResponse::from_cache(entry)),
                    None => Err(Error::CacheMiss(request.url)),
                }
            }
            Err(other) => Err(other),
        }
    }

    /// Write the response through to the store from a detached task.
    ///
    /// Delivery never waits on this write. The write's outcome is discarded;
    /// the trace line does not alter control flow.
    fn persist_in_background(&self, request: &FetchRequest, response: &FetchedResponse) {
        let entry = CachedResponse {
            key: request.key(),
            method: request.method.clone(),
            url: request.url.clone(),
            status_code: response.status,
            content_type: response.content_type.clone(),
            headers_json: serde_json::to_string(&response.headers).ok(),
            body: response.body.to_vec(),
            stored_at: chrono::Utc::now().to_rfc3339(),
        };

        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            if let Err(err) = store.put(entry).await {
                tracing::debug!(error = %err, "background cache write failed");
            }
        });
    }
}
