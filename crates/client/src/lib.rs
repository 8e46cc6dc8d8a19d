//! Client code for the portal gateway.
//!
//! This crate provides the live network fetch and the fetch interceptor
//! that routes qualifying requests through the cache bucket.

pub mod fetch;
pub mod intercept;

pub use fetch::{FetchRequest, FetchedResponse, NetworkClient, NetworkConfig, is_network_url};
pub use intercept::{FetchInterceptor, InterceptedResponse, NetworkFetch, ResponseStore, ServedFrom};
