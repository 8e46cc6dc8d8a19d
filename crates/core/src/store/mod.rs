//! SQLite-backed response store.
//!
//! This module provides the persistent cache bucket behind the fetch
//! interceptor, using SQLite with async access via tokio-rusqlite:
//!
//! - One bucket per logical name, created lazily on first open
//! - Request-identity keys (SHA-256 over method and URL)
//! - Automatic schema migrations
//! - WAL mode for concurrent access

pub mod bucket;
pub mod entries;
pub mod key;
pub mod migrations;

pub use crate::Error;

pub use bucket::Bucket;
pub use entries::CachedResponse;
pub use key::request_key;
