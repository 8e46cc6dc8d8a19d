//! Core types and shared functionality for the portal gateway.
//!
//! This crate provides:
//! - The persistent response store (named cache bucket, SQLite backend)
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod store;

pub use config::PortalConfig;
pub use error::Error;
pub use store::{Bucket, CachedResponse};
