//! MCP tool implementations.
//!
//! This module contains all tools exposed by the portal gateway.
#![allow(unused_imports)]

pub mod portal_fetch;

pub use portal_fetch::{PortalFetchOutput, PortalFetchParams};
