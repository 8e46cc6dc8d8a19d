//! Portal gateway entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

use portal_client::{FetchInterceptor, NetworkClient, NetworkConfig};
use portal_core::{Bucket, PortalConfig};

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = PortalConfig::load()?;

    tracing::info!(bucket = %config.bucket, "Starting portal gateway on stdio transport");

    let bucket = Bucket::open(&config.data_dir, &config.bucket).await?;
    let network = NetworkClient::new(NetworkConfig { user_agent: config.user_agent.clone() })?;
    let interceptor = Arc::new(FetchInterceptor::new(Arc::new(bucket), Arc::new(network)));

    let handler = handler::PortalGateway::new(interceptor);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
