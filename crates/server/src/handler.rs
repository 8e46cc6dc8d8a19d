//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use crate::tools::portal_fetch::{PortalFetchParams, fetch_impl};
use portal_client::FetchInterceptor;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for the portal gateway.
#[derive(Clone)]
pub struct PortalGateway {
    interceptor: Arc<FetchInterceptor>,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl PortalGateway {
    /// Create a new server handler around an interceptor.
    pub fn new(interceptor: Arc<FetchInterceptor>) -> Self {
        Self { interceptor, tool_router: Self::tool_router() }
    }

    /// Fetch a URL through the portal cache.
    ///
    /// Live network response with a background cache write-through; falls
    /// back to the cached copy when the network is unreachable.
    #[tool(
        description = "Fetch a URL through the portal cache. Returns the live network response and silently caches it; serves the cached copy when the network is unreachable."
    )]
    async fn portal_fetch(&self, params: Parameters<PortalFetchParams>) -> Result<CallToolResult, McpError> {
        fetch_impl(&self.interceptor, params.0).await
    }
}

impl ServerHandler for PortalGateway {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "portal-gateway".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
