//! portal_fetch tool implementation.
//!
//! Routes a request through the fetch interceptor and reports where the
//! response came from.

use chrono::Utc;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use portal_client::{FetchInterceptor, FetchRequest};
use portal_core::Error;

/// Input parameters for portal_fetch tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PortalFetchParams {
    /// The URL to fetch. Only network schemes (http/https) are intercepted.
    pub url: String,

    /// HTTP method (default: GET).
    #[serde(default = "default_method")]
    pub method: String,
}

fn default_method() -> String {
    "GET".into()
}

/// Output structure for portal_fetch tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PortalFetchOutput {
    /// The original URL requested.
    pub url: String,
    /// The HTTP method used.
    pub method: String,
    /// HTTP status code of the delivered response.
    pub status: u16,
    /// Content-Type header.
    pub content_type: Option<String>,
    /// Where the response came from: "network" or "cache".
    pub served_from: String,
    /// ISO8601 timestamp of when the tool answered.
    pub fetched_at: String,
    /// Response body, lossily decoded as UTF-8.
    pub body: String,
}

/// Implementation of the portal_fetch tool.
pub async fn fetch_impl(interceptor: &FetchInterceptor, params: PortalFetchParams) -> Result<CallToolResult, McpError> {
    if params.url.is_empty() {
        return Err(Error::InvalidInput("url cannot be empty".into()).into());
    }

    let request = FetchRequest::new(params.method.clone(), params.url.clone());
    let response = interceptor.handle(request).await?;

    let output = PortalFetchOutput {
        url: params.url,
        method: params.method,
        status: response.status,
        content_type: response.content_type.clone(),
        served_from: response.served_from.as_str().to_string(),
        fetched_at: Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        body: String::from_utf8_lossy(&response.body).to_string(),
    };

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&output).unwrap_or_default(),
    )]))
}
