//! Request qualification gate.

/// Whether a URL targets the live network.
///
/// Literal prefix test: matches both `http:` and `https:` targets while
/// excluding local-resource and extension-internal schemes
/// (`chrome-extension:`, `file:`, `data:`, ...). Requests that fail this
/// test are left entirely to host-default handling.
pub fn is_network_url(url: &str) -> bool {
    url.starts_with("http")
}
