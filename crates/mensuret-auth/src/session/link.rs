//! Login link construction.

/// Builds the link mailed to the user: `<base-url>?t=<login-token>`.
pub fn login_link(base_url: &str, token: &str) -> String {
    format!("{base_url}?t={token}")
}

/// Base URL derived from the request `Host` header when no public URL is configured.
pub fn base_url_from_host(host: &str) -> String {
    format!("http://{host}")
}
