//! Shared outbound HTTP client.

use anyhow::{Context, Result};
use reqwest::Client;

/// The registry rejects requests carrying default or bot-looking agents, so
/// every outbound call presents itself as a desktop Chrome.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Builds the client used by both the link extractor and the stream proxy.
///
/// The client owns a connection pool and is cheap to clone; one instance is
/// shared across all requests.
pub fn build_client() -> Result<Client> {
    Client::builder()
        .user_agent(BROWSER_USER_AGENT)
        .build()
        .context("Failed to build HTTP client")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_looks_like_a_browser() {
        assert!(BROWSER_USER_AGENT.starts_with("Mozilla/5.0"));
        assert!(BROWSER_USER_AGENT.contains("Chrome/"));
    }

    #[test]
    fn client_builds() {
        assert!(build_client().is_ok());
    }
}
