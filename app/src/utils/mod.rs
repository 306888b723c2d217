pub mod chat;
pub mod email;
pub mod gemini;
pub mod google;
pub mod image;
pub mod jwt;

use std::time::Duration;

use anyhow::Context;

/// Outbound calls to the AI, chat and image services share this limit.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

pub fn http_client() -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(UPSTREAM_TIMEOUT)
        .build()
        .context("Failed to create HTTP client")
}
