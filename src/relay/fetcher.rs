//! Outbound fetch with spoofed browser headers
//!
//! A single attempt succeeds only when the upstream answers with a 2xx
//! status and a non-empty body. Everything else is reported as a
//! retryable error to the caller's retry loop.

use std::time::Duration;

use reqwest::header;
use reqwest::Client;

use crate::error::{RelayError, Result};

// Fixed browser-like header values mimicking a request referred from
// youtube.com. Accept-Encoding is left to reqwest, which negotiates
// compression and transparently decompresses.
const ACCEPT: &str = "application/json, text/plain, */*";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
const REFERER: &str = "https://www.youtube.com/";
const ORIGIN: &str = "https://www.youtube.com";

/// Outbound HTTP fetcher shared across requests
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Build a fetcher whose requests are bounded by `attempt_timeout`
    pub fn new(attempt_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(attempt_timeout)
            .build()
            .map_err(|e| RelayError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Issue one GET to the target URL using the given identity string
    pub async fn fetch(&self, url: &str, user_agent: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .header(header::USER_AGENT, user_agent)
            .header(header::ACCEPT, ACCEPT)
            .header(header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
            .header(header::REFERER, REFERER)
            .header(header::ORIGIN, ORIGIN)
            .header("Sec-Fetch-Dest", "empty")
            .header("Sec-Fetch-Mode", "cors")
            .header("Sec-Fetch-Site", "same-origin")
            .header(header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::UpstreamStatus(status.as_u16()));
        }

        let body = response.text().await?;
        if body.is_empty() {
            return Err(RelayError::UpstreamEmptyBody);
        }

        Ok(body)
    }
}
