use std::time::Duration;

use pinned_core::error::AppError;
use pinned_core::traits::Fetcher;
use reqwest::Client;

/// Default timeout for page fetches.
///
/// Bounds the tail latency of homepage discovery, which runs one fetch per
/// pinned item with no individual deadline of its own.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP fetcher using reqwest.
///
/// Downloads raw HTML with a configurable timeout. Non-2xx responses are
/// surfaced as [`AppError::Upstream`] carrying the status code so the
/// pipeline can tell "not found" from "rate limited". Redirects are
/// followed per reqwest's default policy; there is no retry.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
    timeout_secs: u64,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, AppError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, AppError> {
        let timeout_secs = timeout.as_secs();
        let client = Client::builder()
            .user_agent("pinned/0.1 (pinned repository API)")
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }
}

impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                AppError::Network(format!("connection failed: {e}"))
            } else {
                AppError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| AppError::Network(format!("failed to read response body: {e}")))
    }
}
