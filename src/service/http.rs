use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::error::AppError;

/// Identifies the client to servers that turn away requests without a browser-like agent.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Fixed time bound for a single page fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the HTTP client used for page fetches.
pub fn create_client(timeout: Duration, user_agent: &str) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .context("Failed to build page-fetch reqwest client")
}

/// Retrieves the raw HTML of a page.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> std::result::Result<String, AppError>;
}

/// Fetcher backed by a shared reqwest client.
///
/// Non-2xx responses are not rejected: whatever body came back is handed to
/// the evaluator.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        Ok(Self {
            client: create_client(timeout, user_agent)?,
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(DEFAULT_FETCH_TIMEOUT, DEFAULT_USER_AGENT)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<String, AppError> {
        tracing::debug!("[FETCH] GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("[FETCH] {} answered {}, analyzing body anyway", url, status);
        }

        response
            .text()
            .await
            .map_err(|e| AppError::network(format!("failed to read response body: {}", e)))
    }
}
