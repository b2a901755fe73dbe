//! Rate-limited HTTP fetcher
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building the HTTP client with the configured user agent
//! - Serializing every request through a single-slot semaphore
//! - Fixed-delay retry on non-200 responses and transport errors
//!
//! The target site throttles on request concurrency, so a fetch never overlaps
//! another one, even when callers share the fetcher across tasks.

use crate::config::FetcherConfig;
use crate::TapError;
use reqwest::{Client, StatusCode};
use tokio::sync::Semaphore;

/// Builds an HTTP client with proper configuration
///
/// No request timeout is set; the retry loop is the only resilience mechanism.
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Sequential, retrying page fetcher
pub struct Fetcher {
    client: Client,
    config: FetcherConfig,

    /// Single permit: at most one request in flight
    gate: Semaphore,
}

impl Fetcher {
    /// Creates a fetcher from its configuration
    pub fn new(config: FetcherConfig) -> Result<Self, TapError> {
        let client = build_http_client(&config)?;
        Ok(Self::with_client(client, config))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client, config: FetcherConfig) -> Self {
        Self {
            client,
            config,
            gate: Semaphore::new(1),
        }
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Fetches a URL and returns its body
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | HTTP 200 | Return body |
    /// | Any other status | Wait `retry_delay`, retry |
    /// | Transport error | Wait `retry_delay`, retry |
    /// | `max_retries` attempts used | Log last failure, return `""` |
    ///
    /// The delay is the same for every attempt. An empty body means "nothing
    /// here": callers treat it as zero listings, never as a crash.
    pub async fn fetch(&self, url: &str) -> String {
        let _permit = match self.gate.acquire().await {
            Ok(permit) => permit,
            Err(e) => {
                tracing::error!("fetch gate closed: {}", e);
                return String::new();
            }
        };

        let max_retries = self.config.max_retries;
        let mut last_failure = String::from("no attempt made");

        for attempt in 1..=max_retries {
            tracing::debug!("fetching {} (attempt {}/{}) ...", url, attempt, max_retries);

            match self.client.get(url).send().await {
                Ok(response) if response.status() == StatusCode::OK => {
                    match response.text().await {
                        Ok(body) => return body,
                        Err(e) => {
                            tracing::error!("failed to read body of {}: {}", url, e);
                            last_failure = e.to_string();
                        }
                    }
                }
                Ok(response) => {
                    let status = response.status();
                    tracing::debug!("{} returned {}", url, status);
                    last_failure = format!(
                        "{} - {}",
                        status.as_u16(),
                        status.canonical_reason().unwrap_or("Unknown")
                    );
                }
                Err(e) => {
                    tracing::error!("request to {} failed: {}", url, e);
                    last_failure = e.to_string();
                }
            }

            if attempt < max_retries {
                tokio::time::sleep(self.config.retry_delay).await;
            }
        }

        tracing::warn!("could not fetch '{}': {}", url, last_failure);
        String::new()
    }
}
