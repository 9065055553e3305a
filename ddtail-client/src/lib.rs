//! ddtail HTTP Client
//!
//! A type-safe HTTP client for the Datadog Logs Search API.
//!
//! The crate exposes two things: the [`LogQueryService`] trait, which is the
//! narrow interface the tailing loop consumes (and tests mock), and
//! [`DatadogLogsClient`], the production implementation backed by reqwest.
//!
//! # Example
//!
//! ```no_run
//! use ddtail_client::{DatadogLogsClient, LogQueryService};
//!
//! #[tokio::main]
//! async fn main() -> ddtail_client::Result<()> {
//!     let client = DatadogLogsClient::new("datadoghq.com", "api-key", "app-key");
//!
//!     // First fetch of a session: no cursor, bounded lookback window.
//!     let batch = client.fetch_logs("service:my-app", None).await?;
//!     println!("got {} entries", batch.data.len());
//!     Ok(())
//! }
//! ```

pub mod error;
mod logs;

// Re-export commonly used types
pub use ddtail_core::LogBatch;
pub use error::{ClientError, Result};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

/// The log-query interface the tailer polls
///
/// `cursor` is the resume token from the previous successful fetch. `None`
/// marks the first call of a session; the service then applies a bounded
/// default time window instead of returning the entire corpus.
#[async_trait]
pub trait LogQueryService: Send + Sync {
    /// Fetch one page of log entries matching `query`, resuming at `cursor`
    async fn fetch_logs(&self, query: &str, cursor: Option<&str>) -> Result<LogBatch>;
}

/// HTTP client for the Datadog Logs Search API
#[derive(Debug, Clone)]
pub struct DatadogLogsClient {
    /// Base URL derived from the site (e.g. "https://api.datadoghq.com")
    base_url: String,
    /// API key, sent as the DD-API-KEY header
    api_key: String,
    /// Application key, sent as the DD-APPLICATION-KEY header
    app_key: String,
    /// HTTP client instance
    client: Client,
}

impl DatadogLogsClient {
    /// Create a new logs client for the given site
    ///
    /// # Arguments
    /// * `site` - The Datadog site (e.g., "datadoghq.com" or "datadoghq.eu")
    /// * `api_key` - The API key
    /// * `app_key` - The application key
    ///
    /// # Example
    /// ```
    /// use ddtail_client::DatadogLogsClient;
    ///
    /// let client = DatadogLogsClient::new("datadoghq.com", "api-key", "app-key");
    /// assert_eq!(client.base_url(), "https://api.datadoghq.com");
    /// ```
    pub fn new(
        site: impl AsRef<str>,
        api_key: impl Into<String>,
        app_key: impl Into<String>,
    ) -> Self {
        let site = site.as_ref().trim_end_matches('/');
        Self {
            base_url: format!("https://api.{site}"),
            api_key: api_key.into(),
            app_key: app_key.into(),
            client: Client::new(),
        }
    }

    /// Create a new logs client with a custom HTTP client
    ///
    /// This allows configuring proxies, TLS settings, etc.
    ///
    /// # Arguments
    /// * `site` - The Datadog site
    /// * `api_key` - The API key
    /// * `app_key` - The application key
    /// * `client` - A configured reqwest Client
    pub fn with_client(
        site: impl AsRef<str>,
        api_key: impl Into<String>,
        app_key: impl Into<String>,
        client: Client,
    ) -> Self {
        let site = site.as_ref().trim_end_matches('/');
        Self {
            base_url: format!("https://api.{site}"),
            api_key: api_key.into(),
            app_key: app_key.into(),
            client,
        }
    }

    /// Get the base URL the client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and returns an appropriate error if the
    /// request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = DatadogLogsClient::new("datadoghq.com", "k", "a");
        assert_eq!(client.base_url(), "https://api.datadoghq.com");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = DatadogLogsClient::new("datadoghq.eu/", "k", "a");
        assert_eq!(client.base_url(), "https://api.datadoghq.eu");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = DatadogLogsClient::with_client("datadoghq.com", "k", "a", http_client);
        assert_eq!(client.base_url(), "https://api.datadoghq.com");
    }
}
