//! CLI configuration
//!
//! Credentials and tailing parameters for one session, validated before
//! any network call is made.

use std::time::Duration;

/// Default Datadog site
pub const DEFAULT_SITE: &str = "datadoghq.com";

/// Query used when the caller supplies none
const DEFAULT_QUERY: &str = "service:*";

/// Tail session configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API key, sent with every request
    pub api_key: String,

    /// Application key, sent with every request
    pub app_key: String,

    /// Datadog site (e.g., "datadoghq.com" or "datadoghq.eu")
    pub site: String,

    /// Search query; `None` falls back to [`DEFAULT_QUERY`]
    pub query: Option<String>,

    /// Time between polls; also the retry delay after a failed poll
    pub poll_interval: Duration,
}

impl Config {
    /// Creates a configuration, trimming credentials and defaulting the site
    pub fn new(
        api_key: &str,
        app_key: &str,
        site: &str,
        query: Option<String>,
        poll_interval: Duration,
    ) -> Self {
        let site = site.trim();
        Self {
            api_key: api_key.trim().to_string(),
            app_key: app_key.trim().to_string(),
            site: if site.is_empty() {
                DEFAULT_SITE.to_string()
            } else {
                site.to_string()
            },
            query,
            poll_interval,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key.is_empty() {
            anyhow::bail!("API key is empty or contains only whitespace");
        }

        if self.app_key.is_empty() {
            anyhow::bail!("application key is empty or contains only whitespace");
        }

        if self.poll_interval.as_secs() == 0 {
            anyhow::bail!("poll interval must be greater than 0");
        }

        Ok(())
    }

    /// The effective search query for this session
    pub fn query(&self) -> &str {
        match self.query.as_deref() {
            Some(query) if !query.is_empty() => query,
            _ => DEFAULT_QUERY,
        }
    }
}
