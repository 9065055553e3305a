//! Log search endpoint

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use std::time::Duration;
use tracing::debug;

use crate::error::Result;
use crate::{DatadogLogsClient, LogQueryService};
use ddtail_core::LogBatch;

/// Records requested per page; the service caps this server-side anyway
const PAGE_LIMIT: u32 = 10;

/// Lookback window applied when no cursor is available
const LOOKBACK_MINUTES: i64 = 15;

/// Per-request deadline
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

impl DatadogLogsClient {
    /// Fetch one page of log entries
    ///
    /// # Arguments
    /// * `query` - The search query (e.g., "service:my-app")
    /// * `cursor` - Resume token from the previous fetch, or `None` for the
    ///   first call of a session
    ///
    /// # Returns
    /// One page of matching entries plus pagination metadata
    pub async fn fetch_logs(&self, query: &str, cursor: Option<&str>) -> Result<LogBatch> {
        let url = format!("{}/api/v2/logs/events", self.base_url());
        let params = search_params(query, cursor, Utc::now());

        debug!(query, cursor = cursor.unwrap_or(""), "fetching logs");

        let response = self
            .client
            .get(&url)
            .header("DD-API-KEY", &self.api_key)
            .header("DD-APPLICATION-KEY", &self.app_key)
            .query(&params)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        self.handle_response(response).await
    }
}

#[async_trait]
impl LogQueryService for DatadogLogsClient {
    async fn fetch_logs(&self, query: &str, cursor: Option<&str>) -> Result<LogBatch> {
        DatadogLogsClient::fetch_logs(self, query, cursor).await
    }
}

/// Assemble the query string for one search call
///
/// With a non-empty cursor the request resumes exactly where the last page
/// ended. Without one it asks for the last [`LOOKBACK_MINUTES`] instead,
/// so a fresh session never replays the entire log history.
fn search_params(
    query: &str,
    cursor: Option<&str>,
    now: DateTime<Utc>,
) -> Vec<(&'static str, String)> {
    let mut params = vec![("page[limit]", PAGE_LIMIT.to_string())];

    if !query.is_empty() {
        params.push(("filter[query]", query.to_string()));
    }

    match cursor {
        Some(token) if !token.is_empty() => {
            params.push(("page[cursor]", token.to_string()));
        }
        _ => {
            let from = now - chrono::Duration::minutes(LOOKBACK_MINUTES);
            params.push((
                "filter[from]",
                from.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }
    }

    params
}
