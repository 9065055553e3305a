//! The tailing loop
//!
//! Polls the log-query service on a fixed interval, prints each batch, and
//! carries the pagination cursor forward so every poll resumes where the
//! previous one ended.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::watch;
use tokio::time::{self, Instant};
use tracing::{debug, warn};

use crate::output::LogFormatter;
use crate::tailing::cursor::extract_cursor;
use ddtail_client::LogQueryService;
use ddtail_core::LogBatch;

/// Drives fetch/print cycles until cancelled
///
/// Exactly one fetch is ever in flight: a new poll starts only after the
/// previous one's result has been processed. There is no retry backoff; the
/// fixed interval itself is the retry delay after a failed poll.
pub struct Tailer<S> {
    service: S,
    formatter: LogFormatter,
    interval: Duration,
}

impl<S: LogQueryService> Tailer<S> {
    /// Creates a new tailer polling `service` every `interval`
    pub fn new(service: S, formatter: LogFormatter, interval: Duration) -> Self {
        Self {
            service,
            formatter,
            interval,
        }
    }

    /// Runs the tail session for `query` until `shutdown` fires
    ///
    /// The first fetch happens immediately, so the user sees output without
    /// waiting a full interval; if it fails the session never started and
    /// the error is returned. After that, a failed poll is logged and the
    /// loop simply waits for the next tick, leaving the cursor untouched.
    /// Cancellation is a normal termination path and returns `Ok(())`.
    pub async fn run(&self, query: &str, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let batch = self
            .service
            .fetch_logs(query, None)
            .await
            .context("error fetching logs")?;
        self.print_batch(&batch);
        let mut cursor = extract_cursor(&batch);

        let mut next_poll = Instant::now() + self.interval;

        loop {
            tokio::select! {
                result = shutdown.changed() => {
                    // Flag flipped, or the sender is gone; either way no
                    // cancellation can arrive later, so stop cleanly now.
                    let _ = result;
                    debug!("shutdown requested while waiting, stopping tail loop");
                    return Ok(());
                }
                _ = time::sleep_until(next_poll) => {}
            }

            // Second observation point: the flag may have flipped between
            // the timer firing and this task resuming.
            if *shutdown.borrow() {
                debug!("shutdown requested before poll, stopping tail loop");
                return Ok(());
            }

            next_poll = Instant::now() + self.interval;

            match self.service.fetch_logs(query, cursor.as_deref()).await {
                Ok(batch) => {
                    self.print_batch(&batch);
                    // A page without pagination metadata keeps the previous
                    // cursor; only the first fetch of a session may run
                    // without one.
                    cursor = extract_cursor(&batch).or(cursor);
                }
                Err(e) => {
                    warn!("error fetching logs: {e}, retrying at next tick");
                }
            }
        }
    }

    /// Prints every renderable entry of a batch to stdout
    fn print_batch(&self, batch: &LogBatch) {
        for entry in &batch.data {
            if let Some(line) = self.formatter.render(entry) {
                println!("{line}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ddtail_client::ClientError;
    use ddtail_core::{LogAttributes, LogEntry, PageMeta, ResponseMeta};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Serves a scripted sequence of responses, records the cursor of every
    /// call, and trips the shutdown flag once the script runs out.
    struct ScriptedService {
        responses: Mutex<VecDeque<ddtail_client::Result<LogBatch>>>,
        cursors: Mutex<Vec<Option<String>>>,
        done: watch::Sender<bool>,
    }

    impl ScriptedService {
        fn new(
            responses: Vec<ddtail_client::Result<LogBatch>>,
        ) -> (Self, watch::Receiver<bool>) {
            let (done, shutdown) = watch::channel(false);
            let service = Self {
                responses: Mutex::new(responses.into()),
                cursors: Mutex::new(Vec::new()),
                done,
            };
            (service, shutdown)
        }

        fn seen_cursors(&self) -> Vec<Option<String>> {
            self.cursors.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LogQueryService for ScriptedService {
        async fn fetch_logs(
            &self,
            _query: &str,
            cursor: Option<&str>,
        ) -> ddtail_client::Result<LogBatch> {
            self.cursors.lock().unwrap().push(cursor.map(str::to_string));

            let mut responses = self.responses.lock().unwrap();
            let response = responses
                .pop_front()
                .unwrap_or_else(|| Err(ClientError::InternalError("script exhausted".into())));
            if responses.is_empty() {
                let _ = self.done.send(true);
            }
            response
        }
    }

    fn batch(messages: &[&str], after: Option<&str>) -> LogBatch {
        LogBatch {
            data: messages
                .iter()
                .map(|m| LogEntry {
                    id: None,
                    attributes: Some(LogAttributes {
                        timestamp: Some("2024-03-01T12:00:00Z".parse().unwrap()),
                        service: Some("web-app".to_string()),
                        status: Some("info".to_string()),
                        message: Some(m.to_string()),
                    }),
                })
                .collect(),
            meta: after.map(|token| ResponseMeta {
                page: Some(PageMeta {
                    after: Some(token.to_string()),
                }),
            }),
        }
    }

    fn tailer(service: ScriptedService, interval: Duration) -> Tailer<ScriptedService> {
        Tailer::new(service, LogFormatter::with_width(80), interval)
    }

    #[tokio::test]
    async fn test_initial_fetch_failure_is_fatal() {
        let (service, shutdown) =
            ScriptedService::new(vec![Err(ClientError::InternalError("boom".into()))]);
        let tailer = tailer(service, Duration::from_secs(3600));

        let result = tailer.run("service:web", shutdown).await;

        assert!(result.is_err());
        assert_eq!(tailer.service.seen_cursors(), vec![None]);
    }

    #[tokio::test]
    async fn test_cancellation_before_second_tick_stops_cleanly() {
        // The script ends after the first fetch, so the shutdown flag flips
        // before the hour-long timer could ever fire.
        let (service, shutdown) =
            ScriptedService::new(vec![Ok(batch(&["one", "two"], Some("c1")))]);
        let tailer = tailer(service, Duration::from_secs(3600));

        let result = tailer.run("service:web", shutdown).await;

        assert!(result.is_ok());
        assert_eq!(tailer.service.seen_cursors(), vec![None]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_poll_leaves_cursor_untouched() {
        let (service, shutdown) = ScriptedService::new(vec![
            Ok(batch(&["one"], Some("c1"))),
            Err(ClientError::InternalError("transient".into())),
            Ok(batch(&["two"], Some("c2"))),
        ]);
        let tailer = tailer(service, Duration::from_secs(5));

        let result = tailer.run("service:web", shutdown).await;

        assert!(result.is_ok());
        // The third fetch resumes from the first fetch's cursor, not
        // anything derived from the failed second poll.
        assert_eq!(
            tailer.service.seen_cursors(),
            vec![None, Some("c1".to_string()), Some("c1".to_string())]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_metadata_keeps_previous_cursor() {
        let (service, shutdown) = ScriptedService::new(vec![
            Ok(batch(&["one"], Some("c1"))),
            Ok(batch(&[], None)),
            Ok(batch(&["two"], Some("c2"))),
        ]);
        let tailer = tailer(service, Duration::from_secs(5));

        let result = tailer.run("service:web", shutdown).await;

        assert!(result.is_ok());
        assert_eq!(
            tailer.service.seen_cursors(),
            vec![None, Some("c1".to_string()), Some("c1".to_string())]
        );
    }
}
