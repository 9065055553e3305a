//! Cursor extraction
//!
//! The resume token lives deep in optional pagination metadata; any missing
//! link in that chain means the page carries no cursor.

use ddtail_core::LogBatch;

/// Extracts the resume token from a batch's pagination metadata
///
/// Returns `None` when the metadata or the token is absent or empty —
/// never a stale or fabricated token. An absent cursor means "fall back to
/// the bounded lookback window", which the tailer allows only on the very
/// first fetch of a session; afterwards it keeps the previous cursor.
pub fn extract_cursor(batch: &LogBatch) -> Option<String> {
    batch
        .meta
        .as_ref()?
        .page
        .as_ref()?
        .after
        .as_deref()
        .filter(|after| !after.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddtail_core::{PageMeta, ResponseMeta};

    fn batch_with_after(after: Option<&str>) -> LogBatch {
        LogBatch {
            data: Vec::new(),
            meta: Some(ResponseMeta {
                page: Some(PageMeta {
                    after: after.map(str::to_string),
                }),
            }),
        }
    }

    #[test]
    fn test_present_token_returned_exactly() {
        let batch = batch_with_after(Some("eyJhZnRlciI6IjEyMyJ9"));
        assert_eq!(extract_cursor(&batch).as_deref(), Some("eyJhZnRlciI6IjEyMyJ9"));
    }

    #[test]
    fn test_absent_metadata_yields_none() {
        assert!(extract_cursor(&LogBatch::default()).is_none());

        let no_page = LogBatch {
            data: Vec::new(),
            meta: Some(ResponseMeta { page: None }),
        };
        assert!(extract_cursor(&no_page).is_none());

        assert!(extract_cursor(&batch_with_after(None)).is_none());
    }

    #[test]
    fn test_empty_token_yields_none() {
        assert!(extract_cursor(&batch_with_after(Some(""))).is_none());
    }
}
