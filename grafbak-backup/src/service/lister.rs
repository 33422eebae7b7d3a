//! Dashboard lister
//!
//! Discovers dashboards through a single search request.

use grafbak_core::dashboard::DashboardRef;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::debug;

use crate::error::ListError;
use crate::source::DashboardSource;

/// Lists the dashboards of a Grafana instance
pub struct DashboardLister {
    source: Arc<dyn DashboardSource>,
}

impl DashboardLister {
    pub fn new(source: Arc<dyn DashboardSource>) -> Self {
        Self { source }
    }

    /// Returns one reference per search hit with a non-empty uid
    ///
    /// Order follows the search response. Duplicates are kept.
    pub async fn list(&self) -> Result<Vec<DashboardRef>, ListError> {
        let body = self.source.search().await?;
        let refs = parse_search_response(&body)?;
        debug!("search returned {} dashboard(s)", refs.len());
        Ok(refs)
    }
}

/// Parses a search response body into dashboard references
///
/// Hits without a uid, with an empty uid, or that are not objects are skipped.
pub fn parse_search_response(body: &[u8]) -> Result<Vec<DashboardRef>, ListError> {
    let hits: Vec<JsonValue> =
        serde_json::from_slice(body).map_err(|e| ListError::InvalidResponse(e.to_string()))?;

    Ok(hits.iter().filter_map(DashboardRef::from_search_hit).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fake::FakeSource;

    fn uids(refs: &[DashboardRef]) -> Vec<&str> {
        refs.iter().map(|r| r.uid.as_str()).collect()
    }

    #[test]
    fn test_skips_empty_uid() {
        let refs = parse_search_response(br#"[{"uid":"a"},{"uid":""},{"uid":"b"}]"#).unwrap();
        assert_eq!(uids(&refs), vec!["a", "b"]);
    }

    #[test]
    fn test_keeps_order_and_duplicates() {
        let body = br#"[
            {"uid":"z","title":"Z","type":"dash-db"},
            {"title":"folder without uid","type":"dash-folder"},
            {"uid":"a"},
            {"uid":"z"},
            42
        ]"#;
        let refs = parse_search_response(body).unwrap();
        assert_eq!(uids(&refs), vec!["z", "a", "z"]);
    }

    #[test]
    fn test_empty_array() {
        assert!(parse_search_response(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(matches!(
            parse_search_response(br#"{"uid":"a"}"#),
            Err(ListError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_search_response(b"<html>login</html>"),
            Err(ListError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_list_through_source() {
        let source = Arc::new(FakeSource::new(r#"[{"uid":"a"},{"uid":""},{"uid":"b"}]"#));
        let lister = DashboardLister::new(source.clone());

        let refs = lister.list().await.unwrap();
        assert_eq!(uids(&refs), vec!["a", "b"]);
        assert_eq!(source.requests(), vec!["search"]);
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let lister = DashboardLister::new(Arc::new(FakeSource::failing_search(401)));

        match lister.list().await {
            Err(ListError::Transport(e)) => assert!(e.is_unauthorized()),
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
