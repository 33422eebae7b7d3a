//! Dashboard API endpoint

use crate::GrafanaClient;
use crate::error::Result;

impl GrafanaClient {
    /// Fetch the full definition of a dashboard
    ///
    /// # Arguments
    /// * `uid` - The dashboard uid as returned by search
    ///
    /// # Returns
    /// The raw JSON body, `{ "dashboard": {...}, "meta": {...} }`
    ///
    /// The uid is percent-encoded as a single path segment.
    pub async fn get_dashboard(&self, uid: &str) -> Result<Vec<u8>> {
        let url = self.url_with_segment("/api/dashboards/uid", uid)?;
        self.get_url(url).await
    }
}

#[cfg(test)]
mod tests {
    use crate::GrafanaClient;
    use crate::test_server::serve_once;

    #[tokio::test]
    async fn test_dashboard_path() {
        let (url, server) = serve_once("200 OK", r#"{"dashboard":{"title":"x"}}"#).await;
        let client = GrafanaClient::new(url, "token").unwrap();

        client.get_dashboard("abc-123").await.unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/dashboards/uid/abc-123 HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_uid_is_encoded_as_one_segment() {
        let (url, server) = serve_once("200 OK", r#"{"dashboard":{"title":"x"}}"#).await;
        let client = GrafanaClient::new(url, "token").unwrap();

        client.get_dashboard("a/b?c#d e").await.unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/dashboards/uid/a%2Fb%3Fc%23d%20e HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_missing_dashboard_is_not_found() {
        let (url, server) = serve_once("404 Not Found", r#"{"message":"Dashboard not found"}"#).await;
        let client = GrafanaClient::new(url, "token").unwrap();

        let err = client.get_dashboard("nope").await.unwrap_err();
        assert!(err.is_not_found());

        server.await.unwrap();
    }
}
