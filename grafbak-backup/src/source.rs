//! Dashboard source
//!
//! The seam between the backup pipeline and Grafana. The HTTP client is the
//! only production implementation; tests plug in canned responses.

use async_trait::async_trait;
use grafbak_client::{GrafanaClient, Result};

/// Where dashboards are read from
#[async_trait]
pub trait DashboardSource: Send + Sync {
    /// Raw body of the search endpoint
    async fn search(&self) -> Result<Vec<u8>>;

    /// Raw body of the dashboard endpoint for `uid`
    async fn dashboard(&self, uid: &str) -> Result<Vec<u8>>;
}

#[async_trait]
impl DashboardSource for GrafanaClient {
    async fn search(&self) -> Result<Vec<u8>> {
        self.search_dashboards().await
    }

    async fn dashboard(&self, uid: &str) -> Result<Vec<u8>> {
        self.get_dashboard(uid).await
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use grafbak_client::ClientError;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Body of a dashboard response with the given title
    pub fn dashboard_body(title: &str) -> String {
        json!({
            "dashboard": { "title": title, "uid": title, "panels": [{ "id": 1 }] },
            "meta": { "slug": "ignored" }
        })
        .to_string()
    }

    /// In-memory source with canned responses
    ///
    /// Unknown uids answer 404 like Grafana does.
    pub struct FakeSource {
        search: std::result::Result<String, u16>,
        dashboards: HashMap<String, std::result::Result<String, u16>>,
        delays: HashMap<String, Duration>,
        requests: Mutex<Vec<String>>,
    }

    impl FakeSource {
        pub fn new(search_body: impl Into<String>) -> Self {
            Self {
                search: Ok(search_body.into()),
                dashboards: HashMap::new(),
                delays: HashMap::new(),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn failing_search(status: u16) -> Self {
            Self {
                search: Err(status),
                ..Self::new("")
            }
        }

        pub fn with_dashboard(mut self, uid: &str, body: impl Into<String>) -> Self {
            self.dashboards.insert(uid.to_string(), Ok(body.into()));
            self
        }

        pub fn with_failing_dashboard(mut self, uid: &str, status: u16) -> Self {
            self.dashboards.insert(uid.to_string(), Err(status));
            self
        }

        pub fn with_delay(mut self, uid: &str, delay: Duration) -> Self {
            self.delays.insert(uid.to_string(), delay);
            self
        }

        /// Uids requested so far, `"search"` for the search call
        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DashboardSource for FakeSource {
        async fn search(&self) -> Result<Vec<u8>> {
            self.requests.lock().unwrap().push("search".to_string());
            match &self.search {
                Ok(body) => Ok(body.clone().into_bytes()),
                Err(status) => Err(ClientError::api_error(*status, "search rejected")),
            }
        }

        async fn dashboard(&self, uid: &str) -> Result<Vec<u8>> {
            self.requests.lock().unwrap().push(uid.to_string());
            if let Some(delay) = self.delays.get(uid) {
                tokio::time::sleep(*delay).await;
            }
            match self.dashboards.get(uid) {
                Some(Ok(body)) => Ok(body.clone().into_bytes()),
                Some(Err(status)) => Err(ClientError::api_error(*status, "dashboard rejected")),
                None => Err(ClientError::api_error(404, "Dashboard not found")),
            }
        }
    }
}
