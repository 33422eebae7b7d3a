//! Search API endpoint

use crate::GrafanaClient;
use crate::error::Result;

/// Path of the search request; the empty query matches every dashboard
pub(crate) const SEARCH_PATH: &str = "/api/search?query=&";

impl GrafanaClient {
    /// Query the search endpoint once and return the raw JSON body
    ///
    /// Only a single request is issued; results beyond Grafana's default page
    /// size are not fetched.
    pub async fn search_dashboards(&self) -> Result<Vec<u8>> {
        self.get(SEARCH_PATH).await
    }
}
