//! Grafbak HTTP Client
//!
//! A small, read-only HTTP client for the Grafana REST API.
//!
//! The client carries one bearer credential for its whole lifetime. It is set
//! once when the client is built and never changed afterwards, so runs using
//! different credentials must build their own clients.
//!
//! # Example
//!
//! ```no_run
//! use grafbak_client::GrafanaClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GrafanaClient::new("https://grafana.example.com", "glsa_xxx")?;
//!
//!     let body = client.search_dashboards().await?;
//!     println!("search returned {} bytes", body.len());
//!     Ok(())
//! }
//! ```

mod dashboards;
pub mod error;
mod search;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::{Client, Url};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::debug;

/// Request timeout used when none is given
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the Grafana API
///
/// Every request carries `Authorization: Bearer {token}`. Non-2xx responses
/// are turned into [`ClientError::ApiError`]; there is no retry.
#[derive(Debug, Clone)]
pub struct GrafanaClient {
    /// Base URL of the Grafana instance, without trailing slash
    base_url: String,
    /// HTTP client instance with the credential installed
    client: Client,
}

impl GrafanaClient {
    /// Create a new client using [`DEFAULT_TIMEOUT`]
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the Grafana instance (e.g., "https://grafana.example.com")
    /// * `token` - API key or service account token
    pub fn new(base_url: impl Into<String>, token: &str) -> Result<Self> {
        Self::with_timeout(base_url, token, DEFAULT_TIMEOUT)
    }

    /// Create a new client with an explicit request timeout
    ///
    /// # Example
    /// ```
    /// use grafbak_client::GrafanaClient;
    /// use std::time::Duration;
    ///
    /// let client = GrafanaClient::with_timeout(
    ///     "http://localhost:3000/",
    ///     "secret",
    ///     Duration::from_secs(5),
    /// ).unwrap();
    /// assert_eq!(client.base_url(), "http://localhost:3000");
    /// ```
    pub fn with_timeout(base_url: impl Into<String>, token: &str, timeout: Duration) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.trim())).map_err(|_| {
            ClientError::InvalidRequest("token contains characters not allowed in a header".into())
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self::with_client(base_url, client))
    }

    /// Create a client around a pre-configured reqwest client
    ///
    /// The caller is responsible for installing the credential on `client`.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the Grafana instance
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a GET for `path` (starting with `/`) and return the raw body
    ///
    /// `path` is used verbatim; callers encode any dynamic segments.
    pub async fn get(&self, path: &str) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Build `{base_url}{prefix}/{segment}` with `segment` percent-encoded
    pub(crate) fn url_with_segment(&self, prefix: &str, segment: &str) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, prefix))
            .map_err(|e| ClientError::InvalidRequest(format!("invalid Grafana URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidRequest("Grafana URL cannot be a base".into()))?
            .push(segment);
        Ok(url)
    }

    async fn get_url(&self, url: Url) -> Result<Vec<u8>> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and return the body of a successful response
    async fn handle_response(&self, response: reqwest::Response) -> Result<Vec<u8>> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            debug!("request failed with status {}", status);
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
pub(crate) mod test_server {
    //! One-shot HTTP server used to exercise the client end to end

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serves a single request with `status` and `body`, returning the raw request
    pub async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();

            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{}", addr), handle)
    }
}
