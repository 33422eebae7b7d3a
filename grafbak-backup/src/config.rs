//! Backup configuration
//!
//! Defines everything a backup run needs: where Grafana lives, which
//! credential to present, where to write, and how strict to be about failures.

use grafbak_core::filename::FilenameRules;
use std::path::PathBuf;
use std::time::Duration;

/// Backup configuration
///
/// One value per run. The credential lives here and in the client built from
/// it, never in shared state.
#[derive(Debug, Clone)]
pub struct BackupConfig {
    /// Grafana base URL (e.g., "https://grafana.example.com"), no trailing slash
    pub endpoint: String,

    /// API key or service account token sent as a bearer credential
    pub token: String,

    /// Directory in which the timestamped run directory is created
    pub output_root: PathBuf,

    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,

    /// Stop at the first dashboard that cannot be backed up
    pub abort_on_first_error: bool,

    /// Maximum number of dashboard fetches in flight
    pub max_concurrency: usize,

    /// Characters replaced when turning titles into file names
    pub filename_rules: FilenameRules,
}

impl BackupConfig {
    /// Creates a new configuration with defaults
    ///
    /// Endpoint and token are trimmed and the endpoint loses any trailing
    /// slash. Output goes to the current directory.
    pub fn new(endpoint: impl AsRef<str>, token: impl AsRef<str>) -> Self {
        Self {
            endpoint: endpoint.as_ref().trim().trim_end_matches('/').to_string(),
            token: token.as_ref().trim().to_string(),
            output_root: PathBuf::from("."),
            request_timeout: Duration::from_secs(30),
            abort_on_first_error: true,
            max_concurrency: 1,
            filename_rules: FilenameRules::default(),
        }
    }

    pub fn with_output_root(mut self, output_root: impl Into<PathBuf>) -> Self {
        self.output_root = output_root.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Keeps going after a failed dashboard and reports it in the result
    pub fn continue_on_error(mut self) -> Self {
        self.abort_on_first_error = false;
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    pub fn with_filename_rules(mut self, rules: FilenameRules) -> Self {
        self.filename_rules = rules;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.endpoint.is_empty() {
            anyhow::bail!("Grafana URL cannot be empty");
        }

        if self.token.is_empty() {
            anyhow::bail!("API token cannot be empty");
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            anyhow::bail!("Grafana URL must start with http:// or https://");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request timeout must be greater than 0");
        }

        if self.max_concurrency == 0 {
            anyhow::bail!("max concurrency must be at least 1");
        }

        Ok(())
    }
}
