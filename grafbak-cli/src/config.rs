//! Configuration module
//!
//! Connection settings shared by every command.

use std::time::Duration;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Grafana base URL
    pub grafana_url: String,
    /// Bearer credential
    pub token: String,
    /// Timeout applied to every request
    pub request_timeout: Duration,
}
