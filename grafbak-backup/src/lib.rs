//! Grafbak Backup
//!
//! Backs up every dashboard of a Grafana instance into a timestamped directory.
//!
//! Architecture:
//! - Configuration: endpoint, credential and run options
//! - Source: the seam between the pipeline and the Grafana API
//! - Services: dashboard discovery (lister) and the backup run itself (executor)
//!
//! A run creates `GrafanaBackup_{yyyyMMdd_HHmmss}` below the output root, lists
//! dashboard uids through the search endpoint, then fetches and writes one
//! `{title}_backup.json` per dashboard in discovery order.

pub mod config;
pub mod error;
pub mod service;
pub mod source;

pub use config::BackupConfig;
pub use error::{ItemError, ListError, RunError};
pub use service::{BackupExecutor, DashboardLister, RunOptions};
pub use source::DashboardSource;

use grafbak_client::GrafanaClient;
use grafbak_core::run::RunResult;
use std::sync::Arc;

/// Runs one complete backup as described by `config`
///
/// The caller is expected to have validated `config` first. A fresh client is
/// built for every run, so concurrent runs never share a credential.
pub async fn run_backup(config: &BackupConfig) -> Result<RunResult, RunError> {
    let client = GrafanaClient::with_timeout(&config.endpoint, &config.token, config.request_timeout)?;

    let executor = BackupExecutor::new(Arc::new(client), RunOptions::from(config));
    executor.run(&config.output_root).await
}
