//! List command handler
//!
//! Runs dashboard discovery only, without writing anything.

use anyhow::{Context, Result};
use colored::*;
use grafbak_backup::DashboardLister;
use grafbak_client::GrafanaClient;
use std::sync::Arc;
use tracing::debug;

use crate::config::Config;

/// List the dashboards found by search
pub async fn handle_list_command(config: &Config) -> Result<()> {
    let backup_config = super::backup_config(config)?;
    let client = GrafanaClient::with_timeout(
        &backup_config.endpoint,
        &backup_config.token,
        backup_config.request_timeout,
    )?;
    debug!("Listing dashboards from {}", client.base_url());

    let refs = DashboardLister::new(Arc::new(client))
        .list()
        .await
        .context("Failed to list dashboards")?;

    if refs.is_empty() {
        println!("{}", "No dashboards found.".yellow());
    } else {
        println!("{}", format!("Found {} dashboard(s):", refs.len()).bold());
        for dashboard in refs {
            println!("  {} {}", "▸".cyan(), dashboard.uid);
        }
    }

    Ok(())
}
