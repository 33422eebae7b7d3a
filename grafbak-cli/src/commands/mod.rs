//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod backup;
mod list;

use anyhow::Result;
use clap::Subcommand;
use grafbak_backup::BackupConfig;

use crate::config::Config;

pub use backup::BackupArgs;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Back up every dashboard into a timestamped directory
    Backup(BackupArgs),
    /// List the dashboard uids a backup would fetch
    List,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Backup(args) => backup::handle_backup_command(args, config).await,
        Commands::List => list::handle_list_command(config).await,
    }
}

/// Builds and validates the backup configuration shared by all commands
///
/// Empty URL or token are rejected here, before anything reaches Grafana.
fn backup_config(config: &Config) -> Result<BackupConfig> {
    let backup_config = BackupConfig::new(&config.grafana_url, &config.token)
        .with_request_timeout(config.request_timeout);
    backup_config.validate()?;
    Ok(backup_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(url: &str, token: &str) -> Config {
        Config {
            grafana_url: url.to_string(),
            token: token.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }

    #[test]
    fn test_backup_config_requires_url_and_token() {
        assert!(backup_config(&config("", "token")).is_err());
        assert!(backup_config(&config("https://grafana.local", "")).is_err());
    }

    #[test]
    fn test_backup_config_normalizes_url() {
        let cfg = backup_config(&config(" https://grafana.local/ ", "token")).unwrap();
        assert_eq!(cfg.endpoint, "https://grafana.local");
        assert_eq!(cfg.request_timeout, Duration::from_secs(30));
    }
}
