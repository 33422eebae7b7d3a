//! Backup command handler
//!
//! Runs a full backup and prints where the files went.

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use grafbak_backup::run_backup;
use grafbak_core::filename::FilenameRules;
use grafbak_core::run::RunResult;
use std::path::PathBuf;
use tracing::info;

use crate::config::Config;

/// Arguments of the backup command
#[derive(Args, Debug)]
pub struct BackupArgs {
    /// Directory in which the GrafanaBackup_<timestamp> directory is created
    #[arg(short, long, env = "GRAFBAK_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Keep going when a dashboard fails and report failures at the end
    #[arg(long, env = "GRAFBAK_CONTINUE_ON_ERROR")]
    pub continue_on_error: bool,

    /// Maximum number of dashboards fetched at the same time
    #[arg(long, env = "GRAFBAK_MAX_CONCURRENCY", default_value = "1")]
    pub max_concurrency: usize,

    /// Characters replaced in file names: unix, windows, portable or custom:<chars>
    #[arg(long, env = "GRAFBAK_FILENAME_RULES", default_value = "portable")]
    pub filename_rules: FilenameRules,
}

/// Handle the backup command
pub async fn handle_backup_command(args: BackupArgs, config: &Config) -> Result<()> {
    let mut backup_config = super::backup_config(config)?
        .with_output_root(args.output_dir)
        .with_max_concurrency(args.max_concurrency)
        .with_filename_rules(args.filename_rules);
    if args.continue_on_error {
        backup_config = backup_config.continue_on_error();
    }
    backup_config.validate()?;

    info!(
        "Backing up dashboards from {} (concurrency {}, filename rules {})",
        backup_config.endpoint, backup_config.max_concurrency, backup_config.filename_rules
    );

    let result = run_backup(&backup_config)
        .await
        .context("Backup failed")?;

    print_summary(&result);

    if result.has_failures() {
        anyhow::bail!(
            "{} dashboard(s) could not be backed up",
            result.failures().count()
        );
    }

    Ok(())
}

/// Print the outcome of a completed run
fn print_summary(result: &RunResult) {
    if result.has_failures() {
        println!("{}", "! Backup finished with errors".yellow().bold());
    } else {
        println!("{}", "✓ Backup completed!".green().bold());
    }
    println!("  Saved:     {}", result.backed_up_count.to_string().cyan());
    println!("  Directory: {}", result.output_directory.display().to_string().bold());

    for (uid, error) in result.failures() {
        println!("  {} {}: {}", "✗".red(), uid.bold(), error.dimmed());
    }
}
