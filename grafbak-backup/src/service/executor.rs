//! Backup executor
//!
//! Runs one backup:
//! - Creating the timestamped run directory
//! - Listing dashboards
//! - Fetching each dashboard and writing its definition to disk
//!
//! Files are always written in discovery order, one at a time. With
//! `max_concurrency > 1` several fetches may be in flight, but their results
//! are still consumed in order, so when two dashboards map to the same file
//! name the later one wins and a fail-fast abort leaves exactly the files of
//! the dashboards before the failing one.

use chrono::{DateTime, Local};
use futures::stream::{self, StreamExt};
use grafbak_core::dashboard::DashboardPayload;
use grafbak_core::filename::FilenameRules;
use grafbak_core::run::{BackupRun, ItemOutcome, RunResult, RunState};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::config::BackupConfig;
use crate::error::{ItemError, RunError};
use crate::service::lister::DashboardLister;
use crate::source::DashboardSource;

/// Options controlling a run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Stop at the first failed dashboard
    pub abort_on_first_error: bool,
    /// Maximum number of fetches in flight (1 = strictly sequential)
    pub max_concurrency: usize,
    /// Characters replaced in file names
    pub filename_rules: FilenameRules,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            abort_on_first_error: true,
            max_concurrency: 1,
            filename_rules: FilenameRules::default(),
        }
    }
}

impl From<&BackupConfig> for RunOptions {
    fn from(config: &BackupConfig) -> Self {
        Self {
            abort_on_first_error: config.abort_on_first_error,
            max_concurrency: config.max_concurrency,
            filename_rules: config.filename_rules.clone(),
        }
    }
}

/// Executes backup runs against a dashboard source
pub struct BackupExecutor {
    source: Arc<dyn DashboardSource>,
    lister: DashboardLister,
    options: RunOptions,
}

impl BackupExecutor {
    pub fn new(source: Arc<dyn DashboardSource>, options: RunOptions) -> Self {
        Self {
            lister: DashboardLister::new(Arc::clone(&source)),
            source,
            options,
        }
    }

    /// Runs a backup into a new directory below `output_root`
    pub async fn run(&self, output_root: &Path) -> Result<RunResult, RunError> {
        self.run_started_at(output_root, Local::now()).await
    }

    /// Runs a backup whose directory name is derived from `started_at`
    pub async fn run_started_at(
        &self,
        output_root: &Path,
        started_at: DateTime<Local>,
    ) -> Result<RunResult, RunError> {
        let mut run = BackupRun::new(output_root, started_at);
        info!("Starting backup into {}", run.output_directory.display());

        if let Err(e) = create_run_directory(output_root, &run.output_directory).await {
            return Err(fail(&mut run, e));
        }
        transition(&mut run, RunState::DirectoryCreated);

        transition(&mut run, RunState::Listing);
        let refs = match self.lister.list().await {
            Ok(refs) => refs,
            Err(e) => return Err(fail(&mut run, RunError::ListFailed(e))),
        };
        info!("Found {} dashboard(s)", refs.len());

        let uids: Vec<String> = refs.into_iter().map(|r| r.uid).collect();
        let source = &self.source;
        let mut fetches = stream::iter(uids.clone())
            .map(|uid| {
                let source = Arc::clone(source);
                async move { fetch_payload(source.as_ref(), &uid).await }
            })
            .buffered(self.options.max_concurrency.max(1));

        for uid in uids {
            transition(&mut run, RunState::Fetching { uid: uid.clone() });
            let Some(fetched) = fetches.next().await else {
                break;
            };

            let written = match fetched {
                Ok(payload) => {
                    transition(&mut run, RunState::Writing { uid: uid.clone() });
                    self.write_payload(&run.output_directory, &payload).await
                }
                Err(e) => Err(e),
            };

            match written {
                Ok((title, path)) => {
                    info!("Backed up dashboard '{}' to {}", title, path.display());
                    run.record(uid, ItemOutcome::Saved { title, path });
                }
                Err(cause) if self.options.abort_on_first_error => {
                    return Err(fail(&mut run, RunError::ItemFailed { uid, cause }));
                }
                Err(cause) => {
                    warn!("Skipping dashboard '{}': {}", uid, cause);
                    run.record(
                        uid,
                        ItemOutcome::Failed {
                            error: cause.to_string(),
                        },
                    );
                }
            }
        }

        transition(&mut run, RunState::Completed);
        info!(
            "Backup completed: {} saved, {} failed",
            run.saved_count(),
            run.failed_count()
        );

        Ok(run.into_result())
    }

    /// Writes the dashboard object to `{dir}/{sanitized title}_backup.json`
    ///
    /// Existing files are overwritten.
    async fn write_payload(
        &self,
        dir: &Path,
        payload: &DashboardPayload,
    ) -> Result<(String, PathBuf), ItemError> {
        let title = payload.title();
        let path = dir.join(self.options.filename_rules.backup_file_name(&title));
        let json = payload.to_pretty_json().map_err(ItemError::Serialize)?;

        tokio::fs::write(&path, json)
            .await
            .map_err(|source| ItemError::Write {
                path: path.clone(),
                source,
            })?;

        Ok((title, path))
    }
}

/// Fetches and parses one dashboard
async fn fetch_payload(
    source: &dyn DashboardSource,
    uid: &str,
) -> Result<DashboardPayload, ItemError> {
    let body = source.dashboard(uid).await?;
    let response: serde_json::Value = serde_json::from_slice(&body)?;
    DashboardPayload::from_response(response).ok_or(ItemError::MissingDashboard)
}

/// Creates the output root if needed and the run directory exclusively
async fn create_run_directory(output_root: &Path, dir: &Path) -> Result<(), RunError> {
    let to_error = |source: std::io::Error| RunError::DirectoryCreate {
        path: dir.to_path_buf(),
        source,
    };

    tokio::fs::create_dir_all(output_root).await.map_err(to_error)?;
    tokio::fs::create_dir(dir).await.map_err(to_error)
}

fn transition(run: &mut BackupRun, state: RunState) {
    debug!("run state: {:?} -> {:?}", run.state, state);
    run.transition(state);
}

fn fail(run: &mut BackupRun, err: RunError) -> RunError {
    error!("Backup failed: {}", err);
    transition(
        run,
        RunState::Failed {
            reason: err.to_string(),
        },
    );
    err
}
