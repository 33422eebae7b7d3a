//! Backup run bookkeeping
//!
//! A run is created when a backup starts, records one outcome per discovered
//! dashboard and ends either completed or failed. There is no resume: a failed
//! run is started again from scratch.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix of every run directory
pub const RUN_DIRECTORY_PREFIX: &str = "GrafanaBackup_";

/// Timestamp format of the run directory name (second granularity)
pub const RUN_DIRECTORY_TIMESTAMP: &str = "%Y%m%d_%H%M%S";

/// Name of the directory a run started at `started_at` writes into
pub fn run_directory_name(started_at: &DateTime<Local>) -> String {
    format!(
        "{}{}",
        RUN_DIRECTORY_PREFIX,
        started_at.format(RUN_DIRECTORY_TIMESTAMP)
    )
}

/// Lifecycle of a run
///
/// `Idle -> DirectoryCreated -> Listing -> (Fetching -> Writing)* -> Completed`,
/// with `Failed` reachable from any state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Idle,
    DirectoryCreated,
    Listing,
    Fetching { uid: String },
    Writing { uid: String },
    Completed,
    Failed { reason: String },
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed { .. })
    }
}

/// What happened to a single dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemOutcome {
    Saved { title: String, path: PathBuf },
    Failed { error: String },
}

impl ItemOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// A single backup run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupRun {
    pub started_at: DateTime<Local>,
    pub output_directory: PathBuf,
    pub state: RunState,
    pub results: Vec<(String, ItemOutcome)>,
}

impl BackupRun {
    /// Starts a run writing below `output_root`
    pub fn new(output_root: &Path, started_at: DateTime<Local>) -> Self {
        Self {
            output_directory: output_root.join(run_directory_name(&started_at)),
            started_at,
            state: RunState::Idle,
            results: Vec::new(),
        }
    }

    /// Moves the run to `state`
    ///
    /// Terminal states are sticky; later transitions are ignored.
    pub fn transition(&mut self, state: RunState) {
        if !self.state.is_terminal() {
            self.state = state;
        }
    }

    pub fn record(&mut self, uid: impl Into<String>, outcome: ItemOutcome) {
        self.results.push((uid.into(), outcome));
    }

    pub fn saved_count(&self) -> usize {
        self.results.iter().filter(|(_, o)| o.is_saved()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.results.len() - self.saved_count()
    }

    /// Final summary handed back to the caller
    pub fn into_result(self) -> RunResult {
        RunResult {
            backed_up_count: self.saved_count(),
            output_directory: self.output_directory,
            outcomes: self.results,
        }
    }
}

/// Outcome of a run that was not aborted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub output_directory: PathBuf,
    /// Dashboards written successfully
    pub backed_up_count: usize,
    /// Per-dashboard outcomes in discovery order
    pub outcomes: Vec<(String, ItemOutcome)>,
}

impl RunResult {
    /// Outcomes that failed (only possible when the run continues on error)
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|(uid, outcome)| match outcome {
            ItemOutcome::Failed { error } => Some((uid.as_str(), error.as_str())),
            ItemOutcome::Saved { .. } => None,
        })
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn started_at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap()
    }

    #[test]
    fn test_run_directory_name() {
        assert_eq!(run_directory_name(&started_at()), "GrafanaBackup_20240309_070501");
    }

    #[test]
    fn test_new_run_is_idle() {
        let run = BackupRun::new(Path::new("/backups"), started_at());
        assert_eq!(run.state, RunState::Idle);
        assert_eq!(
            run.output_directory,
            PathBuf::from("/backups/GrafanaBackup_20240309_070501")
        );
    }

    #[test]
    fn test_terminal_state_is_sticky() {
        let mut run = BackupRun::new(Path::new("out"), started_at());
        run.transition(RunState::Listing);
        run.transition(RunState::Failed {
            reason: "boom".to_string(),
        });
        run.transition(RunState::Completed);
        assert_eq!(
            run.state,
            RunState::Failed {
                reason: "boom".to_string()
            }
        );
    }

    #[test]
    fn test_counts_and_result() {
        let mut run = BackupRun::new(Path::new("out"), started_at());
        run.record(
            "a",
            ItemOutcome::Saved {
                title: "A".to_string(),
                path: PathBuf::from("out/A_backup.json"),
            },
        );
        run.record(
            "b",
            ItemOutcome::Failed {
                error: "404".to_string(),
            },
        );

        assert_eq!(run.saved_count(), 1);
        assert_eq!(run.failed_count(), 1);

        let result = run.into_result();
        assert_eq!(result.backed_up_count, 1);
        assert!(result.has_failures());
        assert_eq!(result.failures().collect::<Vec<_>>(), vec![("b", "404")]);
    }
}
