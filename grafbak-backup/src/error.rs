//! Error types for backup runs

use grafbak_client::ClientError;
use std::path::PathBuf;
use thiserror::Error;

/// Dashboard discovery failed
#[derive(Debug, Error)]
pub enum ListError {
    /// The search request itself failed
    #[error("search request failed: {0}")]
    Transport(#[from] ClientError),

    /// The search response was not a JSON array
    #[error("search response is not a JSON array: {0}")]
    InvalidResponse(String),
}

/// A single dashboard could not be backed up
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("fetch failed: {0}")]
    Transport(#[from] ClientError),

    #[error("response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("response has no 'dashboard' object")]
    MissingDashboard,

    #[error("failed to serialize dashboard: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A backup run was aborted
///
/// Files written before the failure stay on disk.
#[derive(Debug, Error)]
pub enum RunError {
    /// The HTTP client could not be built
    #[error("failed to configure Grafana client: {0}")]
    Client(#[from] ClientError),

    #[error("failed to create output directory {}: {source}", .path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to list dashboards: {0}")]
    ListFailed(#[from] ListError),

    #[error("backup of dashboard '{uid}' failed: {cause}")]
    ItemFailed {
        uid: String,
        #[source]
        cause: ItemError,
    },
}
