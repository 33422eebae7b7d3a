//! Service layer
//!
//! Services contain the backup logic. They talk to Grafana only through a
//! [`DashboardSource`](crate::source::DashboardSource), which keeps them
//! testable without a network.

mod executor;
mod lister;

pub use executor::{BackupExecutor, RunOptions};
pub use lister::{DashboardLister, parse_search_response};
