//! Grafbak Core
//!
//! Core types shared by the Grafana backup tooling.
//!
//! This crate contains:
//! - Domain types: dashboards as seen by the search and dashboard endpoints
//! - Filename rules: how dashboard titles become file names
//! - Run bookkeeping: state and per-dashboard outcomes of a backup run

pub mod dashboard;
pub mod filename;
pub mod run;
