//! Shared utilities for commands
//!
//! This module contains:
//! - `load_snapshot` - Load records from a JSON file or CSV directory
//! - `load_config` - Resolve the analytics config
//! - `resolve_today` / `parse_date_arg` - Date arguments

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use tally_core::{dates, AnalyticsConfig, Snapshot};

pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    Snapshot::load(path).with_context(|| format!("Failed to load snapshot from {}", path.display()))
}

pub fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
    AnalyticsConfig::load(path).context("Failed to load analytics config")
}

/// Parse a YYYY-MM-DD argument, naming the flag on error
pub fn parse_date_arg(value: &str, flag: &str) -> Result<NaiveDate> {
    dates::parse_date(value)
        .with_context(|| format!("Invalid {} date '{}' (use YYYY-MM-DD)", flag, value))
}

/// The `--today` argument, or the current UTC date
pub fn resolve_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(value) => parse_date_arg(value, "--today"),
        None => Ok(Utc::now().date_naive()),
    }
}
