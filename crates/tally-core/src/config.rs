//! Analytics configuration
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/tally/config/analytics.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default value.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::patterns::DEFAULT_PATTERN_WINDOW;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analytics.toml");

/// Tunables for report assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsConfig {
    /// Recent orders examined for buying patterns
    pub pattern_window: usize,
    /// Products listed in top-product rankings
    pub top_products: usize,
    /// Customers listed in the dashboard ranking
    pub top_customers: usize,
    /// Orders listed under recent orders
    pub recent_orders: usize,
    /// Days since last order for a customer to count as active
    pub active_days: i64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            pattern_window: DEFAULT_PATTERN_WINDOW,
            top_products: 5,
            top_customers: 10,
            recent_orders: 5,
            active_days: 90,
        }
    }
}

impl AnalyticsConfig {
    /// Load from `path` if given and present, else the data-dir override,
    /// else the embedded defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let override_path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path(),
        };

        match override_path {
            Some(p) if p.exists() => {
                debug!("Loading analytics config from {}", p.display());
                let content = fs::read_to_string(&p).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", p.display(), e))
                })?;
                parse_config(&content)
            }
            _ => parse_config(DEFAULT_CONFIG),
        }
    }

    /// Parse config from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config").join("analytics.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    patterns: Option<RawPatterns>,
    ranking: Option<RawRanking>,
    activity: Option<RawActivity>,
}

#[derive(Debug, Deserialize)]
struct RawPatterns {
    window: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawRanking {
    top_products: Option<usize>,
    top_customers: Option<usize>,
    recent_orders: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawActivity {
    active_days: Option<i64>,
}

fn parse_config(content: &str) -> Result<AnalyticsConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = AnalyticsConfig::default();

    if let Some(patterns) = raw.patterns {
        if let Some(window) = patterns.window {
            if window == 0 {
                return Err(Error::Config(
                    "patterns.window must be at least 1".to_string(),
                ));
            }
            config.pattern_window = window;
        }
    }

    if let Some(ranking) = raw.ranking {
        if let Some(n) = ranking.top_products {
            config.top_products = n;
        }
        if let Some(n) = ranking.top_customers {
            config.top_customers = n;
        }
        if let Some(n) = ranking.recent_orders {
            config.recent_orders = n;
        }
    }

    if let Some(activity) = raw.activity {
        if let Some(days) = activity.active_days {
            if days < 0 {
                return Err(Error::Config(
                    "activity.active_days must not be negative".to_string(),
                ));
            }
            config.active_days = days;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, AnalyticsConfig::default());
        assert_eq!(config.pattern_window, 3);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = AnalyticsConfig::from_toml("[ranking]\ntop_products = 10\n").unwrap();
        assert_eq!(config.top_products, 10);
        assert_eq!(config.pattern_window, 3);
        assert_eq!(config.active_days, 90);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(
            AnalyticsConfig::from_toml("").unwrap(),
            AnalyticsConfig::default()
        );
    }

    #[test]
    fn test_rejects_zero_window() {
        let err = AnalyticsConfig::from_toml("[patterns]\nwindow = 0\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_rejects_invalid_toml() {
        assert!(AnalyticsConfig::from_toml("[patterns\nwindow = 3").is_err());
        assert!(AnalyticsConfig::from_toml("[activity]\nactive_days = -1\n").is_err());
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[patterns]\nwindow = 4\n[activity]\nactive_days = 30").unwrap();

        let config = AnalyticsConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.pattern_window, 4);
        assert_eq!(config.active_days, 30);
    }

    #[test]
    fn test_load_missing_path_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AnalyticsConfig::load(Some(dir.path().join("nope.toml").as_path())).unwrap();
        assert_eq!(config, AnalyticsConfig::default());
    }
}
