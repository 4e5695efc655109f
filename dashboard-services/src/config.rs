//! Dashboard configuration
//!
//! All values are fixed at startup. Defaults reproduce the reference
//! dashboard; environment variables override them.

use dashboard_core::TrackedPair;
use dashboard_oracle::DEFAULT_ORACLE_URL;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

pub use dashboard_oracle::DEFAULT_REQUEST_TIMEOUT_SECS;

/// Default polling period (10 seconds)
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

/// Default explorer prefix for transaction links
pub const DEFAULT_EXPLORER_TX_BASE_URL: &str = "https://etherscan.io/tx/";

/// Configuration for the dashboard refresh loop and view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Oracle price feed endpoint
    pub oracle_url: String,
    /// Prefix joined with a record's `txHash` to form its explorer link
    pub explorer_tx_base_url: String,
    /// How often to poll the oracle (in seconds)
    pub poll_interval_secs: u64,
    /// Per-request timeout for the oracle fetch (in seconds)
    pub request_timeout_secs: u64,
    /// Pairs to display, in order
    pub tracked_pairs: Vec<TrackedPair>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            oracle_url: DEFAULT_ORACLE_URL.to_string(),
            explorer_tx_base_url: DEFAULT_EXPLORER_TX_BASE_URL.to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            tracked_pairs: TrackedPair::defaults(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables
    ///
    /// Reads (all optional):
    /// - ORACLE_API_URL
    /// - EXPLORER_TX_BASE_URL
    /// - POLL_INTERVAL_SECS
    /// - REQUEST_TIMEOUT_SECS
    /// - TRACKED_PAIRS: comma-separated list, e.g. "ETH/USD,BTC/USD"
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("ORACLE_API_URL") {
            config.oracle_url = url;
        }
        if let Some(url) = lookup("EXPLORER_TX_BASE_URL") {
            config.explorer_tx_base_url = url;
        }
        if let Some(raw) = lookup("POLL_INTERVAL_SECS") {
            config.poll_interval_secs = parse_secs("POLL_INTERVAL_SECS", &raw)?;
        }
        if let Some(raw) = lookup("REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = parse_secs("REQUEST_TIMEOUT_SECS", &raw)?;
        }
        if let Some(raw) = lookup("TRACKED_PAIRS") {
            config.tracked_pairs = parse_pairs(&raw)?;
        }

        Ok(config)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_secs(field: &'static str, raw: &str) -> Result<u64, ConfigError> {
    let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        field,
        value: raw.to_string(),
    })?;

    if secs == 0 {
        return Err(ConfigError::ZeroDuration(field));
    }
    Ok(secs)
}

fn parse_pairs(raw: &str) -> Result<Vec<TrackedPair>, ConfigError> {
    let pairs = raw
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<TrackedPair>().map_err(ConfigError::InvalidPair))
        .collect::<Result<Vec<_>, _>>()?;

    if pairs.is_empty() {
        return Err(ConfigError::EmptyPairList);
    }
    Ok(pairs)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid number in {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("Invalid tracked pair: {0}")]
    InvalidPair(String),

    #[error("TRACKED_PAIRS cannot be empty")]
    EmptyPairList,
}
