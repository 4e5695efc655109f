//! Tracked trading pair definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// A (base, quote) symbol combination the dashboard always displays,
/// whether or not the oracle currently reports it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackedPair {
    pub base: String,
    pub quote: String,
}

impl TrackedPair {
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
        }
    }

    /// Exact, case-sensitive key comparison
    pub fn matches(&self, base: &str, quote: &str) -> bool {
        self.base == base && self.quote == quote
    }

    /// The pairs shown by the reference dashboard
    pub fn defaults() -> Vec<TrackedPair> {
        vec![
            TrackedPair::new("ETH", "USD"),
            TrackedPair::new("BTC", "USD"),
            TrackedPair::new("ETH", "BNB"),
        ]
    }
}

impl fmt::Display for TrackedPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl std::str::FromStr for TrackedPair {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, quote) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| format!("Expected BASE/QUOTE, got: {}", s))?;

        let (base, quote) = (base.trim(), quote.trim());
        if base.is_empty() || quote.is_empty() || quote.contains('/') {
            return Err(format!("Invalid pair: {}", s));
        }

        Ok(TrackedPair::new(base, quote))
    }
}
