//! Oracle price records

use serde::{Deserialize, Serialize};

/// Value the oracle reports in `prediction5m` while it lacks enough history
pub const INSUFFICIENT_DATA_SENTINEL: &str = "Not enough data yet";

/// Scale of the fixed-point `priceE8` field
const PRICE_SCALE: f64 = 1e8;

/// One price/prediction record for a pair, as published by the oracle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    /// Base symbol (e.g., "ETH")
    pub base: String,

    /// Quote symbol (e.g., "USD")
    pub quote: String,

    /// Price multiplied by 10^8
    pub price_e8: u64,

    /// Confidence in basis points (nominally 0 - 10000, not clamped)
    #[serde(rename = "confidenceBP")]
    pub confidence_bp: i64,

    /// Unix seconds
    pub timestamp: i64,

    /// Predicted price 5 minutes out, or the insufficient-data sentinel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction5m: Option<String>,

    /// Transaction that published this record on-chain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
}

impl PriceRecord {
    /// Current price as a float (`priceE8 / 1e8`)
    pub fn display_price(&self) -> f64 {
        self.price_e8 as f64 / PRICE_SCALE
    }

    /// Confidence as a percentage (`confidenceBP / 100`)
    pub fn confidence_percent(&self) -> f64 {
        self.confidence_bp as f64 / 100.0
    }

    pub fn formatted_price(&self) -> String {
        format!("{:.2}", self.display_price())
    }

    pub fn formatted_confidence(&self) -> String {
        format!("{:.2}", self.confidence_percent())
    }

    /// Explorer link for the publishing transaction
    ///
    /// The hash is appended verbatim; no format validation is performed.
    pub fn tx_url(&self, explorer_base_url: &str) -> Option<String> {
        self.tx_hash
            .as_deref()
            .map(|hash| format!("{}{}", explorer_base_url, hash))
    }
}
