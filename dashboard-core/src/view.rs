//! View model handed to renderers
//!
//! Everything here is derived from a [`Snapshot`](crate::Snapshot) and the
//! tracked pair list; nothing is sent back to the oracle.

use crate::pair::TrackedPair;
use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// Directional 5-minute prediction for one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PredictionLabel {
    /// Oracle has no prediction yet (field absent or sentinel)
    InsufficientData,
    /// Prediction parsed; `is_up` only when strictly above the current price
    Direction { predicted_price: f64, is_up: bool },
    /// Prediction present but not a number; displayed like `InsufficientData`
    MalformedPrediction { raw: String },
}

impl PredictionLabel {
    /// `Some(is_up)` for a usable prediction
    pub fn is_up(&self) -> Option<bool> {
        match self {
            PredictionLabel::Direction { is_up, .. } => Some(*is_up),
            _ => None,
        }
    }

    pub fn arrow(&self) -> Option<&'static str> {
        self.is_up().map(|up| if up { "↑" } else { "↓" })
    }

    /// Renderer-facing text, e.g. "5m Prediction: 3050.00 ↑"
    pub fn display_text(&self) -> String {
        match self {
            PredictionLabel::Direction {
                predicted_price,
                is_up,
            } => format!(
                "5m Prediction: {:.2} {}",
                predicted_price,
                if *is_up { "↑" } else { "↓" }
            ),
            PredictionLabel::InsufficientData | PredictionLabel::MalformedPrediction { .. } => {
                "5m Prediction: Waiting for more data...".to_string()
            }
        }
    }
}

/// Display-ready values for a pair the oracle reported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairQuote {
    /// Current price, two decimals
    pub display_price: String,
    /// Confidence percentage, two decimals
    pub display_confidence: String,
    /// Record time as HH:MM:SS (UTC)
    pub display_time: String,
    /// Raw record timestamp (Unix seconds)
    pub timestamp: i64,
    pub prediction: PredictionLabel,
    pub prediction_text: String,
    /// Explorer link when the record carries a transaction hash
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_url: Option<String>,
}

/// Per-pair view state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PairView {
    /// No record for this pair in the current snapshot
    Absent,
    Present(PairQuote),
}

impl PairView {
    pub fn is_present(&self) -> bool {
        matches!(self, PairView::Present(_))
    }

    pub fn quote(&self) -> Option<&PairQuote> {
        match self {
            PairView::Present(quote) => Some(quote),
            PairView::Absent => None,
        }
    }
}

/// One card on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairCard {
    pub pair: TrackedPair,
    /// "BASE/QUOTE"
    pub label: String,
    pub view: PairView,
}

/// Complete renderer input: one card per tracked pair, in configured order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    /// True until the first successful fetch
    pub loading: bool,
    /// Newest record time of the current snapshot (HH:MM:SS, UTC)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    pub pairs: Vec<PairCard>,
}

impl DashboardView {
    pub fn card(&self, pair: &TrackedPair) -> Option<&PairCard> {
        self.pairs.iter().find(|c| &c.pair == pair)
    }
}

/// Format Unix seconds as a wall-clock time of day (UTC)
pub fn format_unix_time(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
