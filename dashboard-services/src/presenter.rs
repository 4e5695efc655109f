//! Per-pair view model derivation
//!
//! Combines pair resolution and prediction evaluation into the
//! [`DashboardView`] handed to renderers.

use dashboard_core::{
    format_unix_time, DashboardView, PairCard, PairQuote, PairView, PriceRecord, Snapshot,
    TrackedPair,
};

use crate::evaluator::evaluate_prediction;
use crate::resolver::resolve_pairs;
use crate::store::ViewState;

/// Builds view models for a fixed set of tracked pairs
#[derive(Debug, Clone)]
pub struct ViewBuilder {
    pairs: Vec<TrackedPair>,
    explorer_tx_base_url: String,
}

impl ViewBuilder {
    pub fn new(pairs: Vec<TrackedPair>, explorer_tx_base_url: impl Into<String>) -> Self {
        Self {
            pairs,
            explorer_tx_base_url: explorer_tx_base_url.into(),
        }
    }

    /// Tracked pairs, in display order
    pub fn pairs(&self) -> &[TrackedPair] {
        &self.pairs
    }

    /// Display values for one record
    pub fn quote(&self, record: &PriceRecord) -> PairQuote {
        let prediction = evaluate_prediction(record);
        PairQuote {
            display_price: record.formatted_price(),
            display_confidence: record.formatted_confidence(),
            display_time: format_unix_time(record.timestamp),
            timestamp: record.timestamp,
            prediction_text: prediction.display_text(),
            prediction,
            tx_url: record.tx_url(&self.explorer_tx_base_url),
        }
    }

    /// One card per tracked pair for `snapshot`
    pub fn cards(&self, snapshot: &Snapshot) -> Vec<PairCard> {
        resolve_pairs(snapshot, &self.pairs)
            .into_iter()
            .map(|(pair, record)| PairCard {
                pair: pair.clone(),
                label: pair.to_string(),
                view: match record {
                    Some(record) => PairView::Present(self.quote(record)),
                    None => PairView::Absent,
                },
            })
            .collect()
    }

    /// Full dashboard view for the given store state
    ///
    /// Before the first successful fetch every pair is `Absent` and
    /// `loading` is set.
    pub fn build(&self, state: &ViewState) -> DashboardView {
        let pairs = match &state.snapshot {
            Some(snapshot) => self.cards(snapshot),
            None => self.cards(&Snapshot::default()),
        };

        DashboardView {
            loading: state.is_loading(),
            last_updated: state.last_updated_display.clone(),
            pairs,
        }
    }
}
