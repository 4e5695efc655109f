//! 5-minute prediction evaluation

use dashboard_core::{PredictionLabel, PriceRecord, INSUFFICIENT_DATA_SENTINEL};

/// Derive the prediction label for one record
///
/// Depends only on `priceE8` and `prediction5m`. A prediction equal to the
/// current price counts as down; only a strictly higher one is up.
pub fn evaluate_prediction(record: &PriceRecord) -> PredictionLabel {
    let raw = match record.prediction5m.as_deref().map(str::trim) {
        None => return PredictionLabel::InsufficientData,
        Some(raw) if raw.is_empty() || raw == INSUFFICIENT_DATA_SENTINEL => {
            return PredictionLabel::InsufficientData
        }
        Some(raw) => raw,
    };

    match parse_price(raw) {
        Some(predicted_price) => PredictionLabel::Direction {
            predicted_price,
            is_up: predicted_price > record.display_price(),
        },
        None => PredictionLabel::MalformedPrediction {
            raw: raw.to_string(),
        },
    }
}

/// Plain decimal parsing; rejects NaN and infinities
fn parse_price(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|p| p.is_finite())
}
