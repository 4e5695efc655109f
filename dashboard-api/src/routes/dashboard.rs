//! Dashboard view endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use dashboard_core::{DashboardView, TrackedPair};
use serde::Serialize;
use tracing::debug;

use crate::AppState;

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Create dashboard routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/pairs/{base}/{quote}", get(get_pair))
}

/// Full view: one card per tracked pair plus loading and freshness state
async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardView> {
    let current = state.store.current();
    Json(state.view.build(&current))
}

/// Single tracked pair
async fn get_pair(
    State(state): State<AppState>,
    Path((base, quote)): Path<(String, String)>,
) -> impl IntoResponse {
    let pair = TrackedPair::new(base, quote);
    debug!("Fetching view for pair {}", pair);

    let current = state.store.current();
    let dashboard = state.view.build(&current);

    match dashboard.card(&pair) {
        Some(card) => Json(card.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Pair not tracked: {}", pair),
            }),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use dashboard_core::{PriceRecord, Snapshot};
    use dashboard_oracle::OracleClient;
    use dashboard_services::{RefreshController, ViewBuilder, ViewStateStore};
    use serde_json::Value;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    fn state() -> AppState {
        let store = Arc::new(ViewStateStore::new());
        let view = ViewBuilder::new(
            vec![TrackedPair::new("ETH", "USD"), TrackedPair::new("BTC", "USD")],
            "https://etherscan.io/tx/",
        );
        // never started, so the client is never called
        let client = OracleClient::new("http://127.0.0.1:9/price").unwrap();
        let controller =
            RefreshController::new(Arc::new(client), Arc::clone(&store), Duration::from_secs(10));
        AppState::new(store, view, controller.monitor())
    }

    async fn get_json(state: AppState, uri: &str) -> (StatusCode, Value) {
        let response = app(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_dashboard_before_first_fetch() {
        let (status, body) = get_json(state(), "/api/dashboard").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["loading"], true);
        assert_eq!(body["pairs"][0]["label"], "ETH/USD");
        assert_eq!(body["pairs"][0]["view"]["status"], "absent");
    }

    #[tokio::test]
    async fn test_dashboard_after_publish() {
        let state = state();
        state.store.publish(Snapshot::new(vec![PriceRecord {
            base: "ETH".to_string(),
            quote: "USD".to_string(),
            price_e8: 300_000_000_000,
            confidence_bp: 9800,
            timestamp: 1000,
            prediction5m: Some("3050.00".to_string()),
            tx_hash: Some("0xabc".to_string()),
        }]));

        let (status, body) = get_json(state.clone(), "/api/dashboard").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["loading"], false);
        assert_eq!(body["last_updated"], "00:16:40");

        let eth = &body["pairs"][0]["view"];
        assert_eq!(eth["status"], "present");
        assert_eq!(eth["display_price"], "3000.00");
        assert_eq!(eth["display_confidence"], "98.00");
        assert_eq!(eth["prediction"]["kind"], "direction");
        assert_eq!(eth["prediction"]["is_up"], true);
        assert_eq!(eth["tx_url"], "https://etherscan.io/tx/0xabc");

        let (status, body) = get_json(state, "/api/pairs/BTC/USD").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["view"]["status"], "absent");
    }

    #[tokio::test]
    async fn test_untracked_pair_is_not_found() {
        let (status, body) = get_json(state(), "/api/pairs/ETH/BNB").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Pair not tracked: ETH/BNB");
    }
}
