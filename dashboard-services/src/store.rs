//! View state store
//!
//! Holds the current snapshot and its derived "last updated" value behind a
//! single replace-only cell. Every publication swaps in a whole new
//! [`ViewState`], so readers see either the previous state or the next one,
//! never a mix.

use dashboard_core::{format_unix_time, Snapshot};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

/// One immutable generation of view state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewState {
    /// Latest published snapshot; `None` until the first successful fetch
    pub snapshot: Option<Snapshot>,
    /// Newest record timestamp in `snapshot` (Unix seconds)
    pub last_updated: Option<i64>,
    /// `last_updated` as HH:MM:SS (UTC)
    pub last_updated_display: Option<String>,
    /// Number of snapshots published so far
    pub generation: u64,
}

impl ViewState {
    /// True while no fetch has ever succeeded
    pub fn is_loading(&self) -> bool {
        self.snapshot.is_none()
    }

    fn next(&self, snapshot: Snapshot) -> Self {
        let last_updated = snapshot.max_timestamp();
        Self {
            snapshot: Some(snapshot),
            last_updated,
            last_updated_display: last_updated.map(format_unix_time),
            generation: self.generation + 1,
        }
    }
}

/// Replace-only holder of the current [`ViewState`]
#[derive(Debug)]
pub struct ViewStateStore {
    state: watch::Sender<Arc<ViewState>>,
}

impl ViewStateStore {
    /// Create a store in the "no data yet" state
    pub fn new() -> Self {
        let (state, _) = watch::channel(Arc::new(ViewState::default()));
        Self { state }
    }

    /// Current state
    pub fn current(&self) -> Arc<ViewState> {
        Arc::clone(&self.state.borrow())
    }

    /// Replace the whole state with one derived from `snapshot`
    pub fn publish(&self, snapshot: Snapshot) -> Arc<ViewState> {
        let mut published = None;
        self.state.send_modify(|state| {
            let next = Arc::new(state.next(snapshot));
            published = Some(Arc::clone(&next));
            *state = next;
        });
        published.unwrap_or_else(|| self.current())
    }

    /// Watch for publications
    pub fn subscribe(&self) -> watch::Receiver<Arc<ViewState>> {
        self.state.subscribe()
    }
}

impl Default for ViewStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::PriceRecord;

    fn record(base: &str, timestamp: i64) -> PriceRecord {
        PriceRecord {
            base: base.to_string(),
            quote: "USD".to_string(),
            price_e8: 100_000_000,
            confidence_bp: 9000,
            timestamp,
            prediction5m: None,
            tx_hash: None,
        }
    }

    #[test]
    fn test_initial_state_is_loading() {
        let store = ViewStateStore::new();
        let state = store.current();
        assert!(state.is_loading());
        assert_eq!(state.generation, 0);
        assert_eq!(state.last_updated, None);
    }

    #[test]
    fn test_last_updated_is_max_record_timestamp() {
        let store = ViewStateStore::new();
        let state = store.publish(Snapshot::new(vec![
            record("ETH", 1000),
            record("BTC", 1500),
            record("SOL", 1200),
        ]));

        assert_eq!(state.last_updated, Some(1500));
        assert_eq!(state.last_updated_display.as_deref(), Some("00:25:00"));
        assert_eq!(state.generation, 1);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_publish_replaces_without_merging() {
        let store = ViewStateStore::new();
        store.publish(Snapshot::new(vec![record("ETH", 1000), record("BTC", 1100)]));
        let state = store.publish(Snapshot::new(vec![record("SOL", 900)]));

        let snapshot = state.snapshot.as_ref().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.records()[0].base, "SOL");
        // not monotonic: follows the newest snapshot only
        assert_eq!(state.last_updated, Some(900));
        assert_eq!(state.generation, 2);
    }

    #[test]
    fn test_empty_snapshot_clears_last_updated() {
        let store = ViewStateStore::new();
        store.publish(Snapshot::new(vec![record("ETH", 1000)]));
        let state = store.publish(Snapshot::default());
        assert_eq!(state.last_updated, None);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_readers_keep_their_generation() {
        let store = ViewStateStore::new();
        store.publish(Snapshot::new(vec![record("ETH", 1000)]));
        let held = store.current();

        store.publish(Snapshot::new(vec![record("BTC", 2000)]));

        assert_eq!(held.generation, 1);
        assert_eq!(held.snapshot.as_ref().unwrap().records()[0].base, "ETH");
        assert_eq!(store.current().generation, 2);
    }

    #[tokio::test]
    async fn test_subscribers_see_publications() {
        let store = ViewStateStore::new();
        let mut rx = store.subscribe();

        store.publish(Snapshot::new(vec![record("ETH", 1000)]));

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().generation, 1);
    }
}
