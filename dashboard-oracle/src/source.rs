//! Fetch seam between the refresh loop and the oracle

use async_trait::async_trait;
use dashboard_core::DashboardResult;
use serde_json::Value;
use std::sync::Arc;

/// Anything that can produce one raw oracle payload per call
///
/// Implementations perform exactly one attempt; retries happen on the
/// caller's next tick.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the decoded (but not yet validated) payload
    async fn fetch_payload(&self) -> DashboardResult<Value>;
}

#[async_trait]
impl<T: PriceSource + ?Sized> PriceSource for Arc<T> {
    async fn fetch_payload(&self) -> DashboardResult<Value> {
        (**self).fetch_payload().await
    }
}
