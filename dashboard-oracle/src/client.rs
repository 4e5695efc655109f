//! Oracle price feed client
//!
//! Issues a single unauthenticated GET against the configured endpoint and
//! hands back the decoded JSON body.

use crate::source::PriceSource;
use async_trait::async_trait;
use dashboard_core::{DashboardError, DashboardResult};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Endpoint of the reference price oracle
pub const DEFAULT_ORACLE_URL: &str = "https://ai-price-oracle.onrender.com/price";

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Oracle API client
#[derive(Clone)]
pub struct OracleClient {
    client: Client,
    endpoint: Url,
}

impl OracleClient {
    /// Create a client for `endpoint` with the default timeout
    pub fn new(endpoint: &str) -> DashboardResult<Self> {
        Self::with_timeout(endpoint, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    /// Create a client for `endpoint` with an explicit request timeout
    pub fn with_timeout(endpoint: &str, timeout: Duration) -> DashboardResult<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| DashboardError::config(format!("Invalid oracle URL {}: {}", endpoint, e)))?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent("OracleDashboard/1.0")
            .build()
            .map_err(|e| DashboardError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, endpoint })
    }

    /// Get the endpoint URL
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Fetch the current price feed
    ///
    /// Network errors, non-2xx statuses and undecodable bodies all surface as
    /// [`DashboardError::Transport`]. The body's shape is not checked here.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn fetch_prices(&self) -> DashboardResult<Value> {
        debug!("Fetching oracle prices from: {}", self.endpoint);

        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| DashboardError::transport(format!("Failed to fetch prices: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DashboardError::transport(format!(
                "Oracle API error ({}): {}",
                status, body
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| DashboardError::transport(format!("Failed to decode prices: {}", e)))?;

        let kind = match &payload {
            Value::Array(items) => format!("{}-element", items.len()),
            _ => "non-array".to_string(),
        };
        debug!("Oracle returned {} payload", kind);

        Ok(payload)
    }
}

#[async_trait]
impl PriceSource for OracleClient {
    async fn fetch_payload(&self) -> DashboardResult<Value> {
        self.fetch_prices().await
    }
}
