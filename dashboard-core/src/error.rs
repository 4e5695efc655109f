//! Error types for the dashboard

use thiserror::Error;

/// Dashboard-wide error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    /// The oracle could not be reached, answered non-2xx, or sent an undecodable body
    #[error("Transport error: {0}")]
    Transport(String),

    /// The oracle answered with something other than a JSON array
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DashboardError {
    pub fn transport(msg: impl Into<String>) -> Self {
        DashboardError::Transport(msg.into())
    }

    pub fn malformed_payload(msg: impl Into<String>) -> Self {
        DashboardError::MalformedPayload(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        DashboardError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        DashboardError::Internal(msg.into())
    }
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
