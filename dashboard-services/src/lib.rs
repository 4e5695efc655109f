//! Refresh loop and view derivation for the Oracle Price Dashboard
//!
//! This crate turns raw oracle payloads into the view model renderers read:
//! payload normalization, pair resolution, prediction evaluation, the
//! replace-only view state store and the periodic refresh controller.

pub mod config;
pub mod evaluator;
pub mod normalizer;
pub mod presenter;
pub mod refresh;
pub mod resolver;
pub mod store;

pub use config::{ConfigError, DashboardConfig};
pub use evaluator::evaluate_prediction;
pub use normalizer::{normalize_payload, normalize_record, RecordRejection};
pub use presenter::ViewBuilder;
pub use refresh::{
    RefreshController, RefreshHandle, RefreshMonitor, RefreshStats, MIN_POLL_INTERVAL,
};
pub use resolver::{resolve_pair, resolve_pairs};
pub use store::{ViewState, ViewStateStore};
