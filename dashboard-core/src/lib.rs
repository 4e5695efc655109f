//! Core types for the Oracle Price Dashboard
//!
//! This crate defines the shared data structures used across the dashboard:
//! tracked pairs, oracle price records, snapshots and the per-pair view model
//! handed to renderers.

pub mod error;
pub mod pair;
pub mod record;
pub mod snapshot;
pub mod view;

pub use error::{DashboardError, DashboardResult};
pub use pair::TrackedPair;
pub use record::{PriceRecord, INSUFFICIENT_DATA_SENTINEL};
pub use snapshot::Snapshot;
pub use view::{format_unix_time, DashboardView, PairCard, PairQuote, PairView, PredictionLabel};
