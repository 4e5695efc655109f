//! Price oracle integration for the Oracle Price Dashboard
//!
//! This crate provides the HTTP client that pulls the oracle's price feed
//! and the [`PriceSource`] seam the refresh loop fetches through.

pub mod client;
pub mod source;

pub use client::{OracleClient, DEFAULT_ORACLE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
pub use source::PriceSource;
