//! Tracked pair resolution

use dashboard_core::{PriceRecord, Snapshot, TrackedPair};

/// Latest record for `pair`: the last exact, case-sensitive match in
/// snapshot order
pub fn resolve_pair<'a>(snapshot: &'a Snapshot, pair: &TrackedPair) -> Option<&'a PriceRecord> {
    snapshot
        .records()
        .iter()
        .rev()
        .find(|r| pair.matches(&r.base, &r.quote))
}

/// Resolve every tracked pair, keeping the configured order
pub fn resolve_pairs<'a, 'p>(
    snapshot: &'a Snapshot,
    pairs: &'p [TrackedPair],
) -> Vec<(&'p TrackedPair, Option<&'a PriceRecord>)> {
    pairs
        .iter()
        .map(|pair| (pair, resolve_pair(snapshot, pair)))
        .collect()
}
