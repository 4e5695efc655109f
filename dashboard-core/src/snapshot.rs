//! Snapshot of oracle records from a single fetch

use crate::record::PriceRecord;
use serde::{Deserialize, Serialize};

/// Ordered records returned by one fetch cycle, in the order received
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    records: Vec<PriceRecord>,
}

impl Snapshot {
    pub fn new(records: Vec<PriceRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &PriceRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Newest record timestamp (Unix seconds), `None` for an empty snapshot
    pub fn max_timestamp(&self) -> Option<i64> {
        self.records.iter().map(|r| r.timestamp).max()
    }
}

impl From<Vec<PriceRecord>> for Snapshot {
    fn from(records: Vec<PriceRecord>) -> Self {
        Self::new(records)
    }
}

impl IntoIterator for Snapshot {
    type Item = PriceRecord;
    type IntoIter = std::vec::IntoIter<PriceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(base: &str, quote: &str, price_e8: u64, timestamp: i64) -> PriceRecord {
        PriceRecord {
            base: base.to_string(),
            quote: quote.to_string(),
            price_e8,
            confidence_bp: 9000,
            timestamp,
            prediction5m: None,
            tx_hash: None,
        }
    }

    #[test]
    fn test_max_timestamp() {
        let snapshot = Snapshot::new(vec![
            record("ETH", "USD", 1, 10),
            record("BTC", "USD", 2, 42),
            record("ETH", "BNB", 3, 7),
        ]);
        assert_eq!(snapshot.max_timestamp(), Some(42));
        assert_eq!(Snapshot::default().max_timestamp(), None);
    }
}
