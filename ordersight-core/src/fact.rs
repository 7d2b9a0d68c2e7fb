use serde::{Deserialize, Serialize};

/// One observation from the order fact table: delivered and not-delivered
/// order counts for a single entity (time period, client, or employee).
///
/// Counts are unsigned by construction. Negative values in source data must
/// be rejected at ingestion; they are unrepresentable here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactRow {
    pub entity_key: i64,
    pub delivered: u64,
    pub not_delivered: u64,
}

impl FactRow {
    pub fn new(entity_key: i64, delivered: u64, not_delivered: u64) -> Self {
        Self {
            entity_key,
            delivered,
            not_delivered,
        }
    }
}
