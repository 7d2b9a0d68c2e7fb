//! Per-entity aggregation of order facts.
//!
//! Grouping is a pure fold over the input rows: the result depends only on
//! the multiset of rows, never on their order. One aggregate per distinct
//! entity key, with delivered and not-delivered counts summed.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::fact::FactRow;

/// Summed order counts for one entity key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct OrderAggregate {
    pub entity_key: i64,
    pub delivered: u64,
    pub not_delivered: u64,
}

impl OrderAggregate {
    pub fn total(&self) -> u64 {
        self.delivered + self.not_delivered
    }

    /// Delivery rate in percent (0–100).
    ///
    /// `None` when the aggregate has no orders at all; the ratio is
    /// undefined there and callers must fall back to a default category
    /// instead of dividing by zero.
    pub fn delivery_rate_pct(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            None
        } else {
            Some(self.delivered as f64 / total as f64 * 100.0)
        }
    }
}

/// Group fact rows by entity key, summing both counts.
///
/// The map is keyed by entity key in ascending order; callers that need a
/// ranking sort separately (see [`top_n`]). An empty input yields an empty
/// map, not an error.
pub fn aggregate(rows: &[FactRow]) -> BTreeMap<i64, OrderAggregate> {
    let mut groups: BTreeMap<i64, OrderAggregate> = BTreeMap::new();
    for row in rows {
        let entry = groups.entry(row.entity_key).or_insert(OrderAggregate {
            entity_key: row.entity_key,
            delivered: 0,
            not_delivered: 0,
        });
        entry.delivered += row.delivered;
        entry.not_delivered += row.not_delivered;
    }
    groups
}

/// The `n` aggregates with the greatest total order count.
///
/// Ties are broken by entity key ascending so the ranking is deterministic
/// regardless of input order. Asking for more entries than the population
/// holds returns the whole population, sorted.
pub fn top_n(aggregates: &BTreeMap<i64, OrderAggregate>, n: usize) -> Vec<OrderAggregate> {
    rank_by(aggregates, n, |a| a.total())
}

/// The `n` aggregates with the greatest delivered count, same tie rule.
pub fn top_n_by_delivered(
    aggregates: &BTreeMap<i64, OrderAggregate>,
    n: usize,
) -> Vec<OrderAggregate> {
    rank_by(aggregates, n, |a| a.delivered)
}

fn rank_by(
    aggregates: &BTreeMap<i64, OrderAggregate>,
    n: usize,
    key: impl Fn(&OrderAggregate) -> u64,
) -> Vec<OrderAggregate> {
    let mut ranked: Vec<OrderAggregate> = aggregates.values().copied().collect();
    ranked.sort_by(|a, b| key(b).cmp(&key(a)).then(a.entity_key.cmp(&b.entity_key)));
    ranked.truncate(n);
    ranked
}
