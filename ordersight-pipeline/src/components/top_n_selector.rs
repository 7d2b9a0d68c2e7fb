use std::cmp::Ordering;

use crate::selector::Selector;
use crate::types::{AnalysisQuery, EntityCandidate};

/// Selects the top N candidates by priority score.
///
/// Ties are broken by entity key ascending so the selection is stable and
/// deterministic across runs regardless of input row order.
pub struct TopNSelector {
    pub n: usize,
}

impl Default for TopNSelector {
    fn default() -> Self {
        Self { n: 10 }
    }
}

impl Selector<AnalysisQuery, EntityCandidate> for TopNSelector {
    fn score(&self, candidate: &EntityCandidate) -> f64 {
        candidate.priority_score.unwrap_or(f64::NEG_INFINITY)
    }

    fn tie_break(&self, a: &EntityCandidate, b: &EntityCandidate) -> Ordering {
        a.entity_key.cmp(&b.entity_key)
    }

    fn size(&self) -> Option<usize> {
        Some(self.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::GroupBy;
    use ordersight_core::OrderAggregate;

    fn candidate(key: i64, total: u64) -> EntityCandidate {
        let mut c = EntityCandidate::from_aggregate(OrderAggregate {
            entity_key: key,
            delivered: total,
            not_delivered: 0,
        });
        c.priority_score = Some(total as f64);
        c
    }

    #[test]
    fn selects_highest_scores_with_key_tiebreak() {
        let selector = TopNSelector { n: 3 };
        let query = AnalysisQuery::new("t", GroupBy::Client);
        let selected = selector.select(
            &query,
            vec![
                candidate(5, 10),
                candidate(2, 10),
                candidate(9, 40),
                candidate(1, 10),
            ],
        );
        let keys: Vec<i64> = selected.iter().map(|c| c.entity_key).collect();
        assert_eq!(keys, vec![9, 1, 2]);
    }

    #[test]
    fn unscored_candidates_sink_to_the_bottom() {
        let selector = TopNSelector { n: 2 };
        let query = AnalysisQuery::new("t", GroupBy::Client);
        let mut unscored = candidate(3, 99);
        unscored.priority_score = None;
        let selected = selector.select(&query, vec![unscored, candidate(1, 5), candidate(2, 8)]);
        let keys: Vec<i64> = selected.iter().map(|c| c.entity_key).collect();
        assert_eq!(keys, vec![2, 1]);
    }
}
