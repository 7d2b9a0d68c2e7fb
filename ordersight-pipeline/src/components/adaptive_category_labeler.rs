use ordersight_core::{AdaptivePolicy, ClassificationPolicy};

use crate::labeler::Labeler;
use crate::types::{AnalysisQuery, EntityCandidate};

/// Assigns adaptive categories from percentile thresholds of the selected
/// population.
///
/// Thresholds are recomputed from scratch on every call; nothing carries
/// over between runs. An empty selection is labeled trivially (there is
/// nothing to classify and no population to derive thresholds from).
pub struct AdaptiveCategoryLabeler;

impl Labeler<AnalysisQuery, EntityCandidate> for AdaptiveCategoryLabeler {
    fn label(
        &self,
        _query: &AnalysisQuery,
        candidates: Vec<EntityCandidate>,
    ) -> Result<Vec<EntityCandidate>, String> {
        if candidates.is_empty() {
            return Ok(candidates);
        }

        let population: Vec<_> = candidates.iter().map(|c| c.to_aggregate()).collect();
        let policy = AdaptivePolicy::from_population(&population).map_err(|e| e.to_string())?;

        Ok(candidates
            .into_iter()
            .map(|mut candidate| {
                candidate.category = Some(policy.classify(&candidate.to_aggregate()));
                candidate
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::GroupBy;
    use ordersight_core::{Category, OrderAggregate};

    fn candidate(key: i64, delivered: u64, not_delivered: u64) -> EntityCandidate {
        EntityCandidate::from_aggregate(OrderAggregate {
            entity_key: key,
            delivered,
            not_delivered,
        })
    }

    #[test]
    fn labels_every_candidate() {
        let labeler = AdaptiveCategoryLabeler;
        let query = AnalysisQuery::new("t", GroupBy::Client);
        let labeled = labeler
            .label(
                &query,
                vec![
                    candidate(1, 95, 5),
                    candidate(2, 50, 50),
                    candidate(3, 10, 0),
                    candidate(4, 0, 0),
                ],
            )
            .unwrap();
        assert!(labeled.iter().all(|c| c.category.is_some()));

        // The zero-total entity resolves to the default, never a fault.
        let idle = labeled.iter().find(|c| c.entity_key == 4).unwrap();
        assert_eq!(idle.category, Some(Category::Standard));
    }

    #[test]
    fn empty_selection_is_a_no_op() {
        let labeler = AdaptiveCategoryLabeler;
        let query = AnalysisQuery::new("t", GroupBy::Client);
        assert!(labeler.label(&query, Vec::new()).unwrap().is_empty());
    }
}
