use ordersight_core::{ClassificationPolicy, FixedPolicy};

use crate::labeler::Labeler;
use crate::types::{AnalysisQuery, EntityCandidate};

/// Assigns fixed-threshold tiers (Premium / Loyal / Active / Standard),
/// independent of the surrounding population.
pub struct FixedCategoryLabeler {
    policy: FixedPolicy,
}

impl FixedCategoryLabeler {
    pub fn new(policy: FixedPolicy) -> Self {
        Self { policy }
    }
}

impl Default for FixedCategoryLabeler {
    fn default() -> Self {
        Self::new(FixedPolicy::default())
    }
}

impl Labeler<AnalysisQuery, EntityCandidate> for FixedCategoryLabeler {
    fn label(
        &self,
        _query: &AnalysisQuery,
        candidates: Vec<EntityCandidate>,
    ) -> Result<Vec<EntityCandidate>, String> {
        Ok(candidates
            .into_iter()
            .map(|mut candidate| {
                candidate.category = Some(self.policy.classify(&candidate.to_aggregate()));
                candidate
            })
            .collect())
    }
}
