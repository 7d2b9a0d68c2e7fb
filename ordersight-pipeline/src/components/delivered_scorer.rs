use crate::scorer::Scorer;
use crate::types::{AnalysisQuery, EntityCandidate};

/// Scores candidates by delivered order count.
///
/// The temporal dashboard's client view ranks by deliveries alone rather
/// than total volume; this scorer swaps in for [`super::volume_scorer::VolumeScorer`]
/// there.
pub struct DeliveredScorer;

impl Scorer<AnalysisQuery, EntityCandidate> for DeliveredScorer {
    fn score(
        &self,
        _query: &AnalysisQuery,
        candidates: &[EntityCandidate],
    ) -> Result<Vec<EntityCandidate>, String> {
        Ok(candidates
            .iter()
            .map(|c| EntityCandidate {
                priority_score: Some(c.delivered as f64),
                ..EntityCandidate::default()
            })
            .collect())
    }

    fn update(&self, candidate: &mut EntityCandidate, scored: EntityCandidate) {
        candidate.priority_score = scored.priority_score;
    }
}
