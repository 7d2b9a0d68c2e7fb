use crate::scorer::Scorer;
use crate::types::{AnalysisQuery, EntityCandidate};

/// Scores candidates by total order volume, the ranking the dashboard's
/// "top N" views use.
pub struct VolumeScorer;

impl Scorer<AnalysisQuery, EntityCandidate> for VolumeScorer {
    fn score(
        &self,
        _query: &AnalysisQuery,
        candidates: &[EntityCandidate],
    ) -> Result<Vec<EntityCandidate>, String> {
        Ok(candidates
            .iter()
            .map(|c| EntityCandidate {
                priority_score: Some(c.total as f64),
                ..EntityCandidate::default()
            })
            .collect())
    }

    fn update(&self, candidate: &mut EntityCandidate, scored: EntityCandidate) {
        candidate.priority_score = scored.priority_score;
    }
}
