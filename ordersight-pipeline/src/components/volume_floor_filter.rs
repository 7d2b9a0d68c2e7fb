use crate::filter::{Filter, FilterResult};
use crate::types::{AnalysisQuery, EntityCandidate};

/// Filters out entities below a minimum total order count.
///
/// The default floor of 1 keeps zero-total entities out of top-N rankings;
/// their delivery rate is undefined and they carry no signal worth a slot.
pub struct VolumeFloorFilter {
    pub min_total: u64,
}

impl VolumeFloorFilter {
    pub fn new(min_total: u64) -> Self {
        Self { min_total }
    }
}

impl Default for VolumeFloorFilter {
    fn default() -> Self {
        Self { min_total: 1 }
    }
}

impl Filter<AnalysisQuery, EntityCandidate> for VolumeFloorFilter {
    fn filter(
        &self,
        _query: &AnalysisQuery,
        candidates: Vec<EntityCandidate>,
    ) -> Result<FilterResult<EntityCandidate>, String> {
        let (kept, removed): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|c| c.total >= self.min_total);

        Ok(FilterResult { kept, removed })
    }
}
