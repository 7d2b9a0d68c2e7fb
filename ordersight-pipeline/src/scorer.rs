use crate::util;

/// Scorers compute per-candidate scores in a batch and hand back patch
/// candidates; only the fields a scorer owns are copied onto the originals
/// via `update`. Scorers run in order, so later scorers observe earlier
/// scores.
pub trait Scorer<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Decide if this scorer should run for the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Score the batch. The returned vector must be index-aligned with the
    /// input slice.
    fn score(&self, query: &Q, candidates: &[C]) -> Result<Vec<C>, String>;

    /// Update the candidate with the scored fields.
    /// Only the fields this scorer is responsible for should be copied.
    fn update(&self, candidate: &mut C, scored: C);

    /// Returns a stable name for logging/metrics.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
