use crate::util;

/// Labelers run after selection and enrich the selected candidates with
/// category labels. They see the whole selected population at once because
/// adaptive thresholds are a function of that population, not of any single
/// candidate.
pub trait Labeler<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Decide if this labeler should run for the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Label the selected candidates, returning the enriched set.
    fn label(&self, query: &Q, candidates: Vec<C>) -> Result<Vec<C>, String>;

    /// Returns a stable name for logging/metrics.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
