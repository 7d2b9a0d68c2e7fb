//! The generic staged pipeline: Source → Filter → Scorer → Selector →
//! Labeler → SideEffect.
//!
//! Stage failures are isolated: a failing source contributes no candidates,
//! a failing filter or scorer leaves the batch untouched, and a failing
//! side effect is logged and dropped. The run itself never aborts; the
//! surrounding host is responsible for deciding what an empty result means.

use std::sync::Arc;

use crate::filter::Filter;
use crate::labeler::Labeler;
use crate::scorer::Scorer;
use crate::selector::Selector;
use crate::side_effect::{SideEffect, SideEffectInput};
use crate::source::Source;

/// Outcome of one pipeline run, with intermediate candidate sets retained
/// for reporting (how many were retrieved, how many were filtered out).
#[derive(Clone, Debug)]
pub struct PipelineRun<C> {
    pub retrieved_candidates: Vec<C>,
    pub removed_candidates: Vec<C>,
    pub selected_candidates: Vec<C>,
}

/// An analysis pipeline wires concrete components into the generic stages.
pub trait AnalysisPipeline<Q, C>
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    fn sources(&self) -> &[Box<dyn Source<Q, C>>];
    fn filters(&self) -> &[Box<dyn Filter<Q, C>>];
    fn scorers(&self) -> &[Box<dyn Scorer<Q, C>>];
    fn selector(&self) -> &dyn Selector<Q, C>;
    fn labelers(&self) -> &[Box<dyn Labeler<Q, C>>];
    fn side_effects(&self) -> Arc<Vec<Box<dyn SideEffect<Q, C>>>>;

    /// Maximum number of candidates in the final result.
    fn result_size(&self) -> usize;

    /// Run the full pipeline for one query.
    fn run(&self, query: &Q) -> PipelineRun<C> {
        // Stage 1: candidate retrieval. A failing source is skipped.
        let mut retrieved: Vec<C> = Vec::new();
        for source in self.sources() {
            if !source.enable(query) {
                log::debug!("source {} disabled for this query", source.name());
                continue;
            }
            match source.candidates(query) {
                Ok(batch) => {
                    log::info!("source {} produced {} candidates", source.name(), batch.len());
                    retrieved.extend(batch);
                }
                Err(reason) => {
                    log::warn!("source {} failed: {reason}", source.name());
                }
            }
        }

        // Stage 2: filtering. On failure the batch passes through unchanged.
        let mut kept = retrieved.clone();
        let mut removed: Vec<C> = Vec::new();
        for filter in self.filters() {
            if !filter.enable(query) {
                continue;
            }
            match filter.filter(query, kept.clone()) {
                Ok(result) => {
                    log::info!(
                        "filter {} kept {} / removed {}",
                        filter.name(),
                        result.kept.len(),
                        result.removed.len()
                    );
                    kept = result.kept;
                    removed.extend(result.removed);
                }
                Err(reason) => {
                    log::warn!("filter {} failed: {reason}", filter.name());
                }
            }
        }

        // Stage 3: scoring. Patches are applied field-by-field via update.
        for scorer in self.scorers() {
            if !scorer.enable(query) {
                continue;
            }
            match scorer.score(query, &kept) {
                Ok(scored) if scored.len() == kept.len() => {
                    for (candidate, patch) in kept.iter_mut().zip(scored) {
                        scorer.update(candidate, patch);
                    }
                }
                Ok(scored) => {
                    log::warn!(
                        "scorer {} returned {} patches for {} candidates; skipped",
                        scorer.name(),
                        scored.len(),
                        kept.len()
                    );
                }
                Err(reason) => {
                    log::warn!("scorer {} failed: {reason}", scorer.name());
                }
            }
        }

        // Stage 4: selection.
        let mut selected = if self.selector().enable(query) {
            self.selector().select(query, kept)
        } else {
            kept
        };
        selected.truncate(self.result_size());

        // Stage 5: labeling over the selected population.
        for labeler in self.labelers() {
            if !labeler.enable(query) {
                continue;
            }
            match labeler.label(query, selected.clone()) {
                Ok(labeled) => selected = labeled,
                Err(reason) => {
                    log::warn!("labeler {} failed: {reason}", labeler.name());
                }
            }
        }

        // Stage 6: side effects. Failures are logged, never propagated.
        let input = Arc::new(SideEffectInput {
            query: Arc::new(query.clone()),
            selected_candidates: selected.clone(),
        });
        for side_effect in self.side_effects().iter() {
            if !side_effect.enable(Arc::clone(&input.query)) {
                continue;
            }
            if let Err(reason) = side_effect.run(Arc::clone(&input)) {
                log::warn!("side effect {} failed: {reason}", side_effect.name());
            }
        }

        PipelineRun {
            retrieved_candidates: retrieved,
            removed_candidates: removed,
            selected_candidates: selected,
        }
    }
}
