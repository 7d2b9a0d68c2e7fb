use std::sync::Arc;

use crate::side_effect::{SideEffect, SideEffectInput};
use crate::types::{AnalysisQuery, EntityCandidate};

/// Logs a one-line selection summary after the pipeline completes.
///
/// The hosting tool captures the log stream, so this is the script-panel
/// equivalent of the console recap the analysts expect.
pub struct SummaryLogSideEffect;

impl SideEffect<AnalysisQuery, EntityCandidate> for SummaryLogSideEffect {
    fn run(
        &self,
        input: Arc<SideEffectInput<AnalysisQuery, EntityCandidate>>,
    ) -> Result<(), String> {
        let total_orders: u64 = input.selected_candidates.iter().map(|c| c.total).sum();
        log::info!(
            "request_id={} selected {} entities covering {} orders",
            input.query.request_id,
            input.selected_candidates.len(),
            total_orders
        );
        Ok(())
    }
}
