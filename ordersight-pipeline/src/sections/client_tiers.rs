//! Fixed-threshold client tiers.
//!
//! The same top-N-by-volume selection as the adaptive view, but labeled
//! against absolute thresholds (Premium / Loyal / Active / Standard) so
//! tier meanings stay comparable across datasets. Zero-volume clients are
//! filtered out of the ranking here; they cannot hold a tier.

use std::sync::Arc;

use serde::Serialize;

use crate::analysis_pipeline::AnalysisPipeline;
use crate::charts::{PieSlice, StackedBarSeries};
use crate::components::fixed_category_labeler::FixedCategoryLabeler;
use crate::components::order_facts_source::OrderFactsSource;
use crate::components::summary_log_side_effect::SummaryLogSideEffect;
use crate::components::top_n_selector::TopNSelector;
use crate::components::volume_floor_filter::VolumeFloorFilter;
use crate::components::volume_scorer::VolumeScorer;
use crate::dataset::{Column, Dataset, DatasetError, GroupBy};
use crate::filter::Filter;
use crate::labeler::Labeler;
use crate::scorer::Scorer;
use crate::sections::client_segmentation::category_counts;
use crate::selector::Selector;
use crate::side_effect::SideEffect;
use crate::source::Source;
use crate::types::{AnalysisQuery, EntityCandidate};

#[derive(Clone, Debug, Serialize)]
pub struct ClientTiers {
    pub clients: Vec<EntityCandidate>,
    pub tier_counts: Vec<PieSlice>,
    /// Mean delivery rate over selected clients with a defined rate.
    pub mean_rate_pct: Option<f64>,
    pub mean_volume: f64,
    pub volume_bars: StackedBarSeries,
}

struct ClientTiersPipeline {
    sources: Vec<Box<dyn Source<AnalysisQuery, EntityCandidate>>>,
    filters: Vec<Box<dyn Filter<AnalysisQuery, EntityCandidate>>>,
    scorers: Vec<Box<dyn Scorer<AnalysisQuery, EntityCandidate>>>,
    selector: TopNSelector,
    labelers: Vec<Box<dyn Labeler<AnalysisQuery, EntityCandidate>>>,
    side_effects: Arc<Vec<Box<dyn SideEffect<AnalysisQuery, EntityCandidate>>>>,
    result_size: usize,
}

impl ClientTiersPipeline {
    fn new(dataset: Dataset, top_n: usize) -> Self {
        Self {
            sources: vec![Box::new(OrderFactsSource::new(dataset))],
            filters: vec![Box::new(VolumeFloorFilter::default())],
            scorers: vec![Box::new(VolumeScorer)],
            selector: TopNSelector { n: top_n },
            labelers: vec![Box::new(FixedCategoryLabeler::default())],
            side_effects: Arc::new(vec![Box::new(SummaryLogSideEffect)]),
            result_size: top_n,
        }
    }
}

impl AnalysisPipeline<AnalysisQuery, EntityCandidate> for ClientTiersPipeline {
    fn sources(&self) -> &[Box<dyn Source<AnalysisQuery, EntityCandidate>>] {
        &self.sources
    }

    fn filters(&self) -> &[Box<dyn Filter<AnalysisQuery, EntityCandidate>>] {
        &self.filters
    }

    fn scorers(&self) -> &[Box<dyn Scorer<AnalysisQuery, EntityCandidate>>] {
        &self.scorers
    }

    fn selector(&self) -> &dyn Selector<AnalysisQuery, EntityCandidate> {
        &self.selector
    }

    fn labelers(&self) -> &[Box<dyn Labeler<AnalysisQuery, EntityCandidate>>] {
        &self.labelers
    }

    fn side_effects(&self) -> Arc<Vec<Box<dyn SideEffect<AnalysisQuery, EntityCandidate>>>> {
        Arc::clone(&self.side_effects)
    }

    fn result_size(&self) -> usize {
        self.result_size
    }
}

pub fn run(dataset: &Dataset, top_n: usize) -> Result<ClientTiers, DatasetError> {
    if !dataset.has_column(Column::Client) {
        return Err(DatasetError::MissingColumn {
            column: Column::Client,
        });
    }

    let pipeline = ClientTiersPipeline::new(dataset.clone(), top_n);
    let query = AnalysisQuery::new("client-tiers", GroupBy::Client).with_top_n(top_n);
    let run = pipeline.run(&query);
    let clients = run.selected_candidates;

    let rates: Vec<f64> = clients
        .iter()
        .filter_map(|c| c.delivery_rate_pct)
        .collect();
    let mean_rate_pct = if rates.is_empty() {
        None
    } else {
        Some(rates.iter().sum::<f64>() / rates.len() as f64)
    };
    let mean_volume = if clients.is_empty() {
        0.0
    } else {
        clients.iter().map(|c| c.total).sum::<u64>() as f64 / clients.len() as f64
    };

    Ok(ClientTiers {
        tier_counts: category_counts(&clients),
        mean_rate_pct,
        mean_volume,
        volume_bars: StackedBarSeries::from_candidates("C", &clients),
        clients,
    })
}
