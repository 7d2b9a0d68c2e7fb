//! Adaptive client segmentation.
//!
//! Top-N clients by order volume, categorized against percentile thresholds
//! derived from that same selection. The thresholds are echoed in the
//! payload so the dashboard can explain why a client landed where it did.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use ordersight_core::ThresholdSet;

use crate::analysis_pipeline::AnalysisPipeline;
use crate::charts::{CategoryBarSeries, PieSlice, ScatterPoint};
use crate::components::adaptive_category_labeler::AdaptiveCategoryLabeler;
use crate::components::order_facts_source::OrderFactsSource;
use crate::components::summary_log_side_effect::SummaryLogSideEffect;
use crate::components::top_n_selector::TopNSelector;
use crate::components::volume_scorer::VolumeScorer;
use crate::dataset::{Column, Dataset, DatasetError, GroupBy};
use crate::filter::Filter;
use crate::labeler::Labeler;
use crate::scorer::Scorer;
use crate::selector::Selector;
use crate::side_effect::SideEffect;
use crate::source::Source;
use crate::types::{AnalysisQuery, EntityCandidate};

#[derive(Clone, Debug, Serialize)]
pub struct ClientSegmentation {
    /// Top-N clients, volume-ranked, with adaptive categories assigned.
    pub clients: Vec<EntityCandidate>,
    /// Thresholds behind the categories; absent when the selection is empty.
    pub thresholds: Option<ThresholdSet>,
    pub category_counts: Vec<PieSlice>,
    pub volume_bars: CategoryBarSeries,
    pub rate_bars: CategoryBarSeries,
    pub volume_vs_rate: Vec<ScatterPoint>,
}

/// Pipeline wiring for the segmentation view: aggregate by client, rank by
/// volume, keep the top N, label adaptively.
pub struct ClientSegmentationPipeline {
    sources: Vec<Box<dyn Source<AnalysisQuery, EntityCandidate>>>,
    filters: Vec<Box<dyn Filter<AnalysisQuery, EntityCandidate>>>,
    scorers: Vec<Box<dyn Scorer<AnalysisQuery, EntityCandidate>>>,
    selector: TopNSelector,
    labelers: Vec<Box<dyn Labeler<AnalysisQuery, EntityCandidate>>>,
    side_effects: Arc<Vec<Box<dyn SideEffect<AnalysisQuery, EntityCandidate>>>>,
    result_size: usize,
}

impl ClientSegmentationPipeline {
    pub fn new(dataset: Dataset, top_n: usize) -> Self {
        Self {
            sources: vec![Box::new(OrderFactsSource::new(dataset))],
            filters: Vec::new(),
            scorers: vec![Box::new(VolumeScorer)],
            selector: TopNSelector { n: top_n },
            labelers: vec![Box::new(AdaptiveCategoryLabeler)],
            side_effects: Arc::new(vec![Box::new(SummaryLogSideEffect)]),
            result_size: top_n,
        }
    }
}

impl AnalysisPipeline<AnalysisQuery, EntityCandidate> for ClientSegmentationPipeline {
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

pub fn run(dataset: &Dataset, top_n: usize) -> Result<ClientSegmentation, DatasetError> {
    if !dataset.has_column(Column::Client) {
        return Err(DatasetError::MissingColumn {
            column: Column::Client,
        });
    }

    let pipeline = ClientSegmentationPipeline::new(dataset.clone(), top_n);
    let query = AnalysisQuery::new("client-segmentation", GroupBy::Client).with_top_n(top_n);
    let run = pipeline.run(&query);
    let clients = run.selected_candidates;

    let thresholds = if clients.is_empty() {
        None
    } else {
        let population: Vec<_> = clients.iter().map(|c| c.to_aggregate()).collect();
        ThresholdSet::from_population(&population).ok()
    };

    Ok(ClientSegmentation {
        category_counts: category_counts(&clients),
        volume_bars: CategoryBarSeries::volumes("C", &clients),
        rate_bars: CategoryBarSeries::rates("C", &clients),
        volume_vs_rate: clients
            .iter()
            .map(|c| ScatterPoint {
                label: format!("C{}", c.entity_key),
                x: c.total as f64,
                y: c.delivery_rate_pct.unwrap_or(0.0),
            })
            .collect(),
        thresholds,
        clients,
    })
}

/// Count selected clients per category, category name ascending.
pub fn category_counts(clients: &[EntityCandidate]) -> Vec<PieSlice> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for client in clients {
        if let Some(category) = client.category {
            *counts.entry(category.to_string()).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .map(|(label, count)| PieSlice { label, count })
        .collect()
}
