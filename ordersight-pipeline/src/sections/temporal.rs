//! Delivery performance over time.
//!
//! Per-period aggregates in period order with the delivery rate per period,
//! plus an optional top-clients-by-deliveries view when the client column
//! is bound. The client sub-view ranks by delivered count, not volume.

use std::sync::Arc;

use serde::Serialize;

use ordersight_core::aggregate;

use crate::analysis_pipeline::AnalysisPipeline;
use crate::charts::{RateLineSeries, StackedBarSeries};
use crate::components::delivered_scorer::DeliveredScorer;
use crate::components::order_facts_source::OrderFactsSource;
use crate::components::summary_log_side_effect::SummaryLogSideEffect;
use crate::components::top_n_selector::TopNSelector;
use crate::dataset::{Column, Dataset, DatasetError, GroupBy};
use crate::filter::Filter;
use crate::labeler::Labeler;
use crate::scorer::Scorer;
use crate::selector::Selector;
use crate::side_effect::SideEffect;
use crate::source::Source;
use crate::types::{AnalysisQuery, EntityCandidate};

#[derive(Clone, Debug, Serialize)]
pub struct PeriodRow {
    pub period: i64,
    pub delivered: u64,
    pub not_delivered: u64,
    pub total: u64,
    pub rate_pct: Option<f64>,
}

#[derive(Clone, Debug, Serialize)]
pub struct TemporalAnalysis {
    /// One row per period, period ascending.
    pub periods: Vec<PeriodRow>,
    pub volume_bars: StackedBarSeries,
    pub rate_line: RateLineSeries,
    /// Top clients by delivered count; `None` when the client column is absent.
    pub top_clients_by_delivered: Option<Vec<EntityCandidate>>,
}

struct TopDeliveredPipeline {
    sources: Vec<Box<dyn Source<AnalysisQuery, EntityCandidate>>>,
    filters: Vec<Box<dyn Filter<AnalysisQuery, EntityCandidate>>>,
    scorers: Vec<Box<dyn Scorer<AnalysisQuery, EntityCandidate>>>,
    selector: TopNSelector,
    labelers: Vec<Box<dyn Labeler<AnalysisQuery, EntityCandidate>>>,
    side_effects: Arc<Vec<Box<dyn SideEffect<AnalysisQuery, EntityCandidate>>>>,
    result_size: usize,
}

impl TopDeliveredPipeline {
    fn new(dataset: Dataset, top_n: usize) -> Self {
        Self {
            sources: vec![Box::new(OrderFactsSource::new(dataset))],
            filters: Vec::new(),
            scorers: vec![Box::new(DeliveredScorer)],
            selector: TopNSelector { n: top_n },
            labelers: Vec::new(),
            side_effects: Arc::new(vec![Box::new(SummaryLogSideEffect)]),
            result_size: top_n,
        }
    }
}

impl AnalysisPipeline<AnalysisQuery, EntityCandidate> for TopDeliveredPipeline {
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

pub fn run(dataset: &Dataset, top_n: usize) -> Result<TemporalAnalysis, DatasetError> {
    let facts = dataset.facts(GroupBy::Period)?;
    let groups = aggregate(&facts);

    // BTreeMap iteration is key-ascending, which is period order here.
    let periods: Vec<PeriodRow> = groups
        .values()
        .map(|a| PeriodRow {
            period: a.entity_key,
            delivered: a.delivered,
            not_delivered: a.not_delivered,
            total: a.total(),
            rate_pct: a.delivery_rate_pct(),
        })
        .collect();

    let period_candidates: Vec<EntityCandidate> = groups
        .into_values()
        .map(EntityCandidate::from_aggregate)
        .collect();

    let top_clients_by_delivered = if dataset.has_column(Column::Client) {
        let pipeline = TopDeliveredPipeline::new(dataset.clone(), top_n);
        let query = AnalysisQuery::new("temporal-top-clients", GroupBy::Client).with_top_n(top_n);
        Some(pipeline.run(&query).selected_candidates)
    } else {
        log::info!("client column absent; temporal client view skipped");
        None
    };

    Ok(TemporalAnalysis {
        volume_bars: StackedBarSeries::from_candidates("T", &period_candidates),
        rate_line: RateLineSeries {
            labels: periods.iter().map(|p| format!("T{}", p.period)).collect(),
            rate_pct: periods.iter().map(|p| p.rate_pct).collect(),
        },
        periods,
        top_clients_by_delivered,
    })
}
