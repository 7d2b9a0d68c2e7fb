//! Chart-ready data series.
//!
//! The hosting dashboard owns rendering and styling; these types carry only
//! the data a chart needs, serialized for the host's display surface.

use serde::Serialize;

use crate::types::EntityCandidate;

/// Stacked (or grouped) bars of delivered vs not-delivered per entity.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StackedBarSeries {
    pub labels: Vec<String>,
    pub delivered: Vec<u64>,
    pub not_delivered: Vec<u64>,
}

impl StackedBarSeries {
    pub fn from_candidates(prefix: &str, candidates: &[EntityCandidate]) -> Self {
        Self {
            labels: labels(prefix, candidates),
            delivered: candidates.iter().map(|c| c.delivered).collect(),
            not_delivered: candidates.iter().map(|c| c.not_delivered).collect(),
        }
    }
}

/// One bar per entity with its category label attached, so the host can
/// color bars by category.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryBarSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub categories: Vec<String>,
}

impl CategoryBarSeries {
    pub fn volumes(prefix: &str, candidates: &[EntityCandidate]) -> Self {
        Self::new(prefix, candidates, |c| c.total as f64)
    }

    pub fn rates(prefix: &str, candidates: &[EntityCandidate]) -> Self {
        Self::new(prefix, candidates, |c| c.delivery_rate_pct.unwrap_or(0.0))
    }

    fn new(
        prefix: &str,
        candidates: &[EntityCandidate],
        value: impl Fn(&EntityCandidate) -> f64,
    ) -> Self {
        Self {
            labels: labels(prefix, candidates),
            values: candidates.iter().map(&value).collect(),
            categories: candidates
                .iter()
                .map(|c| c.category.map(|cat| cat.to_string()).unwrap_or_default())
                .collect(),
        }
    }
}

/// One slice of a pie chart.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
}

/// A labelled point in a scatter plot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

/// Delivery rate over a sequence of entities (typically periods).
/// `None` marks a period with no orders, which the host renders as a gap.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RateLineSeries {
    pub labels: Vec<String>,
    pub rate_pct: Vec<Option<f64>>,
}

/// A single-value gauge with its scale and target.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Gauge {
    pub value: f64,
    pub max: f64,
    pub target: f64,
}

fn labels(prefix: &str, candidates: &[EntityCandidate]) -> Vec<String> {
    candidates
        .iter()
        .map(|c| format!("{prefix}{}", c.entity_key))
        .collect()
}
