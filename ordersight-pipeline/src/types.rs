use serde::Serialize;

use ordersight_core::{Category, OrderAggregate};

use crate::dataset::GroupBy;

/// Query describing one analysis run: which entity dimension to group by
/// and how many entities to keep after ranking.
#[derive(Clone, Debug)]
pub struct AnalysisQuery {
    pub request_id: String,
    pub grouping: GroupBy,
    pub top_n: usize,
}

impl AnalysisQuery {
    pub fn new(request_id: impl Into<String>, grouping: GroupBy) -> Self {
        Self {
            request_id: request_id.into(),
            grouping,
            top_n: 10,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}

/// An aggregated entity flowing through the pipeline.
///
/// Metric fields are fixed at construction; `priority_score` and `category`
/// are populated by scorers and labelers respectively.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EntityCandidate {
    pub entity_key: i64,
    pub delivered: u64,
    pub not_delivered: u64,
    pub total: u64,
    /// Delivery rate in percent; `None` when the entity has no orders.
    pub delivery_rate_pct: Option<f64>,

    // Populated by scorers.
    pub priority_score: Option<f64>,

    // Populated by labelers after selection.
    pub category: Option<Category>,
}

impl EntityCandidate {
    pub fn from_aggregate(aggregate: OrderAggregate) -> Self {
        Self {
            entity_key: aggregate.entity_key,
            delivered: aggregate.delivered,
            not_delivered: aggregate.not_delivered,
            total: aggregate.total(),
            delivery_rate_pct: aggregate.delivery_rate_pct(),
            priority_score: None,
            category: None,
        }
    }

    /// Project back to the kernel aggregate for threshold/classification use.
    pub fn to_aggregate(&self) -> OrderAggregate {
        OrderAggregate {
            entity_key: self.entity_key,
            delivered: self.delivered,
            not_delivered: self.not_delivered,
        }
    }
}

impl Default for EntityCandidate {
    fn default() -> Self {
        Self {
            entity_key: 0,
            delivered: 0,
            not_delivered: 0,
            total: 0,
            delivery_rate_pct: None,
            priority_score: None,
            category: None,
        }
    }
}
