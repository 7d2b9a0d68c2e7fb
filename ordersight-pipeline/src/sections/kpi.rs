//! Global delivery KPIs.
//!
//! Totals and the overall delivery rate come from the whole fact table;
//! the trend compares the first and last period's rate when the period
//! column is present. No pipeline involved, this is a direct summary.

use std::fmt;

use serde::Serialize;

use ordersight_core::aggregate;

use crate::charts::Gauge;
use crate::dataset::{Dataset, GroupBy};

/// Delivery-rate target the dashboard displays next to the gauge.
const TARGET_RATE_PCT: f64 = 90.0;
/// Rate movement (percentage points) below which the trend reads Stable.
const TREND_BAND_PCT: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Improving => write!(f, "\u{2197} Improving"),
            Trend::Declining => write!(f, "\u{2198} Declining"),
            Trend::Stable => write!(f, "\u{2192} Stable"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PerformanceBand {
    Excellent,
    Good,
    NeedsImprovement,
}

impl fmt::Display for PerformanceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformanceBand::Excellent => write!(f, "Excellent"),
            PerformanceBand::Good => write!(f, "Good"),
            PerformanceBand::NeedsImprovement => write!(f, "Needs Improvement"),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct KpiSummary {
    pub total_orders: u64,
    pub delivered: u64,
    pub not_delivered: u64,
    /// Overall delivery rate in percent; 0 when there are no orders.
    pub delivery_rate_pct: f64,
    pub delivered_share_pct: f64,
    pub not_delivered_share_pct: f64,
    pub trend: Trend,
    /// Rate mapped to a 0–10 score.
    pub score_out_of_ten: f64,
    pub band: PerformanceBand,
    pub gauge: Gauge,
}

pub fn run(dataset: &Dataset) -> KpiSummary {
    let delivered: u64 = dataset.rows().iter().map(|r| r.delivered).sum();
    let not_delivered: u64 = dataset.rows().iter().map(|r| r.not_delivered).sum();
    let total = delivered + not_delivered;

    let rate = share_pct(delivered, total);
    let score = (rate / 10.0).min(10.0);
    let band = if score >= 9.0 {
        PerformanceBand::Excellent
    } else if score >= 7.0 {
        PerformanceBand::Good
    } else {
        PerformanceBand::NeedsImprovement
    };

    KpiSummary {
        total_orders: total,
        delivered,
        not_delivered,
        delivery_rate_pct: rate,
        delivered_share_pct: share_pct(delivered, total),
        not_delivered_share_pct: share_pct(not_delivered, total),
        trend: monthly_trend(dataset),
        score_out_of_ten: score,
        band,
        gauge: Gauge {
            value: rate,
            max: 100.0,
            target: TARGET_RATE_PCT,
        },
    }
}

fn share_pct(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// First-vs-last period rate comparison. Without a period column, with
/// fewer than two periods carrying orders, or with movement inside the
/// stable band, the trend is Stable.
fn monthly_trend(dataset: &Dataset) -> Trend {
    let facts = match dataset.facts(GroupBy::Period) {
        Ok(facts) => facts,
        Err(_) => return Trend::Stable,
    };

    let groups = aggregate(&facts);
    let rates: Vec<f64> = groups
        .values()
        .filter_map(|a| a.delivery_rate_pct())
        .collect();
    if rates.len() < 2 {
        return Trend::Stable;
    }

    let first = rates[0];
    let last = rates[rates.len() - 1];
    if last > first + TREND_BAND_PCT {
        Trend::Improving
    } else if last < first - TREND_BAND_PCT {
        Trend::Declining
    } else {
        Trend::Stable
    }
}
