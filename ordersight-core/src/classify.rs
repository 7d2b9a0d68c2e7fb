//! Category assignment for aggregated entities.
//!
//! Two interchangeable policies implement the same interface: an adaptive
//! policy whose cut points come from percentiles of the current population,
//! and a fixed policy with absolute thresholds. Both evaluate an ordered
//! rule chain where the first matching predicate wins, so rule order encodes
//! priority. Every aggregate receives exactly one label; an aggregate with
//! zero total has no defined delivery rate and resolves to [`Category::Standard`]
//! without evaluating any rate predicate.

use std::fmt;

use serde::Serialize;

use crate::aggregate::OrderAggregate;
use crate::error::KernelResult;
use crate::percentile::ThresholdSet;

/// Closed label set covering both classification policies.
///
/// The adaptive policy assigns the first seven variants; the fixed policy
/// assigns `Premium`, `Loyal`, `Active`, and `Standard`. `Standard` doubles
/// as the catch-all default for both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    Excellence,
    HighPerformance,
    HighVolume,
    Balanced,
    AveragePerformance,
    AverageVolume,
    Premium,
    Loyal,
    Active,
    Standard,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Excellence => write!(f, "Excellence"),
            Category::HighPerformance => write!(f, "High Performance"),
            Category::HighVolume => write!(f, "High Volume"),
            Category::Balanced => write!(f, "Balanced"),
            Category::AveragePerformance => write!(f, "Average Performance"),
            Category::AverageVolume => write!(f, "Average Volume"),
            Category::Premium => write!(f, "Premium"),
            Category::Loyal => write!(f, "Loyal"),
            Category::Active => write!(f, "Active"),
            Category::Standard => write!(f, "Standard"),
        }
    }
}

/// Maps one aggregate to exactly one category label.
pub trait ClassificationPolicy: Send + Sync {
    fn classify(&self, aggregate: &OrderAggregate) -> Category;
}

/// Population-relative classification: cut points are percentiles of the
/// population under analysis, so labels follow the data rather than a
/// hard-coded notion of "good".
#[derive(Clone, Copy, Debug)]
pub struct AdaptivePolicy {
    thresholds: ThresholdSet,
}

impl AdaptivePolicy {
    pub fn new(thresholds: ThresholdSet) -> Self {
        Self { thresholds }
    }

    /// Derive the policy directly from the population it will classify.
    pub fn from_population(population: &[OrderAggregate]) -> KernelResult<Self> {
        Ok(Self::new(ThresholdSet::from_population(population)?))
    }

    pub fn thresholds(&self) -> &ThresholdSet {
        &self.thresholds
    }
}

impl ClassificationPolicy for AdaptivePolicy {
    fn classify(&self, aggregate: &OrderAggregate) -> Category {
        let rate = match aggregate.delivery_rate_pct() {
            Some(rate) => rate,
            None => return Category::Standard,
        };
        let volume = aggregate.total() as f64;
        let t = &self.thresholds;

        if rate >= t.rate_p75 && volume >= t.volume_p75 {
            Category::Excellence
        } else if rate >= t.rate_p75 {
            Category::HighPerformance
        } else if volume >= t.volume_p75 {
            Category::HighVolume
        } else if rate >= t.rate_p50 && volume >= t.volume_p50 {
            Category::Balanced
        } else if rate >= t.rate_p50 {
            Category::AveragePerformance
        } else if volume >= t.volume_p50 {
            Category::AverageVolume
        } else {
            Category::Standard
        }
    }
}

/// Absolute-threshold classification, independent of the population.
#[derive(Clone, Copy, Debug)]
pub struct FixedPolicy {
    pub premium_rate_pct: f64,
    pub premium_volume: u64,
    pub loyal_rate_pct: f64,
    pub active_volume: u64,
}

impl Default for FixedPolicy {
    fn default() -> Self {
        Self {
            premium_rate_pct: 90.0,
            premium_volume: 50,
            loyal_rate_pct: 80.0,
            active_volume: 30,
        }
    }
}

impl ClassificationPolicy for FixedPolicy {
    fn classify(&self, aggregate: &OrderAggregate) -> Category {
        let rate = match aggregate.delivery_rate_pct() {
            Some(rate) => rate,
            None => return Category::Standard,
        };
        let volume = aggregate.total();

        if rate >= self.premium_rate_pct && volume >= self.premium_volume {
            Category::Premium
        } else if rate >= self.loyal_rate_pct {
            Category::Loyal
        } else if volume >= self.active_volume {
            Category::Active
        } else {
            Category::Standard
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agg(key: i64, delivered: u64, not_delivered: u64) -> OrderAggregate {
        OrderAggregate {
            entity_key: key,
            delivered,
            not_delivered,
        }
    }

    fn thresholds() -> ThresholdSet {
        ThresholdSet {
            rate_p50: 70.0,
            rate_p75: 90.0,
            volume_p50: 20.0,
            volume_p75: 60.0,
        }
    }

    #[test]
    fn adaptive_rule_order_is_first_match_wins() {
        let policy = AdaptivePolicy::new(thresholds());

        // rate 95%, volume 100: both p75 cuts met.
        assert_eq!(policy.classify(&agg(1, 95, 5)), Category::Excellence);
        // rate 100%, volume 10: only the rate cut.
        assert_eq!(policy.classify(&agg(2, 10, 0)), Category::HighPerformance);
        // rate 50%, volume 80: only the volume cut.
        assert_eq!(policy.classify(&agg(3, 40, 40)), Category::HighVolume);
        // rate 75%, volume 40: both median cuts.
        assert_eq!(policy.classify(&agg(4, 30, 10)), Category::Balanced);
        // rate 80%, volume 10: median rate only.
        assert_eq!(policy.classify(&agg(5, 8, 2)), Category::AveragePerformance);
        // rate 25%, volume 40: median volume only.
        assert_eq!(policy.classify(&agg(6, 10, 30)), Category::AverageVolume);
        // rate 50%, volume 2: nothing matches.
        assert_eq!(policy.classify(&agg(7, 1, 1)), Category::Standard);
    }

    #[test]
    fn zero_total_resolves_to_standard_not_a_fault() {
        let adaptive = AdaptivePolicy::new(thresholds());
        let fixed = FixedPolicy::default();
        let empty = agg(1, 0, 0);
        assert_eq!(adaptive.classify(&empty), Category::Standard);
        assert_eq!(fixed.classify(&empty), Category::Standard);
    }

    #[test]
    fn fixed_policy_tiers() {
        let policy = FixedPolicy::default();
        // 95% rate over 60 orders.
        assert_eq!(policy.classify(&agg(1, 57, 3)), Category::Premium);
        // 95% rate but only 20 orders: volume gate fails, rate keeps Loyal.
        assert_eq!(policy.classify(&agg(2, 19, 1)), Category::Loyal);
        // 50% rate over 40 orders.
        assert_eq!(policy.classify(&agg(3, 20, 20)), Category::Active);
        // 50% rate over 10 orders.
        assert_eq!(policy.classify(&agg(4, 5, 5)), Category::Standard);
    }

    #[test]
    fn classification_is_total_over_arbitrary_aggregates() {
        let policy = AdaptivePolicy::new(thresholds());
        for delivered in 0..20u64 {
            for not_delivered in 0..20u64 {
                // Every aggregate gets exactly one label without panicking.
                let _ = policy.classify(&agg(1, delivered, not_delivered));
            }
        }
    }

    #[test]
    fn from_population_matches_manual_thresholds() {
        let population = vec![agg(1, 9, 1), agg(2, 5, 5), agg(3, 30, 10), agg(4, 60, 0)];
        let policy = AdaptivePolicy::from_population(&population).unwrap();
        let manual = ThresholdSet::from_population(&population).unwrap();
        assert_eq!(policy.thresholds(), &manual);
    }
}
