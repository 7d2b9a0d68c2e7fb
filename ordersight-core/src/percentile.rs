//! Percentile-based classification thresholds.
//!
//! Percentiles use linear interpolation between order statistics (the same
//! rule pandas applies by default), so threshold values stay stable on the
//! small populations a top-N selection produces. Thresholds are recomputed
//! fresh from the current population on every run; nothing carries over.

use serde::Serialize;

use crate::aggregate::OrderAggregate;
use crate::error::{KernelError, KernelResult};

/// Cut points derived from an aggregate population: p50/p75 of the delivery
/// rate (percent) and of the total order volume.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ThresholdSet {
    pub rate_p50: f64,
    pub rate_p75: f64,
    pub volume_p50: f64,
    pub volume_p75: f64,
}

impl ThresholdSet {
    /// Compute thresholds from a population of aggregates.
    ///
    /// Aggregates with zero total contribute a volume observation of 0 but
    /// no rate observation (their rate is undefined). If no aggregate has a
    /// defined rate, both rate thresholds are 0.
    pub fn from_population(population: &[OrderAggregate]) -> KernelResult<Self> {
        if population.is_empty() {
            return Err(KernelError::EmptyPopulation);
        }

        let mut rates: Vec<f64> = population
            .iter()
            .filter_map(|a| a.delivery_rate_pct())
            .collect();
        rates.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mut volumes: Vec<f64> = population.iter().map(|a| a.total() as f64).collect();
        volumes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let (rate_p50, rate_p75) = if rates.is_empty() {
            (0.0, 0.0)
        } else {
            (percentile(&rates, 0.50)?, percentile(&rates, 0.75)?)
        };

        Ok(Self {
            rate_p50,
            rate_p75,
            volume_p50: percentile(&volumes, 0.50)?,
            volume_p75: percentile(&volumes, 0.75)?,
        })
    }
}

/// Quantile of an ascending-sorted sample, `q` in `[0, 1]`.
///
/// Linear interpolation between order statistics: the fractional rank is
/// `q * (n - 1)` and the result interpolates between the two neighbouring
/// values. A single-element sample returns that element for every `q`.
pub fn percentile(sorted: &[f64], q: f64) -> KernelResult<f64> {
    if sorted.is_empty() {
        return Err(KernelError::EmptyPopulation);
    }
    let q = q.clamp(0.0, 1.0);
    let rank = q * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Ok(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
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

    #[test]
    fn percentile_interpolates_linearly() {
        let sample = [10.0, 20.0, 30.0, 40.0];
        // rank = 0.5 * 3 = 1.5 → midway between 20 and 30
        assert_eq!(percentile(&sample, 0.50).unwrap(), 25.0);
        // rank = 0.75 * 3 = 2.25 → 30 + 0.25 * 10
        assert_eq!(percentile(&sample, 0.75).unwrap(), 32.5);
        assert_eq!(percentile(&sample, 0.0).unwrap(), 10.0);
        assert_eq!(percentile(&sample, 1.0).unwrap(), 40.0);
    }

    #[test]
    fn percentile_of_singleton_is_that_value() {
        assert_eq!(percentile(&[42.0], 0.75).unwrap(), 42.0);
    }

    #[test]
    fn percentile_of_empty_sample_fails() {
        assert_eq!(percentile(&[], 0.5), Err(KernelError::EmptyPopulation));
    }

    #[test]
    fn p75_is_at_least_p50() {
        let population = vec![agg(1, 90, 10), agg(2, 50, 50), agg(3, 10, 5), agg(4, 70, 2)];
        let thresholds = ThresholdSet::from_population(&population).unwrap();
        assert!(thresholds.rate_p75 >= thresholds.rate_p50);
        assert!(thresholds.volume_p75 >= thresholds.volume_p50);
    }

    #[test]
    fn empty_population_is_rejected() {
        assert_eq!(
            ThresholdSet::from_population(&[]),
            Err(KernelError::EmptyPopulation)
        );
    }

    #[test]
    fn zero_total_aggregates_contribute_volume_but_not_rate() {
        let population = vec![agg(1, 0, 0), agg(2, 8, 2)];
        let thresholds = ThresholdSet::from_population(&population).unwrap();
        // Only one defined rate: both rate thresholds equal it.
        assert_eq!(thresholds.rate_p50, 80.0);
        assert_eq!(thresholds.rate_p75, 80.0);
        // Volumes [0, 10]: p50 interpolates to 5.
        assert_eq!(thresholds.volume_p50, 5.0);
    }

    #[test]
    fn all_zero_population_has_zero_rate_thresholds() {
        let population = vec![agg(1, 0, 0), agg(2, 0, 0)];
        let thresholds = ThresholdSet::from_population(&population).unwrap();
        assert_eq!(thresholds.rate_p50, 0.0);
        assert_eq!(thresholds.rate_p75, 0.0);
        assert_eq!(thresholds.volume_p75, 0.0);
    }
}
