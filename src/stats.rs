//! Descriptive statistics over a numeric projection of a record set.
//!
//! Index conventions reproduce the reference dashboard exactly: the median
//! is the element at floor(n/2) of the sorted values (upper median for even
//! counts, not the averaged one), quartiles sit at floor(n*0.25) and
//! floor(n*0.75), and the standard deviation is the population form.

use serde::Serialize;

use crate::project::PhaseEstimationRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatSummary {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub count: u64,
}

/// Summary over `selector` applied to each record. Non-finite projections
/// are dropped first; an empty survivor set yields the all-zero summary.
pub fn compute_stats<T, F>(records: &[T], selector: F) -> StatSummary
where
    F: Fn(&T) -> f64,
{
    let values: Vec<f64> = records
        .iter()
        .map(|r| selector(r))
        .filter(|v| v.is_finite())
        .collect();
    if values.is_empty() {
        return StatSummary::default();
    }

    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;

    let mut sorted = values.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let median = sorted[n / 2];
    let q1 = sorted[(n as f64 * 0.25).floor() as usize];
    let q3 = sorted[(n as f64 * 0.75).floor() as usize];
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;

    StatSummary {
        mean,
        median,
        std: variance.sqrt(),
        min: sorted[0],
        max: sorted[n - 1],
        q1,
        q3,
        iqr: q3 - q1,
        count: n as u64,
    }
}

/// The three summaries the reference dashboard requests for the Phase
/// Estimation family.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct FamilyStats {
    pub time: StatSummary,
    pub error: StatSummary,
    pub speedup: StatSummary,
}

pub fn phase_estimation_summary(records: &[PhaseEstimationRecord]) -> FamilyStats {
    FamilyStats {
        time: compute_stats(records, |r| r.quantum_time),
        error: compute_stats(records, |r| r.quantum_error),
        speedup: compute_stats(records, |r| r.speedup_factor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_of(values: &[f64]) -> StatSummary {
        compute_stats(values, |v| *v)
    }

    #[test]
    fn empty_input_is_all_zero() {
        let s = stats_of(&[]);
        assert_eq!(s, StatSummary::default());
        assert_eq!(s.count, 0);
    }

    #[test]
    fn all_nonfinite_input_is_all_zero() {
        let s = stats_of(&[f64::NAN, f64::INFINITY, f64::NEG_INFINITY]);
        assert_eq!(s, StatSummary::default());
    }

    #[test]
    fn single_nonfinite_projection_is_all_zero() {
        let s = stats_of(&[f64::NAN]);
        assert_eq!(s, StatSummary::default());
    }

    #[test]
    fn population_std_and_quartile_indices() {
        let s = stats_of(&[9.0, 2.0, 4.0, 4.0, 5.0, 5.0, 7.0, 4.0]);
        assert!((s.mean - 5.0).abs() < 1e-9);
        assert!((s.std - 2.0).abs() < 1e-9);
        // sorted: [2,4,4,4,5,5,7,9]; floor indices 4, 2, 6
        assert_eq!(s.median, 5.0);
        assert_eq!(s.q1, 4.0);
        assert_eq!(s.q3, 7.0);
        assert_eq!(s.iqr, 3.0);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 9.0);
        assert_eq!(s.count, 8);
    }

    #[test]
    fn upper_median_for_even_counts() {
        let s = stats_of(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(s.median, 3.0);
    }

    #[test]
    fn order_invariant_quantiles() {
        let s = stats_of(&[40.0, 10.0, 30.0, 20.0]);
        assert!(s.min <= s.q1);
        assert!(s.q1 <= s.median);
        assert!(s.median <= s.q3);
        assert!(s.q3 <= s.max);
    }

    #[test]
    fn nonfinite_values_are_dropped_not_zeroed() {
        let s = stats_of(&[10.0, f64::NAN, 20.0]);
        assert_eq!(s.count, 2);
        assert_eq!(s.mean, 15.0);
        assert_eq!(s.min, 10.0);
        assert_eq!(s.max, 20.0);
    }

    #[test]
    fn single_value_summary() {
        let s = stats_of(&[3.5]);
        assert_eq!(s.mean, 3.5);
        assert_eq!(s.median, 3.5);
        assert_eq!(s.q1, 3.5);
        assert_eq!(s.q3, 3.5);
        assert_eq!(s.std, 0.0);
        assert_eq!(s.count, 1);
    }
}
