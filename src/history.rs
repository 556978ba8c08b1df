//! Session-lifetime store of uploaded datasets.
//!
//! Append-only: entries accumulate for the life of the process, nothing is
//! removed or merged, and `current` always points at the most recent append.
//! The store is owned state passed by `&mut` — never a global.

use serde::Serialize;

use crate::logging::{json_log, obj, v_num};
use crate::project::{project_phase_estimation, PhaseEstimationRecord};
use crate::schema::{Family, RawDataset};
use crate::stats::compute_stats;

#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: Vec<RawDataset>,
    current: Option<usize>,
}

/// First-vs-last comparison over the history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Trend {
    pub first: f64,
    pub last: f64,
    /// 0 when the first value is not strictly positive.
    pub percent_change: f64,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, dataset: RawDataset) {
        self.entries.push(dataset);
        self.current = Some(self.entries.len() - 1);
        json_log(
            "history",
            obj(&[("entries", v_num(self.entries.len() as f64))]),
        );
    }

    /// The most recently appended dataset, if any.
    pub fn current(&self) -> Option<&RawDataset> {
        self.current.and_then(|i| self.entries.get(i))
    }

    pub fn entries(&self) -> &[RawDataset] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mean of `selector` over the Phase Estimation projection of the first
    /// and last entries. Empty history yields the zero trend.
    pub fn trend<F>(&self, selector: F) -> Trend
    where
        F: Fn(&PhaseEstimationRecord) -> f64,
    {
        let first = self
            .entries
            .first()
            .map(|d| Self::pe_mean(d, &selector))
            .unwrap_or(0.0);
        let last = self
            .entries
            .last()
            .map(|d| Self::pe_mean(d, &selector))
            .unwrap_or(0.0);
        let percent_change = if first > 0.0 {
            (last - first) / first * 100.0
        } else {
            0.0
        };
        Trend {
            first,
            last,
            percent_change,
        }
    }

    fn pe_mean<F>(dataset: &RawDataset, selector: &F) -> f64
    where
        F: Fn(&PhaseEstimationRecord) -> f64,
    {
        let records = project_phase_estimation(dataset.family(Family::PhaseEstimation));
        compute_stats(&records, selector).mean
    }

    /// Trailing inclusive-window average of `selector` per entry: index `i`
    /// averages entries `[max(0, i - window + 1), i]`.
    pub fn moving_average<F>(&self, selector: F, window: usize) -> Vec<f64>
    where
        F: Fn(&RawDataset) -> f64,
    {
        let window = window.max(1);
        let values: Vec<f64> = self.entries.iter().map(|d| selector(d)).collect();
        (0..values.len())
            .map(|i| {
                let lo = (i + 1).saturating_sub(window);
                let slice = &values[lo..=i];
                slice.iter().sum::<f64>() / slice.len() as f64
            })
            .collect()
    }
}
