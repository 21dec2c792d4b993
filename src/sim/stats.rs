//! Descriptive statistics over Monte Carlo samples.

use serde::Serialize;

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}

/// Sample standard deviation with an `n - 1` denominator.
///
/// Returns 0 when fewer than two samples are available.
pub fn sample_std_dev(values: &[f32]) -> f32 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    let sq_sum: f32 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (sq_sum / (n - 1) as f32).sqrt()
}

/// Percentile `q` (in `[0, 100]`) using linear interpolation between the
/// two closest ranks of the sorted samples.
///
/// Returns 0 for an empty slice.
pub fn percentile(values: &[f32], q: f32) -> f32 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f32::total_cmp);
    percentile_sorted(&sorted, q)
}

/// Same as [`percentile`] for samples that are already sorted ascending.
pub fn percentile_sorted(sorted: &[f32], q: f32) -> f32 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = (q.clamp(0.0, 100.0) / 100.0) * (n - 1) as f32;
            let lo = rank.floor() as usize;
            let hi = (lo + 1).min(n - 1);
            let frac = rank - lo as f32;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

/// Five-number summary plus mean, as drawn in a box plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxStats {
    pub min: f32,
    pub q1: f32,
    pub median: f32,
    pub q3: f32,
    pub max: f32,
    pub mean: f32,
}

impl BoxStats {
    /// Summarises `values`; all fields are 0 for an empty slice.
    pub fn from_samples(values: &[f32]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f32::total_cmp);
        Self {
            min: sorted.first().copied().unwrap_or(0.0),
            q1: percentile_sorted(&sorted, 25.0),
            median: percentile_sorted(&sorted, 50.0),
            q3: percentile_sorted(&sorted, 75.0),
            max: sorted.last().copied().unwrap_or(0.0),
            mean: mean(&sorted),
        }
    }

    /// Interquartile range.
    pub fn iqr(&self) -> f32 {
        self.q3 - self.q1
    }
}
