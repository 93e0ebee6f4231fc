//! Descriptive statistics over sample slices.
//!
//! All functions treat the slice as a complete population (dividing by `n`,
//! not `n - 1`) and return `None` for an empty slice rather than `NaN`.

/// Arithmetic mean.
///
/// # Examples
///
/// ```
/// use stratsim_core::math::stats::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Percentile with linear interpolation between closest ranks.
///
/// `q` is expressed in percent, `0.0..=100.0`, and is clamped into that
/// range. Matches the default ("linear") method of common numerical
/// libraries: the rank is `q / 100 * (n - 1)`.
///
/// # Examples
///
/// ```
/// use stratsim_core::math::stats::percentile;
///
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(percentile(&data, 50.0), Some(3.0));
/// assert_eq!(percentile(&data, 25.0), Some(2.0));
/// assert!((percentile(&data, 10.0).unwrap() - 1.4).abs() < 1e-12);
/// ```
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Some(percentile_sorted(&sorted, q))
}

/// Percentile of an already ascending-sorted, non-empty slice.
///
/// Avoids re-sorting when several percentiles of the same sample are needed.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    let q = q.clamp(0.0, 100.0);
    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

/// Sample skewness (third standardised moment).
///
/// Returns `Some(0.0)` for a constant sample.
pub fn skewness(values: &[f64]) -> Option<f64> {
    standardised_moment(values, 3)
}

/// Excess kurtosis (fourth standardised moment minus 3).
///
/// Returns `Some(-3.0)` for a constant sample, mirroring the moment being 0.
pub fn excess_kurtosis(values: &[f64]) -> Option<f64> {
    standardised_moment(values, 4).map(|k| k - 3.0)
}

fn standardised_moment(values: &[f64], order: i32) -> Option<f64> {
    let m = mean(values)?;
    let sd = std_dev(values)?;
    if sd == 0.0 {
        return Some(0.0);
    }
    let n = values.len() as f64;
    Some(values.iter().map(|v| ((v - m) / sd).powi(order)).sum::<f64>() / n)
}

/// Maximum drawdown of a cumulative series built from `increments`.
///
/// The cumulative total is tracked alongside its running peak; drawdown at
/// each point is `(cumulative - peak) / peak`, measured only while the peak
/// is positive. The result is the most negative drawdown, or `0.0` when the
/// series never has a positive peak or never declines.
///
/// # Examples
///
/// ```
/// use stratsim_core::math::stats::max_drawdown;
///
/// // cumulative: 100, 150, 75, 120 -> trough 75 against peak 150
/// assert_eq!(max_drawdown(&[100.0, 50.0, -75.0, 45.0]), -0.5);
/// ```
pub fn max_drawdown(increments: &[f64]) -> f64 {
    let mut cumulative = 0.0;
    let mut peak = f64::NEG_INFINITY;
    let mut worst: f64 = 0.0;
    for value in increments {
        cumulative += value;
        peak = peak.max(cumulative);
        if peak > 0.0 {
            worst = worst.min((cumulative - peak) / peak);
        }
    }
    worst
}
