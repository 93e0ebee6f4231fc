//! Summary statistics of a simulated outcome distribution.

use stratsim_core::math::stats::{self, percentile_sorted};
use stratsim_core::AnalysisError;

/// Selected percentiles of the outcome distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Percentiles {
    /// 5th percentile.
    pub p5: f64,
    /// 10th percentile.
    pub p10: f64,
    /// 25th percentile.
    pub p25: f64,
    /// Median.
    pub p50: f64,
    /// 75th percentile.
    pub p75: f64,
    /// 90th percentile.
    pub p90: f64,
    /// 95th percentile.
    pub p95: f64,
}

/// Central empirical intervals, as `(lower, upper)` pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfidenceIntervals {
    /// 5th to 95th percentile.
    pub ci_90: (f64, f64),
    /// 2.5th to 97.5th percentile.
    pub ci_95: (f64, f64),
    /// 0.5th to 99.5th percentile.
    pub ci_99: (f64, f64),
}

/// Result of a Monte Carlo run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonteCarloResult {
    /// Name of the summarised output.
    pub variable_name: String,
    /// Number of samples.
    pub iterations: usize,
    /// Sample mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Selected percentiles.
    pub percentiles: Percentiles,
    /// 95% value at risk: the 5th percentile outcome.
    pub var_95: f64,
    /// 95% conditional value at risk: mean of outcomes at or below `var_95`.
    pub cvar_95: f64,
    /// Share of outcomes strictly below zero.
    pub probability_negative: f64,
    /// Central confidence intervals.
    pub confidence_intervals: ConfidenceIntervals,
}

impl MonteCarloResult {
    /// Summarises a sample.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `samples` is empty
    /// - `Arithmetic` if any sample is NaN or infinite
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stratsim_risk::monte_carlo::MonteCarloResult;
    ///
    /// let samples: Vec<f64> = (0..=100).map(f64::from).collect();
    /// let result = MonteCarloResult::from_samples("score", &samples).unwrap();
    ///
    /// assert_eq!(result.mean, 50.0);
    /// assert_eq!(result.percentiles.p50, 50.0);
    /// assert_eq!(result.var_95, 5.0);
    /// assert_eq!(result.cvar_95, 2.5);
    /// assert_eq!(result.probability_negative, 0.0);
    /// ```
    pub fn from_samples(
        variable_name: impl Into<String>,
        samples: &[f64],
    ) -> Result<Self, AnalysisError> {
        let (Some(mean), Some(std_dev)) = (stats::mean(samples), stats::std_dev(samples)) else {
            return Err(AnalysisError::invalid("Samples cannot be empty"));
        };
        if let Some(bad) = samples.iter().find(|s| !s.is_finite()) {
            return Err(AnalysisError::Arithmetic(format!(
                "Simulation produced a non-finite outcome: {}",
                bad
            )));
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let q = |p: f64| percentile_sorted(&sorted, p);

        let n = samples.len() as f64;

        let var_95 = q(5.0);
        let tail: Vec<f64> = sorted.iter().copied().take_while(|s| *s <= var_95).collect();
        // The minimum is always <= the 5th percentile, so the tail is non-empty.
        let cvar_95 = tail.iter().sum::<f64>() / tail.len() as f64;
        let negatives = sorted.iter().take_while(|s| **s < 0.0).count();

        Ok(Self {
            variable_name: variable_name.into(),
            iterations: samples.len(),
            mean,
            std_dev,
            percentiles: Percentiles {
                p5: var_95,
                p10: q(10.0),
                p25: q(25.0),
                p50: q(50.0),
                p75: q(75.0),
                p90: q(90.0),
                p95: q(95.0),
            },
            var_95,
            cvar_95,
            probability_negative: negatives as f64 / n,
            confidence_intervals: ConfidenceIntervals {
                ci_90: (var_95, q(95.0)),
                ci_95: (q(2.5), q(97.5)),
                ci_99: (q(0.5), q(99.5)),
            },
        })
    }

    /// Coefficient of variation, `std_dev / |mean|`; `None` for a zero mean.
    pub fn coefficient_of_variation(&self) -> Option<f64> {
        if self.mean == 0.0 {
            None
        } else {
            Some(self.std_dev / self.mean.abs())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_percentiles_ordered() {
        let samples: Vec<f64> = (0..1000).map(|i| ((i * 7919) % 1000) as f64 - 300.0).collect();
        let r = MonteCarloResult::from_samples("x", &samples).unwrap();
        let p = r.percentiles;
        assert!(p.p5 <= p.p10 && p.p10 <= p.p25 && p.p25 <= p.p50);
        assert!(p.p50 <= p.p75 && p.p75 <= p.p90 && p.p90 <= p.p95);
        assert!(r.cvar_95 <= r.var_95);
        assert!(r.confidence_intervals.ci_99.0 <= r.confidence_intervals.ci_95.0);
        assert!(r.confidence_intervals.ci_95.1 <= r.confidence_intervals.ci_99.1);
        assert_relative_eq!(r.probability_negative, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_sample() {
        let r = MonteCarloResult::from_samples("flat", &[4.0; 10]).unwrap();
        assert_eq!(r.std_dev, 0.0);
        assert_eq!(r.var_95, 4.0);
        assert_eq!(r.cvar_95, 4.0);
        assert_eq!(r.confidence_intervals.ci_95, (4.0, 4.0));
        assert_eq!(r.coefficient_of_variation(), Some(0.0));
    }

    #[test]
    fn test_moments_are_population() {
        let r = MonteCarloResult::from_samples("m", &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_relative_eq!(r.mean, 2.5, epsilon = 1e-12);
        assert_relative_eq!(r.std_dev, 1.25_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_mean_cv() {
        let r = MonteCarloResult::from_samples("z", &[-1.0, 1.0]).unwrap();
        assert_eq!(r.coefficient_of_variation(), None);
        assert_eq!(r.probability_negative, 0.5);
    }

    #[test]
    fn test_empty_and_non_finite() {
        assert!(MonteCarloResult::from_samples("x", &[])
            .unwrap_err()
            .is_invalid_input());
        assert!(matches!(
            MonteCarloResult::from_samples("x", &[1.0, f64::NAN]),
            Err(AnalysisError::Arithmetic(_))
        ));
    }
}
