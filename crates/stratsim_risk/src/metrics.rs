//! Historical risk metrics.

use stratsim_core::math::stats;
use stratsim_core::AnalysisError;

/// Kind of historical risk metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum RiskMetricKind {
    /// Value at risk.
    ValueAtRisk,
    /// Conditional value at risk (expected shortfall).
    ConditionalValueAtRisk,
    /// Maximum drawdown.
    MaximumDrawdown,
    /// Volatility.
    Volatility,
    /// Skewness.
    Skewness,
    /// Excess kurtosis.
    Kurtosis,
}

impl RiskMetricKind {
    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ValueAtRisk => "Value at Risk (VaR)",
            Self::ConditionalValueAtRisk => "Conditional Value at Risk (CVaR)",
            Self::MaximumDrawdown => "Maximum Drawdown",
            Self::Volatility => "Volatility",
            Self::Skewness => "Skewness",
            Self::Kurtosis => "Kurtosis",
        }
    }

    fn methodology(&self) -> &'static str {
        match self {
            Self::ValueAtRisk => "Historical simulation",
            Self::ConditionalValueAtRisk => "Expected shortfall calculation",
            Self::MaximumDrawdown => "Peak-to-trough decline calculation",
            Self::Volatility => "Standard deviation calculation",
            Self::Skewness => "Third moment calculation",
            Self::Kurtosis => "Fourth moment calculation (excess kurtosis)",
        }
    }

    fn assumption(&self) -> &'static str {
        match self {
            Self::ValueAtRisk => "Past performance is representative of future risk",
            Self::ConditionalValueAtRisk => {
                "Linear relationship between historical and future losses"
            }
            Self::MaximumDrawdown => "Drawdown pattern is representative",
            Self::Volatility => "Returns are normally distributed",
            Self::Skewness => "Sample skewness represents population skewness",
            Self::Kurtosis => "Sample kurtosis represents population kurtosis",
        }
    }

    fn limitation(&self) -> &'static str {
        match self {
            Self::ValueAtRisk => "Does not capture tail risks beyond confidence level",
            Self::ConditionalValueAtRisk => "Assumes stable distribution of returns",
            Self::MaximumDrawdown => "Historical measure may not predict future drawdowns",
            Self::Volatility => "May underestimate risk for non-normal distributions",
            Self::Skewness | Self::Kurtosis => "Sensitive to outliers",
        }
    }
}

/// One computed risk metric with its methodology notes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskMetric {
    /// Metric kind.
    pub kind: RiskMetricKind,
    /// Metric value.
    pub value: f64,
    /// Confidence level the metric was computed at (1.0 for drawdown).
    pub confidence_level: f64,
    /// How the metric is computed.
    pub methodology: String,
    /// Key assumptions.
    pub assumptions: Vec<String>,
    /// Known limitations.
    pub limitations: Vec<String>,
}

impl RiskMetric {
    fn new(kind: RiskMetricKind, value: f64, confidence_level: f64) -> Self {
        Self {
            kind,
            value,
            confidence_level,
            methodology: kind.methodology().to_string(),
            assumptions: vec![kind.assumption().to_string()],
            limitations: vec![kind.limitation().to_string()],
        }
    }

    /// Human-readable metric name.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// Computes VaR, CVaR, maximum drawdown, volatility, skewness and excess
/// kurtosis from a historical series.
///
/// VaR is the `(1 - confidence_level)` percentile; CVaR is the mean of
/// observations at or below it. Drawdown treats the data as per-period
/// increments of a cumulative series. Moments use population statistics.
///
/// # Errors
///
/// `InvalidInput` if `historical` is empty or `confidence_level` is not in
/// the open interval `(0, 1)`.
///
/// # Examples
///
/// ```rust
/// use stratsim_risk::metrics::{calculate_risk_metrics, RiskMetricKind};
///
/// let data: Vec<f64> = (1..=100).map(|i| f64::from(i) - 20.0).collect();
/// let metrics = calculate_risk_metrics(&data, 0.95).unwrap();
///
/// assert_eq!(metrics.len(), 6);
/// assert_eq!(metrics[0].kind, RiskMetricKind::ValueAtRisk);
/// assert!(metrics[1].value <= metrics[0].value);
/// ```
pub fn calculate_risk_metrics(
    historical: &[f64],
    confidence_level: f64,
) -> Result<Vec<RiskMetric>, AnalysisError> {
    if historical.is_empty() {
        return Err(AnalysisError::invalid("Historical data cannot be empty"));
    }
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(AnalysisError::invalid(format!(
            "Confidence level must be between 0 and 1, got {}",
            confidence_level
        )));
    }

    let mut sorted = historical.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let var = stats::percentile_sorted(&sorted, (1.0 - confidence_level) * 100.0);
    let tail: Vec<f64> = sorted.iter().copied().take_while(|x| *x <= var).collect();
    let cvar = stats::mean(&tail).unwrap_or(var);

    // Non-empty input, so the moment helpers always return Some.
    let volatility = stats::std_dev(historical).unwrap_or(0.0);
    let skewness = stats::skewness(historical).unwrap_or(0.0);
    let kurtosis = stats::excess_kurtosis(historical).unwrap_or(0.0);

    Ok(vec![
        RiskMetric::new(RiskMetricKind::ValueAtRisk, var, confidence_level),
        RiskMetric::new(RiskMetricKind::ConditionalValueAtRisk, cvar, confidence_level),
        RiskMetric::new(
            RiskMetricKind::MaximumDrawdown,
            stats::max_drawdown(historical),
            1.0,
        ),
        RiskMetric::new(RiskMetricKind::Volatility, volatility, confidence_level),
        RiskMetric::new(RiskMetricKind::Skewness, skewness, confidence_level),
        RiskMetric::new(RiskMetricKind::Kurtosis, kurtosis, confidence_level),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_all_metrics_present() {
        let data = [0.05, -0.02, 0.03, -0.08, 0.10, 0.01, -0.04];
        let metrics = calculate_risk_metrics(&data, 0.95).unwrap();
        let kinds: Vec<_> = metrics.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RiskMetricKind::ValueAtRisk,
                RiskMetricKind::ConditionalValueAtRisk,
                RiskMetricKind::MaximumDrawdown,
                RiskMetricKind::Volatility,
                RiskMetricKind::Skewness,
                RiskMetricKind::Kurtosis,
            ]
        );
        assert_eq!(metrics[2].confidence_level, 1.0);
        assert_eq!(metrics[0].name(), "Value at Risk (VaR)");
        assert!(metrics.iter().all(|m| !m.assumptions.is_empty()));
    }

    #[test]
    fn test_var_and_cvar_values() {
        let data: Vec<f64> = (0..=100).map(f64::from).collect();
        let metrics = calculate_risk_metrics(&data, 0.95).unwrap();
        assert_relative_eq!(metrics[0].value, 5.0, epsilon = 1e-9);
        // Tail is 0..=5
        assert_relative_eq!(metrics[1].value, 2.5, epsilon = 1e-9);
    }

    #[test]
    fn test_symmetric_data_zero_skew() {
        let data = [-2.0, -1.0, 0.0, 1.0, 2.0];
        let metrics = calculate_risk_metrics(&data, 0.95).unwrap();
        assert_relative_eq!(metrics[4].value, 0.0, epsilon = 1e-12);
        assert!(metrics[5].value < 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(calculate_risk_metrics(&[], 0.95).is_err());
        assert!(calculate_risk_metrics(&[1.0], 1.0).is_err());
        assert!(calculate_risk_metrics(&[1.0], 0.0).is_err());
        assert!(calculate_risk_metrics(&[1.0], f64::NAN).is_err());
    }
}
