//! Performance metrics for a series of periodic investment returns.

use crate::math::stats;
use crate::types::AnalysisError;

/// Performance summary of a return series.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InvestmentMetrics {
    /// Amount originally invested.
    pub initial_investment: f64,
    /// Sum of the periodic returns.
    pub total_returns: f64,
    /// Geometric per-period return over the whole series.
    pub annualized_return: f64,
    /// Population standard deviation of the periodic returns.
    pub volatility: f64,
    /// `(annualized_return - risk_free_rate) / volatility`, 0 for zero volatility.
    pub sharpe_ratio: f64,
    /// Deepest decline of cumulative returns from a positive peak, as a
    /// non-positive fraction.
    pub max_drawdown: f64,
    /// 5th percentile of the periodic returns.
    pub var_95: f64,
}

/// Computes return, risk and drawdown metrics for periodic returns.
///
/// `returns` are absolute amounts per period (same unit as
/// `initial_investment`).
///
/// # Errors
///
/// - `returns` is empty
/// - `initial_investment <= 0`
/// - total returns lose more than the initial investment (no real
///   annualised rate)
///
/// # Examples
///
/// ```
/// use stratsim_core::finance::calculate_investment_metrics;
///
/// let metrics = calculate_investment_metrics(&[1000.0, 1000.0], 10_000.0, 0.02).unwrap();
/// assert_eq!(metrics.total_returns, 2000.0);
/// assert_eq!(metrics.volatility, 0.0);
/// assert_eq!(metrics.sharpe_ratio, 0.0);
/// ```
pub fn calculate_investment_metrics(
    returns: &[f64],
    initial_investment: f64,
    risk_free_rate: f64,
) -> Result<InvestmentMetrics, AnalysisError> {
    if returns.is_empty() {
        return Err(AnalysisError::invalid("Returns cannot be empty"));
    }
    if !(initial_investment > 0.0) {
        return Err(AnalysisError::invalid("Initial investment must be positive"));
    }

    let total_returns: f64 = returns.iter().sum();
    let growth = 1.0 + total_returns / initial_investment;
    if growth < 0.0 {
        return Err(AnalysisError::invalid(
            "Total losses exceed the initial investment",
        ));
    }
    let annualized_return = growth.powf(1.0 / returns.len() as f64) - 1.0;

    let volatility = stats::std_dev(returns).unwrap_or(0.0);
    let sharpe_ratio = if volatility > 0.0 {
        (annualized_return - risk_free_rate) / volatility
    } else {
        0.0
    };

    Ok(InvestmentMetrics {
        initial_investment,
        total_returns,
        annualized_return,
        volatility,
        sharpe_ratio,
        max_drawdown: stats::max_drawdown(returns),
        var_95: stats::percentile(returns, 5.0).unwrap_or(0.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_metrics_basic() {
        let returns = [5000.0, 8000.0, -2000.0, 12000.0, 7000.0];
        let metrics = calculate_investment_metrics(&returns, 100_000.0, 0.02).unwrap();

        assert_eq!(metrics.total_returns, 30_000.0);
        assert_relative_eq!(
            metrics.annualized_return,
            1.3f64.powf(0.2) - 1.0,
            epsilon = 1e-12
        );
        assert!(metrics.volatility > 0.0);
        assert!(metrics.max_drawdown <= 0.0);
        assert!(metrics.var_95 < 5000.0);
    }

    #[test]
    fn test_drawdown_detected() {
        // cumulative: 100, 200, 50 -> -75% from peak 200
        let metrics = calculate_investment_metrics(&[100.0, 100.0, -150.0], 1000.0, 0.0).unwrap();
        assert_relative_eq!(metrics.max_drawdown, -0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_sharpe_sign() {
        let metrics = calculate_investment_metrics(&[100.0, 300.0], 1000.0, 0.5).unwrap();
        assert!(metrics.sharpe_ratio < 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(calculate_investment_metrics(&[], 1000.0, 0.02).is_err());
        assert!(calculate_investment_metrics(&[1.0], 0.0, 0.02).is_err());
        assert!(calculate_investment_metrics(&[-2000.0], 1000.0, 0.02).is_err());
    }
}
