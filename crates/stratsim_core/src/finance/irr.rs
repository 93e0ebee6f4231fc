//! Internal rate of return.
//!
//! The IRR is the rate `r` at which `npv(cash_flows, r) == 0`. The search
//! runs in two stages:
//!
//! 1. **Bracketing**: NPV is evaluated on a fixed grid from [`RATE_FLOOR`]
//!    to [`RATE_CEILING`]. The first pair of adjacent grid points with
//!    opposite NPV signs brackets the lowest root in range.
//! 2. **Refinement**: Brent's method narrows the bracket to the requested
//!    tolerance within the iteration budget.
//!
//! When the grid finds no bracket (e.g. a root above the ceiling),
//! Newton-Raphson seeded at 10% is tried as a fallback, with iterates held
//! above the floor. If that fails too, the result is `Ok(None)`.

use super::npv::{npv_derivative, npv_unchecked};
use crate::math::solvers::{BrentSolver, NewtonRaphsonSolver, SolverConfig};
use crate::types::AnalysisError;

/// Lowest rate considered by the bracketing grid.
pub const RATE_FLOOR: f64 = -0.99;

/// Highest rate considered by the bracketing grid.
pub const RATE_CEILING: f64 = 10.0;

/// Grid spacing for the bracketing scan.
const GRID_STEP: f64 = 0.01;

/// Initial guess for the Newton-Raphson fallback.
const NEWTON_SEED: f64 = 0.1;

/// Computes the internal rate of return with default bounds
/// (`max_iterations = 100`, `tolerance = 1e-6`).
///
/// # Returns
///
/// - `Ok(Some(rate))` when a root is found
/// - `Ok(None)` when the series has no sign change or no root converges
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` when `cash_flows` has fewer than
/// two entries.
///
/// # Examples
///
/// ```
/// use stratsim_core::finance::irr;
///
/// let rate = irr(&[-1000.0, 300.0, 400.0, 500.0, 600.0]).unwrap().unwrap();
/// assert!((rate - 0.1486).abs() < 1e-4);
///
/// // All inflows: no sign change, no IRR
/// assert_eq!(irr(&[100.0, 100.0, 100.0]).unwrap(), None);
/// ```
pub fn irr(cash_flows: &[f64]) -> Result<Option<f64>, AnalysisError> {
    let config = SolverConfig::rate_search();
    irr_with(cash_flows, config.max_iterations, config.tolerance)
}

/// Computes the internal rate of return with explicit search bounds.
///
/// `tolerance` applies to `|NPV|` at the returned rate and to the width of
/// the final bracket; `max_iterations` bounds each refinement stage.
///
/// # Errors
///
/// - Fewer than two cash flows
/// - `max_iterations == 0` or a non-positive/non-finite `tolerance`
pub fn irr_with(
    cash_flows: &[f64],
    max_iterations: usize,
    tolerance: f64,
) -> Result<Option<f64>, AnalysisError> {
    if cash_flows.len() < 2 {
        return Err(AnalysisError::invalid(
            "IRR requires at least two cash flows",
        ));
    }
    let config = SolverConfig::try_new(tolerance, max_iterations)?;

    if !has_sign_change(cash_flows) {
        tracing::debug!(
            periods = cash_flows.len(),
            "cash flows have no sign change; IRR undefined"
        );
        return Ok(None);
    }

    let f = |r: f64| npv_unchecked(cash_flows, r);

    if let Some((lo, hi)) = find_bracket(&f) {
        if lo == hi {
            return Ok(Some(lo));
        }
        match BrentSolver::new(config).find_root(f, lo, hi) {
            Ok(rate) => return Ok(Some(rate)),
            Err(err) => {
                tracing::warn!(%err, lo, hi, "IRR refinement failed inside bracket");
                return Ok(None);
            }
        }
    }

    let newton = NewtonRaphsonSolver::new(config).with_lower_bound(RATE_FLOOR);
    match newton.find_root(f, |r| npv_derivative(cash_flows, r), NEWTON_SEED) {
        Ok(rate) if rate.is_finite() && rate > -1.0 => Ok(Some(rate)),
        Ok(_) => Ok(None),
        Err(err) => {
            tracing::debug!(%err, "no IRR found by bracketing or Newton-Raphson");
            Ok(None)
        }
    }
}

/// Returns `true` when the series contains both a strictly positive and a
/// strictly negative flow.
fn has_sign_change(cash_flows: &[f64]) -> bool {
    let positive = cash_flows.iter().any(|&cf| cf > 0.0);
    let negative = cash_flows.iter().any(|&cf| cf < 0.0);
    positive && negative
}

/// Scans the rate grid for the first sign change of `f`.
///
/// Returns `(r, r)` when the grid lands exactly on a root. Grid points where
/// `f` is not finite are skipped.
fn find_bracket<F: Fn(f64) -> f64>(f: &F) -> Option<(f64, f64)> {
    let steps = ((RATE_CEILING - RATE_FLOOR) / GRID_STEP).round() as usize;
    let mut previous: Option<(f64, f64)> = None;

    for k in 0..=steps {
        let rate = RATE_FLOOR + k as f64 * GRID_STEP;
        let value = f(rate);
        if !value.is_finite() {
            previous = None;
            continue;
        }
        if value == 0.0 {
            return Some((rate, rate));
        }
        if let Some((prev_rate, prev_value)) = previous {
            if (prev_value > 0.0) != (value > 0.0) {
                return Some((prev_rate, rate));
            }
        }
        previous = Some((rate, value));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_irr_golden_value() {
        let rate = irr(&[-1000.0, 300.0, 400.0, 500.0, 600.0])
            .unwrap()
            .unwrap();
        assert_abs_diff_eq!(rate, 0.1486, epsilon = 1e-4);
    }

    #[test]
    fn test_irr_single_period() {
        let rate = irr(&[-100_000.0, 150_000.0]).unwrap().unwrap();
        assert_abs_diff_eq!(rate, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_irr_root_npv_is_near_zero() {
        let flows = [-100_000.0, 30_000.0, 35_000.0, 40_000.0, 45_000.0];
        let rate = irr(&flows).unwrap().unwrap();
        assert!(rate > 0.0 && rate < 1.0);
        // Within one unit of currency on a 100k outlay
        assert!(npv_unchecked(&flows, rate).abs() < 1.0);
    }

    #[test]
    fn test_irr_low_return_project() {
        let flows = [-100_000.0, 10_000.0, 15_000.0, 20_000.0, 25_000.0];
        let rate = irr(&flows).unwrap().unwrap();
        assert!(rate < 0.0, "losing project should have negative IRR, got {}", rate);
    }

    #[test]
    fn test_irr_all_positive_is_none() {
        assert_eq!(irr(&[100.0, 100.0, 100.0]).unwrap(), None);
    }

    #[test]
    fn test_irr_all_negative_is_none() {
        assert_eq!(irr(&[-100_000.0, -10_000.0, -15_000.0]).unwrap(), None);
    }

    #[test]
    fn test_irr_zero_rate_distinct_from_none() {
        let rate = irr(&[-100.0, 100.0]).unwrap();
        assert!(rate.is_some());
        assert_abs_diff_eq!(rate.unwrap(), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_irr_root_above_grid_uses_newton() {
        // IRR = 19 (1900%), beyond the bracketing ceiling
        let rate = irr(&[-1.0, 20.0]).unwrap().unwrap();
        assert_abs_diff_eq!(rate, 19.0, epsilon = 1e-4);
    }

    #[test]
    fn test_irr_too_few_flows() {
        assert!(irr(&[]).unwrap_err().is_invalid_input());
        assert!(irr(&[-100.0]).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_irr_with_rejects_bad_bounds() {
        let flows = [-100.0, 110.0];
        assert!(irr_with(&flows, 0, 1e-6).is_err());
        assert!(irr_with(&flows, 100, 0.0).is_err());
    }

    #[test]
    fn test_irr_with_tiny_budget_returns_none() {
        let flows = [-1000.0, 300.0, 400.0, 500.0, 600.0];
        assert_eq!(irr_with(&flows, 1, 1e-12).unwrap(), None);
    }

    #[test]
    fn test_irr_multiple_sign_changes_returns_a_root() {
        // Roots at 10% and 20%
        let flows = [-100.0, 230.0, -132.0];
        let rate = irr(&flows).unwrap().unwrap();
        assert!(npv_unchecked(&flows, rate).abs() < 1e-3);
        assert!((rate - 0.1).abs() < 1e-4 || (rate - 0.2).abs() < 1e-4);
    }

    #[test]
    fn test_irr_is_deterministic() {
        let flows = [-500.0, 200.0, 200.0, 200.0];
        assert_eq!(irr(&flows).unwrap(), irr(&flows).unwrap());
    }
}
