//! Payback period (simple and discounted).

use super::npv::{check_discount_base, powi_period};
use crate::types::AnalysisError;

/// Computes the number of periods until cumulative cash flow turns
/// non-negative.
///
/// Each period's flow is discounted first when `discounted` is `true`. At the
/// first period `i` whose cumulative total is `>= 0`, the crossing point is
/// linearly interpolated between the last negative total and that period:
/// `i - 1 + (-previous_total) / flow_i`. A series that is non-negative from
/// period 0 pays back at `0.0`.
///
/// # Returns
///
/// `Ok(None)` when the cumulative total never becomes non-negative.
///
/// # Errors
///
/// - `InvalidInput` if `cash_flows` is empty
/// - `InvalidInput` if `discounted` is `true` and `discount_rate` is `None`
/// - `Arithmetic` if discounting at a rate of -1
///
/// # Examples
///
/// ```
/// use stratsim_core::finance::payback_period;
///
/// let flows = [-1000.0, 500.0, 500.0, 500.0];
/// assert_eq!(payback_period(&flows, false, None).unwrap(), Some(2.0));
///
/// let flows = [-1000.0, 400.0, 400.0, 400.0];
/// assert_eq!(payback_period(&flows, false, None).unwrap(), Some(2.5));
/// ```
pub fn payback_period(
    cash_flows: &[f64],
    discounted: bool,
    discount_rate: Option<f64>,
) -> Result<Option<f64>, AnalysisError> {
    if cash_flows.is_empty() {
        return Err(AnalysisError::invalid("Cash flows cannot be empty"));
    }

    let rate = match (discounted, discount_rate) {
        (true, None) => {
            return Err(AnalysisError::invalid(
                "Discounted payback requires a discount rate",
            ))
        }
        (true, Some(rate)) => {
            check_discount_base(rate)?;
            Some(rate)
        }
        (false, _) => None,
    };

    let mut cumulative = 0.0;
    for (period, &cf) in cash_flows.iter().enumerate() {
        let flow = match rate {
            Some(r) => cf / powi_period(1.0 + r, period),
            None => cf,
        };
        let previous = cumulative;
        cumulative += flow;

        if cumulative >= 0.0 {
            if period == 0 {
                return Ok(Some(0.0));
            }
            // previous < 0 and cumulative >= 0, so flow > 0
            return Ok(Some((period - 1) as f64 + (-previous) / flow));
        }
    }

    Ok(None)
}

/// Discounted payback period at `discount_rate`.
///
/// Shorthand for `payback_period(cash_flows, true, Some(discount_rate))`.
pub fn discounted_payback_period(
    cash_flows: &[f64],
    discount_rate: f64,
) -> Result<Option<f64>, AnalysisError> {
    payback_period(cash_flows, true, Some(discount_rate))
}
