//! Profitability index and weighted average cost of capital.

use super::npv::{check_discount_base, npv_unchecked};
use crate::types::AnalysisError;

/// Present value of future flows (periods 1..N) per unit of initial outlay.
///
/// `PI = PV(cash_flows[1..]) / |cash_flows[0]|`. A PI above 1 means the
/// project returns more than it costs at `discount_rate`.
///
/// # Returns
///
/// `Ok(None)` when the initial flow is zero (the ratio is unbounded).
///
/// # Errors
///
/// - `InvalidInput` if `cash_flows` is empty
/// - `Arithmetic` if `discount_rate == -1`
///
/// # Examples
///
/// ```
/// use stratsim_core::finance::profitability_index;
///
/// let pi = profitability_index(&[-1000.0, 1210.0], 0.10).unwrap().unwrap();
/// assert!((pi - 1.1).abs() < 1e-12);
/// ```
pub fn profitability_index(
    cash_flows: &[f64],
    discount_rate: f64,
) -> Result<Option<f64>, AnalysisError> {
    let (first, rest) = cash_flows
        .split_first()
        .ok_or_else(|| AnalysisError::invalid("Cash flows cannot be empty"))?;
    check_discount_base(discount_rate)?;

    let outlay = first.abs();
    if outlay == 0.0 {
        return Ok(None);
    }

    // Shift the tail back one period: npv_unchecked discounts index 0 by
    // (1+r)^0, so divide once more.
    let pv_future = npv_unchecked(rest, discount_rate) / (1.0 + discount_rate);
    Ok(Some(pv_future / outlay))
}

/// Weighted average cost of capital.
///
/// `WACC = E/V · Re + D/V · Rd · (1 - T)` with `V = E + D`.
///
/// # Errors
///
/// - Negative cost of equity or debt
/// - Tax rate outside `[0, 1]`
/// - Negative market values
/// - Total market value of zero
///
/// # Examples
///
/// ```
/// use stratsim_core::finance::wacc;
///
/// let rate = wacc(0.12, 0.08, 0.30, 600_000.0, 400_000.0).unwrap();
/// assert!((rate - 0.0944).abs() < 1e-12);
/// ```
pub fn wacc(
    cost_of_equity: f64,
    cost_of_debt: f64,
    tax_rate: f64,
    market_value_equity: f64,
    market_value_debt: f64,
) -> Result<f64, AnalysisError> {
    if !(cost_of_equity >= 0.0) || !(cost_of_debt >= 0.0) {
        return Err(AnalysisError::invalid("Costs cannot be negative"));
    }
    if !(0.0..=1.0).contains(&tax_rate) {
        return Err(AnalysisError::invalid("Tax rate must be between 0 and 1"));
    }
    if !(market_value_equity >= 0.0) || !(market_value_debt >= 0.0) {
        return Err(AnalysisError::invalid("Market values cannot be negative"));
    }

    let total = market_value_equity + market_value_debt;
    if total == 0.0 {
        return Err(AnalysisError::invalid("Total market value cannot be zero"));
    }

    let equity_weight = market_value_equity / total;
    let debt_weight = market_value_debt / total;
    Ok(equity_weight * cost_of_equity + debt_weight * cost_of_debt * (1.0 - tax_rate))
}
