//! Net present value and discounting primitives.

use crate::types::AnalysisError;

/// Computes the net present value of a cash-flow series.
///
/// `NPV = Σ cash_flows[t] / (1 + discount_rate)^t` for `t = 0..N-1`.
///
/// The rate is never clamped. Rates below -1 are computed as given (the
/// exponents are integers, so a negative base is well defined); only a rate
/// of exactly -1 fails, because every discount factor divides by zero.
///
/// # Errors
///
/// - `AnalysisError::InvalidInput` if `cash_flows` is empty
/// - `AnalysisError::Arithmetic` if `discount_rate == -1`
///
/// # Examples
///
/// ```
/// use stratsim_core::finance::npv;
///
/// assert_eq!(npv(&[-1000.0, 1000.0], 0.0).unwrap(), 0.0);
///
/// let value = npv(&[-100_000.0, 150_000.0], 0.10).unwrap();
/// assert!((value - 36_363.636).abs() < 1e-3);
/// ```
pub fn npv(cash_flows: &[f64], discount_rate: f64) -> Result<f64, AnalysisError> {
    if cash_flows.is_empty() {
        return Err(AnalysisError::invalid("Cash flows cannot be empty"));
    }
    check_discount_base(discount_rate)?;
    Ok(npv_unchecked(cash_flows, discount_rate))
}

/// Discount factor `1 / (1 + rate)^period`.
///
/// # Errors
///
/// Returns `AnalysisError::Arithmetic` if `rate == -1` and `period > 0`.
///
/// # Examples
///
/// ```
/// use stratsim_core::finance::discount_factor;
///
/// assert_eq!(discount_factor(0.25, 2).unwrap(), 0.64);
/// assert_eq!(discount_factor(-1.0, 0).unwrap(), 1.0);
/// ```
pub fn discount_factor(rate: f64, period: u32) -> Result<f64, AnalysisError> {
    if period == 0 {
        return Ok(1.0);
    }
    check_discount_base(rate)?;
    Ok(1.0 / powi_period(1.0 + rate, period as usize))
}

/// Present value of a single `amount` received at the end of `period`.
pub fn present_value(amount: f64, rate: f64, period: u32) -> Result<f64, AnalysisError> {
    Ok(amount * discount_factor(rate, period)?)
}

pub(crate) fn check_discount_base(rate: f64) -> Result<(), AnalysisError> {
    if 1.0 + rate == 0.0 {
        return Err(AnalysisError::Arithmetic(format!(
            "discount rate {} makes the discount base zero",
            rate
        )));
    }
    Ok(())
}

/// `base^period`, falling back to `powf` for periods beyond `i32` range.
#[inline]
pub(crate) fn powi_period(base: f64, period: usize) -> f64 {
    match i32::try_from(period) {
        Ok(p) => base.powi(p),
        Err(_) => base.powf(period as f64),
    }
}

/// NPV without input validation; callers guarantee a non-empty series and
/// a rate other than -1.
pub(crate) fn npv_unchecked(cash_flows: &[f64], rate: f64) -> f64 {
    let base = 1.0 + rate;
    cash_flows
        .iter()
        .enumerate()
        .map(|(t, cf)| cf / powi_period(base, t))
        .sum()
}

/// First derivative of NPV with respect to the rate:
/// `Σ -t · cf[t] / (1 + r)^(t + 1)`.
pub(crate) fn npv_derivative(cash_flows: &[f64], rate: f64) -> f64 {
    let base = 1.0 + rate;
    cash_flows
        .iter()
        .enumerate()
        .skip(1)
        .map(|(t, cf)| -(t as f64) * cf / powi_period(base, t + 1))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_npv_break_even_flow_at_zero_rate() {
        assert_eq!(npv(&[-1000.0, 1000.0], 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_npv_zero_rate_is_sum() {
        let flows = [-100_000.0, 30_000.0, 35_000.0, 40_000.0, 45_000.0];
        assert_relative_eq!(npv(&flows, 0.0).unwrap(), 50_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_npv_positive_investment() {
        let flows = [-100_000.0, 30_000.0, 35_000.0, 40_000.0, 45_000.0];
        assert!(npv(&flows, 0.10).unwrap() > 0.0);
    }

    #[test]
    fn test_npv_high_rate_negative() {
        let flows = [-100_000.0, 30_000.0, 35_000.0, 40_000.0, 45_000.0];
        assert!(npv(&flows, 0.50).unwrap() < 0.0);
    }

    #[test]
    fn test_npv_single_period() {
        let value = npv(&[-100_000.0, 150_000.0], 0.10).unwrap();
        assert_relative_eq!(value, -100_000.0 + 150_000.0 / 1.1, epsilon = 1e-9);
    }

    #[test]
    fn test_npv_negative_rate_computes() {
        let value = npv(&[-100.0, 100.0], -0.5).unwrap();
        assert_relative_eq!(value, 100.0, epsilon = 1e-12);
    }

    #[test]
    fn test_npv_rate_below_minus_one_computes() {
        // base = -1: -100 + 100 / -1 = -200
        let value = npv(&[-100.0, 100.0], -2.0).unwrap();
        assert_relative_eq!(value, -200.0, epsilon = 1e-12);
    }

    #[test]
    fn test_npv_empty_rejected() {
        let err = npv(&[], 0.1).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InvalidInput("Cash flows cannot be empty".to_string())
        );
    }

    #[test]
    fn test_npv_rate_minus_one_is_arithmetic_error() {
        assert!(matches!(
            npv(&[-100.0, 50.0], -1.0),
            Err(AnalysisError::Arithmetic(_))
        ));
    }

    #[test]
    fn test_npv_derivative_matches_finite_difference() {
        let flows = [-1000.0, 300.0, 400.0, 500.0, 600.0];
        let r = 0.12;
        let h = 1e-6;
        let fd = (npv_unchecked(&flows, r + h) - npv_unchecked(&flows, r - h)) / (2.0 * h);
        assert_relative_eq!(npv_derivative(&flows, r), fd, max_relative = 1e-6);
    }

    #[test]
    fn test_present_value() {
        assert_relative_eq!(present_value(121.0, 0.1, 2).unwrap(), 100.0, epsilon = 1e-12);
        assert!(present_value(1.0, -1.0, 1).is_err());
    }
}
