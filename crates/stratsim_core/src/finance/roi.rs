//! Return on investment.

use crate::types::AnalysisError;

/// Computes return on investment, optionally annualised.
///
/// - `years == None` (or `Some(0)`): `(final_value - initial) / initial`
/// - `years == Some(n)`, `n > 0`: compound annual rate
///   `(final_value / initial)^(1/n) - 1`
///
/// # Errors
///
/// - `initial_investment <= 0` (or NaN)
/// - annualised ROI with a negative `final_value`, which has no real
///   compound rate
///
/// # Examples
///
/// ```
/// use stratsim_core::finance::roi;
///
/// assert_eq!(roi(100_000.0, 150_000.0, None).unwrap(), 0.5);
///
/// let annual = roi(100_000.0, 150_000.0, Some(3)).unwrap();
/// assert!((annual - 0.1447).abs() < 1e-4);
/// ```
pub fn roi(
    initial_investment: f64,
    final_value: f64,
    years: Option<u32>,
) -> Result<f64, AnalysisError> {
    if !(initial_investment > 0.0) {
        return Err(AnalysisError::invalid(format!(
            "Initial investment must be positive, got {}",
            initial_investment
        )));
    }

    match years {
        Some(n) if n > 0 => {
            let growth = final_value / initial_investment;
            if growth < 0.0 {
                return Err(AnalysisError::invalid(
                    "Annualised ROI is undefined for a negative final value",
                ));
            }
            Ok(growth.powf(1.0 / f64::from(n)) - 1.0)
        }
        _ => Ok((final_value - initial_investment) / initial_investment),
    }
}
