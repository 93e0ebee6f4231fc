//! NPV sensitivity to a single driver.

use super::npv::npv;
use crate::types::AnalysisError;

/// NPV response to alternative values of one input variable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpvSensitivity {
    /// Name of the varied input.
    pub variable_name: String,
    /// Base-case value of the input.
    pub base_value: f64,
    /// Tested input values, in caller order.
    pub sensitivity_range: Vec<f64>,
    /// NPV minus base NPV, one per tested value.
    pub npv_impacts: Vec<f64>,
    /// Relative NPV change over relative input change between the first and
    /// last tested values.
    pub elasticity: f64,
}

/// Re-prices a project under alternative input values.
///
/// Each entry of `impacts` pairs an input value with the cash flows it
/// produces. Every series is discounted at `discount_rate` and compared with
/// the base-case NPV. The elasticity uses the first and last entries and is
/// `0.0` whenever it is undefined (fewer than two entries, a zero base value,
/// zero base NPV, or no change in the input).
///
/// # Errors
///
/// Propagates [`npv`] errors for the base or any alternative series.
///
/// # Examples
///
/// ```
/// use stratsim_core::finance::npv_sensitivity;
///
/// let base = [-100.0, 110.0];
/// let impacts = vec![(0.9, vec![-100.0, 99.0]), (1.1, vec![-100.0, 121.0])];
/// let result = npv_sensitivity(&base, 0.0, "volume", &impacts, 1.0).unwrap();
///
/// assert_eq!(result.npv_impacts.len(), 2);
/// assert!(result.elasticity > 0.0);
/// ```
pub fn npv_sensitivity(
    base_flows: &[f64],
    discount_rate: f64,
    variable_name: &str,
    impacts: &[(f64, Vec<f64>)],
    base_value: f64,
) -> Result<NpvSensitivity, AnalysisError> {
    let base_npv = npv(base_flows, discount_rate)?;

    let mut sensitivity_range = Vec::with_capacity(impacts.len());
    let mut npv_impacts = Vec::with_capacity(impacts.len());
    for (value, flows) in impacts {
        sensitivity_range.push(*value);
        npv_impacts.push(npv(flows, discount_rate)? - base_npv);
    }

    let elasticity = match (sensitivity_range.first(), sensitivity_range.last()) {
        (Some(first), Some(last)) if impacts.len() >= 2 && base_value != 0.0 && base_npv != 0.0 => {
            let value_change = (last - first) / base_value;
            let npv_change = (npv_impacts[npv_impacts.len() - 1] - npv_impacts[0]) / base_npv;
            if value_change != 0.0 {
                npv_change / value_change
            } else {
                0.0
            }
        }
        _ => 0.0,
    };

    Ok(NpvSensitivity {
        variable_name: variable_name.to_string(),
        base_value,
        sensitivity_range,
        npv_impacts,
        elasticity,
    })
}
