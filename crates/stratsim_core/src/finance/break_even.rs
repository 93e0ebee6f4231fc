//! Break-even analysis.

use crate::types::AnalysisError;

/// Break-even metrics for a single product line.
///
/// # Examples
///
/// ```
/// use stratsim_core::finance::break_even_analysis;
///
/// let analysis = break_even_analysis(10_000.0, 50.0, 30.0).unwrap();
/// assert_eq!(analysis.break_even_units, 500.0);
/// assert_eq!(analysis.break_even_revenue, 25_000.0);
/// assert_eq!(analysis.margin_of_safety(800.0), 300.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreakEvenAnalysis {
    /// Fixed costs for the period.
    pub fixed_costs: f64,
    /// Selling price per unit.
    pub price_per_unit: f64,
    /// Variable cost per unit.
    pub variable_cost_per_unit: f64,
    /// Units required to cover fixed costs.
    pub break_even_units: f64,
    /// Revenue at the break-even volume.
    pub break_even_revenue: f64,
    /// Price minus variable cost.
    pub contribution_margin: f64,
    /// Contribution margin as a fraction of price.
    pub contribution_margin_ratio: f64,
}

impl BreakEvenAnalysis {
    /// Units sold above (positive) or below (negative) break-even.
    pub fn margin_of_safety(&self, target_units: f64) -> f64 {
        target_units - self.break_even_units
    }

    /// Operating profit at `units` sold.
    pub fn operating_income(&self, units: f64) -> f64 {
        units * self.contribution_margin - self.fixed_costs
    }

    /// Degree of operating leverage at `units` sold: total contribution
    /// divided by operating income.
    ///
    /// `None` at or below break-even, where operating income is not positive.
    pub fn operating_leverage(&self, units: f64) -> Option<f64> {
        let income = self.operating_income(units);
        if income > 0.0 {
            Some(units * self.contribution_margin / income)
        } else {
            None
        }
    }
}

/// Units at which revenue equals total cost:
/// `fixed_costs / (price_per_unit - variable_cost_per_unit)`.
///
/// # Errors
///
/// - `price_per_unit <= variable_cost_per_unit` (no positive contribution
///   margin, so no finite break-even)
/// - `fixed_costs < 0`
///
/// # Examples
///
/// ```
/// use stratsim_core::finance::break_even_point;
///
/// assert_eq!(break_even_point(10_000.0, 50.0, 30.0).unwrap(), 500.0);
/// assert!(break_even_point(10_000.0, 30.0, 30.0).is_err());
/// ```
pub fn break_even_point(
    fixed_costs: f64,
    price_per_unit: f64,
    variable_cost_per_unit: f64,
) -> Result<f64, AnalysisError> {
    if !(price_per_unit > variable_cost_per_unit) {
        return Err(AnalysisError::invalid(
            "Price per unit must be greater than variable cost per unit",
        ));
    }
    if !(fixed_costs >= 0.0) {
        return Err(AnalysisError::invalid("Fixed costs cannot be negative"));
    }
    Ok(fixed_costs / (price_per_unit - variable_cost_per_unit))
}

/// Full break-even analysis: units, revenue and contribution margins.
///
/// # Errors
///
/// Same contract as [`break_even_point`].
pub fn break_even_analysis(
    fixed_costs: f64,
    price_per_unit: f64,
    variable_cost_per_unit: f64,
) -> Result<BreakEvenAnalysis, AnalysisError> {
    let break_even_units = break_even_point(fixed_costs, price_per_unit, variable_cost_per_unit)?;
    let contribution_margin = price_per_unit - variable_cost_per_unit;

    Ok(BreakEvenAnalysis {
        fixed_costs,
        price_per_unit,
        variable_cost_per_unit,
        break_even_units,
        break_even_revenue: break_even_units * price_per_unit,
        contribution_margin,
        contribution_margin_ratio: contribution_margin / price_per_unit,
    })
}
