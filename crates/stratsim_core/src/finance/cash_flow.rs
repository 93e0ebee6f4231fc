//! Combined cash-flow analysis.

use super::irr::irr_with;
use super::npv::npv;
use super::payback::payback_period;
use super::profitability::profitability_index;
use crate::math::solvers::SolverConfig;
use crate::types::AnalysisError;

/// Discounted cash-flow metrics for one series at one discount rate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CashFlowAnalysis {
    /// Period indices `0..N`.
    pub periods: Vec<usize>,
    /// The analysed cash flows.
    pub cash_flows: Vec<f64>,
    /// Discount rate used for NPV, discounted payback and PI.
    pub discount_rate: f64,
    /// Net present value.
    pub npv: f64,
    /// Internal rate of return; `None` when no root exists or converges.
    pub irr: Option<f64>,
    /// Simple payback period; `None` when never recovered.
    pub payback_period: Option<f64>,
    /// Discounted payback period; `None` when never recovered.
    pub discounted_payback: Option<f64>,
    /// Profitability index; `None` for a zero initial flow.
    pub profitability_index: Option<f64>,
}

impl CashFlowAnalysis {
    /// `true` when the project creates value at the analysed rate.
    pub fn is_value_creating(&self) -> bool {
        self.npv > 0.0
    }
}

/// Runs NPV, IRR, simple and discounted payback, and PI on one series.
///
/// A single-entry series is accepted; its IRR is reported as `None`.
///
/// # Errors
///
/// - `InvalidInput` if `cash_flows` is empty
/// - `Arithmetic` if `discount_rate == -1`
///
/// # Examples
///
/// ```
/// use stratsim_core::finance::perform_cash_flow_analysis;
///
/// let flows = [-1000.0, 300.0, 400.0, 500.0, 600.0];
/// let analysis = perform_cash_flow_analysis(&flows, 0.10).unwrap();
///
/// assert!(analysis.is_value_creating());
/// assert_eq!(analysis.periods, vec![0, 1, 2, 3, 4]);
/// assert!(analysis.irr.unwrap() > 0.10);
/// ```
pub fn perform_cash_flow_analysis(
    cash_flows: &[f64],
    discount_rate: f64,
) -> Result<CashFlowAnalysis, AnalysisError> {
    perform_cash_flow_analysis_with(cash_flows, discount_rate, &SolverConfig::rate_search())
}

/// [`perform_cash_flow_analysis`] with explicit IRR search bounds.
///
/// # Errors
///
/// As [`perform_cash_flow_analysis`], plus `InvalidInput` for a zero
/// iteration budget or non-positive tolerance in `irr_config`.
pub fn perform_cash_flow_analysis_with(
    cash_flows: &[f64],
    discount_rate: f64,
    irr_config: &SolverConfig<f64>,
) -> Result<CashFlowAnalysis, AnalysisError> {
    let npv = npv(cash_flows, discount_rate)?;
    let irr = if cash_flows.len() >= 2 {
        irr_with(cash_flows, irr_config.max_iterations, irr_config.tolerance)?
    } else {
        None
    };

    Ok(CashFlowAnalysis {
        periods: (0..cash_flows.len()).collect(),
        cash_flows: cash_flows.to_vec(),
        discount_rate,
        npv,
        irr,
        payback_period: payback_period(cash_flows, false, None)?,
        discounted_payback: payback_period(cash_flows, true, Some(discount_rate))?,
        profitability_index: profitability_index(cash_flows, discount_rate)?,
    })
}

/// Undiscounted totals of a cash-flow series.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CashFlowSummary {
    /// Sum of positive flows.
    pub total_inflows: f64,
    /// Sum of negative flows, as a positive magnitude.
    pub total_outflows: f64,
    /// Inflows minus outflows.
    pub net_cash_flow: f64,
    /// Running total after each period.
    pub cumulative_cash_flows: Vec<f64>,
    /// Simple payback period.
    pub payback_period: Option<f64>,
}

/// Summarises inflows, outflows and the cumulative position of a series.
///
/// # Errors
///
/// Returns `InvalidInput` if `cash_flows` is empty.
///
/// # Examples
///
/// ```
/// use stratsim_core::finance::summarize_cash_flows;
///
/// let summary = summarize_cash_flows(&[-100.0, 60.0, 60.0]).unwrap();
/// assert_eq!(summary.total_inflows, 120.0);
/// assert_eq!(summary.total_outflows, 100.0);
/// assert_eq!(summary.net_cash_flow, 20.0);
/// assert_eq!(summary.cumulative_cash_flows, vec![-100.0, -40.0, 20.0]);
/// ```
pub fn summarize_cash_flows(cash_flows: &[f64]) -> Result<CashFlowSummary, AnalysisError> {
    let payback_period = payback_period(cash_flows, false, None)?;

    let total_inflows: f64 = cash_flows.iter().filter(|cf| **cf > 0.0).sum();
    let total_outflows: f64 = cash_flows.iter().filter(|cf| **cf < 0.0).map(|cf| -cf).sum();
    let cumulative_cash_flows = cash_flows
        .iter()
        .scan(0.0, |total, cf| {
            *total += cf;
            Some(*total)
        })
        .collect();

    Ok(CashFlowSummary {
        total_inflows,
        total_outflows,
        net_cash_flow: total_inflows - total_outflows,
        cumulative_cash_flows,
        payback_period,
    })
}
