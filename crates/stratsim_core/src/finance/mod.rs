//! Financial metrics for evaluating a business decision.
//!
//! ## Discounted cash flow
//!
//! - [`npv`]: Net present value of a cash-flow series
//! - [`irr`]: Internal rate of return (bracketed Brent search)
//! - [`payback_period`]: Periods until cumulative cash flow recovers the outlay
//! - [`profitability_index`]: PV of future flows per unit of initial outlay
//! - [`perform_cash_flow_analysis`]: All of the above in one result
//!
//! ## Returns and cost of capital
//!
//! - [`roi`]: Simple or annualised return on investment
//! - [`wacc`]: Weighted average cost of capital
//! - [`calculate_investment_metrics`]: Volatility, Sharpe, drawdown, VaR
//!
//! ## Operating economics
//!
//! - [`break_even_point`] / [`break_even_analysis`]: Unit volume where revenue covers cost
//! - [`calculate_financial_ratios`]: Margins, ROE, ROA, leverage, liquidity
//!
//! Cash-flow series are plain `&[f64]` slices where index 0 is the initial
//! outlay (conventionally negative) and index `t` is the flow at the end of
//! period `t`.

mod break_even;
mod cash_flow;
mod investment;
mod irr;
mod npv;
mod payback;
mod profitability;
mod ratios;
mod roi;
mod sensitivity;

pub use break_even::{break_even_analysis, break_even_point, BreakEvenAnalysis};
pub use cash_flow::{
    perform_cash_flow_analysis, perform_cash_flow_analysis_with, summarize_cash_flows, CashFlowAnalysis, CashFlowSummary,
};
pub use investment::{calculate_investment_metrics, InvestmentMetrics};
pub use irr::{irr, irr_with, RATE_CEILING, RATE_FLOOR};
pub use npv::{discount_factor, npv, present_value};
pub use payback::{discounted_payback_period, payback_period};
pub use profitability::{profitability_index, wacc};
pub use ratios::{calculate_financial_ratios, FinancialRatios, FinancialStatement};
pub use roi::roi;
pub use sensitivity::{npv_sensitivity, NpvSensitivity};
