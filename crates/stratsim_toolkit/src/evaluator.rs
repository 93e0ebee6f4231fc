//! Parallel evaluation of decision options.
//!
//! Each [`DecisionOption`] is reduced to an [`OptionReport`]: discounted
//! cash-flow metrics, ROI, break-even economics and a revenue scenario
//! summary, depending on which inputs the option carries. Options are
//! independent, so [`OptionEvaluator::evaluate_all`] fans them out with
//! rayon. Every option draws from its own generator seeded from the
//! configured base seed plus its index, so a seeded batch is reproducible
//! regardless of scheduling.

use crate::config::ToolkitConfig;
use crate::ToolkitError;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use stratsim_core::finance::{
    break_even_analysis, perform_cash_flow_analysis_with, roi, BreakEvenAnalysis, CashFlowAnalysis,
};
use stratsim_core::math::stats;
use stratsim_core::AnalysisError;
use stratsim_risk::monte_carlo::MonteCarloResult;
use stratsim_risk::rng::ScenarioRng;
use stratsim_risk::scenarios::generate_scenarios_with;
use tracing::{debug, info, warn};

/// Per-unit economics of an option's product or service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitEconomics {
    /// Fixed costs for the period.
    pub fixed_costs: f64,
    /// Selling price per unit.
    pub price_per_unit: f64,
    /// Variable cost per unit.
    pub variable_cost_per_unit: f64,
    /// Planned sales volume, for margin of safety and operating leverage.
    #[serde(default)]
    pub expected_units: Option<f64>,
}

/// One alternative under consideration.
///
/// `cash_flows[0]` is the initial flow, normally the (negative) investment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOption {
    /// Display name; must not be blank.
    pub name: String,
    /// Period cash flows starting at t = 0.
    pub cash_flows: Vec<f64>,
    /// Value at exit, for ROI.
    #[serde(default)]
    pub final_value: Option<f64>,
    /// Holding period for annualised ROI.
    #[serde(default)]
    pub holding_years: Option<u32>,
    /// Expected revenue, for scenario generation.
    #[serde(default)]
    pub revenue_base: Option<f64>,
    /// Unit economics, for break-even analysis.
    #[serde(default)]
    pub unit_economics: Option<UnitEconomics>,
}

impl DecisionOption {
    /// Creates an option with cash flows only.
    pub fn new(name: impl Into<String>, cash_flows: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            cash_flows,
            final_value: None,
            holding_years: None,
            revenue_base: None,
            unit_economics: None,
        }
    }

    /// Sets the exit value and optional holding period.
    pub fn with_final_value(mut self, final_value: f64, holding_years: Option<u32>) -> Self {
        self.final_value = Some(final_value);
        self.holding_years = holding_years;
        self
    }

    /// Sets the revenue base for scenario generation.
    pub fn with_revenue_base(mut self, revenue_base: f64) -> Self {
        self.revenue_base = Some(revenue_base);
        self
    }

    /// Sets the unit economics.
    pub fn with_unit_economics(mut self, unit_economics: UnitEconomics) -> Self {
        self.unit_economics = Some(unit_economics);
        self
    }
}

/// Revenue scenarios generated around an option's revenue base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueScenarios {
    /// Seed that reproduces the draws.
    pub seed: u64,
    /// Confidence level of `revenue_at_risk`.
    pub confidence_level: f64,
    /// Revenue exceeded with probability `confidence_level`.
    pub revenue_at_risk: f64,
    /// Distribution summary of the draws.
    pub summary: MonteCarloResult,
}

/// Evaluation of a single [`DecisionOption`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionReport {
    /// Name of the evaluated option.
    pub option_name: String,
    /// NPV, IRR, payback and profitability index.
    pub cash_flow: CashFlowAnalysis,
    /// ROI, when a final value is given.
    pub roi: Option<f64>,
    /// Break-even economics, when unit economics are given.
    pub break_even: Option<BreakEvenAnalysis>,
    /// Units above break-even at the expected volume.
    pub margin_of_safety: Option<f64>,
    /// Degree of operating leverage at the expected volume.
    pub operating_leverage: Option<f64>,
    /// Revenue scenarios, when a revenue base is given.
    pub revenue_scenarios: Option<RevenueScenarios>,
}

impl OptionReport {
    /// Net present value at the configured discount rate.
    pub fn npv(&self) -> f64 {
        self.cash_flow.npv
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ToolkitError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Evaluates decision options under one [`ToolkitConfig`].
#[derive(Debug, Clone)]
pub struct OptionEvaluator {
    config: ToolkitConfig,
}

impl OptionEvaluator {
    /// Creates an evaluator after validating `config`.
    pub fn new(config: ToolkitConfig) -> Result<Self, ToolkitError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    /// Evaluates one option. `index` offsets the configured seed so options
    /// in a batch draw independent revenue scenarios.
    ///
    /// # Errors
    ///
    /// [`ToolkitError::Analysis`] when the option's inputs are rejected: a
    /// blank name, empty cash flows, a non-negative initial flow combined with
    /// a final value, or unit economics without a positive contribution
    /// margin.
    pub fn evaluate(&self, option: &DecisionOption, index: usize) -> Result<OptionReport, ToolkitError> {
        let fail = |e: AnalysisError| ToolkitError::analysis(&option.name, e);

        if option.name.trim().is_empty() {
            return Err(fail(AnalysisError::invalid("Option name cannot be blank")));
        }

        let irr_solver = self.config.irr_solver()?;
        let cash_flow =
            perform_cash_flow_analysis_with(&option.cash_flows, self.config.discount_rate, &irr_solver)
                .map_err(fail)?;
        if cash_flow.irr.is_none() && option.cash_flows.len() >= 2 {
            warn!(option = %option.name, "IRR undefined or did not converge");
        }

        let roi = match option.final_value {
            Some(final_value) => {
                let initial_investment = -option.cash_flows.first().copied().unwrap_or(0.0);
                Some(roi(initial_investment, final_value, option.holding_years).map_err(fail)?)
            }
            None => None,
        };

        let break_even = match &option.unit_economics {
            Some(unit) => Some(
                break_even_analysis(unit.fixed_costs, unit.price_per_unit, unit.variable_cost_per_unit)
                    .map_err(fail)?,
            ),
            None => None,
        };
        let expected_units = option.unit_economics.and_then(|unit| unit.expected_units);
        let (margin_of_safety, operating_leverage) = match (&break_even, expected_units) {
            (Some(analysis), Some(units)) => (
                Some(analysis.margin_of_safety(units)),
                analysis.operating_leverage(units),
            ),
            _ => (None, None),
        };

        let revenue_scenarios = match option.revenue_base {
            Some(base) => Some(self.revenue_scenarios(base, index).map_err(fail)?),
            None => None,
        };

        debug!(option = %option.name, npv = cash_flow.npv, "Option evaluated");

        Ok(OptionReport {
            option_name: option.name.clone(),
            cash_flow,
            roi,
            break_even,
            margin_of_safety,
            operating_leverage,
            revenue_scenarios,
        })
    }

    /// Evaluates every option in parallel. Results keep the input order.
    pub fn evaluate_all(&self, options: &[DecisionOption]) -> Vec<Result<OptionReport, ToolkitError>> {
        info!(options = options.len(), "Evaluating decision options");

        options
            .par_iter()
            .enumerate()
            .map(|(index, option)| self.evaluate(option, index))
            .collect()
    }

    fn revenue_scenarios(&self, base: f64, index: usize) -> Result<RevenueScenarios, AnalysisError> {
        let seed = self
            .config
            .random_seed
            .map(|seed| seed.wrapping_add(index as u64));
        let mut rng = ScenarioRng::from_optional_seed(seed);

        let draws = generate_scenarios_with(
            base,
            self.config.scenario_volatility,
            self.config.monte_carlo_iterations,
            &mut rng,
        )?;
        let summary = MonteCarloResult::from_samples("revenue", &draws)?;
        let revenue_at_risk = stats::percentile(&draws, (1.0 - self.config.confidence_level) * 100.0)
            .ok_or_else(|| AnalysisError::invalid("No revenue scenarios generated"))?;

        Ok(RevenueScenarios {
            seed: rng.seed(),
            confidence_level: self.config.confidence_level,
            revenue_at_risk,
            summary,
        })
    }
}

/// Successful reports ordered by descending NPV. Ties keep input order.
pub fn rank_by_npv(results: &[Result<OptionReport, ToolkitError>]) -> Vec<&OptionReport> {
    let mut ranked: Vec<&OptionReport> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    ranked.sort_by(|a, b| b.npv().total_cmp(&a.npv()));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use stratsim_core::finance::npv;

    fn seeded_config() -> ToolkitConfig {
        ToolkitConfig {
            random_seed: Some(42),
            monte_carlo_iterations: 2_000,
            ..Default::default()
        }
    }

    fn evaluator() -> OptionEvaluator {
        OptionEvaluator::new(seeded_config()).unwrap()
    }

    fn expansion() -> DecisionOption {
        DecisionOption::new("expand", vec![-100_000.0, 30_000.0, 35_000.0, 40_000.0, 45_000.0])
    }

    #[test]
    fn test_cash_flow_metrics_use_configured_rate() {
        let report = evaluator().evaluate(&expansion(), 0).unwrap();
        let expected = npv(&expansion().cash_flows, 0.10).unwrap();

        assert_relative_eq!(report.npv(), expected, epsilon = 1e-9);
        assert_eq!(report.option_name, "expand");
        assert!(report.cash_flow.irr.unwrap() > 0.10);
        assert!(report.roi.is_none());
        assert!(report.break_even.is_none());
        assert!(report.revenue_scenarios.is_none());
    }

    #[test]
    fn test_optional_analyses() {
        let option = expansion()
            .with_final_value(150_000.0, Some(4))
            .with_unit_economics(UnitEconomics {
                fixed_costs: 10_000.0,
                price_per_unit: 50.0,
                variable_cost_per_unit: 30.0,
                expected_units: Some(800.0),
            })
            .with_revenue_base(200_000.0);
        let report = evaluator().evaluate(&option, 0).unwrap();

        assert_relative_eq!(report.roi.unwrap(), 1.5f64.powf(0.25) - 1.0, epsilon = 1e-12);
        assert_eq!(report.break_even.as_ref().unwrap().break_even_units, 500.0);
        assert_eq!(report.margin_of_safety, Some(300.0));
        // contribution 16000 over operating income 6000
        assert_relative_eq!(report.operating_leverage.unwrap(), 16_000.0 / 6_000.0, epsilon = 1e-12);

        let revenue = report.revenue_scenarios.unwrap();
        assert_eq!(revenue.seed, 42);
        assert_eq!(revenue.summary.iterations, 2_000);
        assert!(revenue.revenue_at_risk < revenue.summary.mean);
        assert!((revenue.summary.mean - 200_000.0).abs() < 5_000.0);
    }

    #[test]
    fn test_revenue_scenarios_reproducible_and_offset() {
        let option = expansion().with_revenue_base(1_000.0);
        let eval = evaluator();

        let first = eval.evaluate(&option, 3).unwrap();
        let again = eval.evaluate(&option, 3).unwrap();
        let other = eval.evaluate(&option, 4).unwrap();

        assert_eq!(first.revenue_scenarios, again.revenue_scenarios);
        assert_eq!(first.revenue_scenarios.as_ref().unwrap().seed, 45);
        assert_ne!(
            first.revenue_scenarios.unwrap().summary.mean,
            other.revenue_scenarios.unwrap().summary.mean
        );
    }

    #[test]
    fn test_invalid_options() {
        let eval = evaluator();

        let blank = DecisionOption::new("  ", vec![-1.0, 2.0]);
        assert!(eval.evaluate(&blank, 0).unwrap_err().is_invalid_input());

        let empty = DecisionOption::new("empty", vec![]);
        assert!(eval.evaluate(&empty, 0).unwrap_err().is_invalid_input());

        let no_margin = expansion().with_unit_economics(UnitEconomics {
            fixed_costs: 1.0,
            price_per_unit: 10.0,
            variable_cost_per_unit: 10.0,
            expected_units: None,
        });
        let err = eval.evaluate(&no_margin, 0).unwrap_err();
        assert!(err.to_string().contains("expand"));
    }

    #[test]
    fn test_evaluator_rejects_invalid_config() {
        let config = ToolkitConfig {
            confidence_level: 2.0,
            ..Default::default()
        };
        assert!(matches!(OptionEvaluator::new(config), Err(ToolkitError::Config(_))));
    }

    #[test]
    fn test_evaluate_all_matches_sequential() {
        let options: Vec<DecisionOption> = (0..8)
            .map(|i| {
                DecisionOption::new(format!("option-{}", i), vec![-1_000.0, 400.0 + 50.0 * i as f64, 700.0])
                    .with_revenue_base(5_000.0)
            })
            .collect();
        let eval = evaluator();

        let parallel = eval.evaluate_all(&options);
        for (index, (result, option)) in parallel.iter().zip(&options).enumerate() {
            let sequential = eval.evaluate(option, index).unwrap();
            assert_eq!(result.as_ref().unwrap(), &sequential);
        }
    }

    #[test]
    fn test_rank_by_npv_skips_failures() {
        let options = vec![
            DecisionOption::new("low", vec![-1_000.0, 1_050.0]),
            DecisionOption::new("", vec![-1_000.0, 5_000.0]),
            DecisionOption::new("high", vec![-1_000.0, 2_000.0]),
            DecisionOption::new("mid", vec![-1_000.0, 1_500.0]),
        ];
        let results = evaluator().evaluate_all(&options);
        let ranked: Vec<&str> = rank_by_npv(&results)
            .iter()
            .map(|r| r.option_name.as_str())
            .collect();

        assert_eq!(ranked, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_report_json() {
        let report = evaluator()
            .evaluate(&expansion().with_final_value(120_000.0, None), 0)
            .unwrap();
        let json = report.to_json().unwrap();

        assert!(json.contains("\"option_name\": \"expand\""));
        assert!(json.contains("\"npv\""));
        let back: OptionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.option_name, report.option_name);
        assert_relative_eq!(back.roi.unwrap(), report.roi.unwrap(), epsilon = 1e-12);
        assert_relative_eq!(back.npv(), report.npv(), epsilon = 1e-6);
    }
}
