//! Comprehensive risk assessment combining simulation, scenarios,
//! sensitivity and historical metrics.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use stratsim_core::AnalysisError;
use tracing::info;

use crate::distribution::RiskVariable;
use crate::metrics::{calculate_risk_metrics, RiskMetric};
use crate::monte_carlo::{run_simulation, MonteCarloConfig, MonteCarloResult};
use crate::scenarios::{
    calculate_sensitivity, perform_scenario_analysis, ScenarioAnalysis, ScenarioDefinition,
    ScenarioType, TornadoSensitivity,
};

/// Confidence level reported on assessments and used for historical metrics.
pub const ASSESSMENT_CONFIDENCE: f64 = 0.95;

/// Points per variable in the assessment's sensitivity sweep.
const SENSITIVITY_POINTS: usize = 10;

/// Probability of loss above which a risk-reduction recommendation is added.
const HIGH_LOSS_PROBABILITY: f64 = 0.2;

/// Overall score above which a conservative approach is recommended.
const HIGH_RISK_SCORE: f64 = 0.7;

const BASE_RECOMMENDATIONS: [&str; 5] = [
    "Monitor key risk variables closely",
    "Develop contingency plans for worst-case scenarios",
    "Consider risk mitigation strategies",
    "Implement early warning systems",
    "Regular risk assessment updates",
];

/// Inputs to [`assess_risk`].
#[derive(Debug, Clone, PartialEq)]
pub struct RiskAssessmentRequest {
    /// Decision being assessed.
    pub decision_context: String,
    /// Uncertain inputs for the Monte Carlo simulation.
    pub risk_variables: Vec<RiskVariable>,
    /// Base-case values of the objective's inputs.
    pub base_case_inputs: BTreeMap<String, f64>,
    /// What-if scenarios.
    pub scenario_definitions: Vec<ScenarioDefinition>,
    /// Historical observations; metrics are skipped when absent or empty.
    pub historical_data: Option<Vec<f64>>,
    /// Simulation settings.
    pub monte_carlo: MonteCarloConfig,
}

/// Result of [`assess_risk`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskAssessment {
    /// `risk_assessment_YYYYmmdd_HHMMSS` (UTC).
    pub assessment_id: String,
    /// Decision being assessed.
    pub decision_context: String,
    /// Variables that were simulated.
    pub risk_variables: Vec<RiskVariable>,
    /// Simulation summaries.
    pub monte_carlo_results: Vec<MonteCarloResult>,
    /// Evaluated scenarios.
    pub scenario_analyses: Vec<ScenarioAnalysis>,
    /// Sensitivity of the objective to each simulated input.
    pub sensitivity_analysis: TornadoSensitivity,
    /// Historical risk metrics.
    pub risk_metrics: Vec<RiskMetric>,
    /// Aggregate score in `[0, 1]`; higher is riskier.
    pub overall_risk_score: f64,
    /// Confidence level of the analysis.
    pub confidence_level: f64,
    /// Risk-management recommendations.
    pub recommendations: Vec<String>,
    /// When the assessment was produced.
    pub assessment_date: DateTime<Utc>,
}

/// Runs a comprehensive risk assessment.
///
/// 1. Monte Carlo simulation of `objective` over the risk variables.
/// 2. Scenario analysis with outcome `{"outcome": objective(assumptions)}`.
/// 3. Sensitivity sweep for each risk variable present in the base case,
///    over its distribution bounds or `[0.5·base, 1.5·base]`.
/// 4. Historical metrics, when data is supplied.
///
/// The overall score is the mean of the probability of a negative outcome,
/// `|VaR95| / |mean|` (0 for a zero mean) and the share of worst-case
/// scenarios, capped to `[0, 1]`.
///
/// # Errors
///
/// Propagates errors from each stage.
pub fn assess_risk<F>(
    request: &RiskAssessmentRequest,
    objective: F,
) -> Result<RiskAssessment, AnalysisError>
where
    F: Fn(&BTreeMap<String, f64>) -> f64 + Sync,
{
    let monte_carlo = run_simulation(&request.risk_variables, &objective, &request.monte_carlo)?;

    let scenario_analyses = perform_scenario_analysis(
        &request.base_case_inputs,
        &request.scenario_definitions,
        |assumptions| BTreeMap::from([("outcome".to_string(), objective(assumptions))]),
    )?;

    let ranges: BTreeMap<String, (f64, f64)> = request
        .risk_variables
        .iter()
        .filter_map(|var| {
            let base = *request.base_case_inputs.get(&var.name)?;
            let range = var
                .distribution
                .bounds()
                .unwrap_or((base * 0.5, base * 1.5));
            Some((var.name.clone(), range))
        })
        .collect();
    let sensitivity_analysis = calculate_sensitivity(
        &request.base_case_inputs,
        &ranges,
        &objective,
        SENSITIVITY_POINTS,
    )?;

    let risk_metrics = match request.historical_data.as_deref() {
        Some(data) if !data.is_empty() => calculate_risk_metrics(data, ASSESSMENT_CONFIDENCE)?,
        _ => Vec::new(),
    };

    let overall_risk_score = overall_risk_score(&monte_carlo, &scenario_analyses);
    let recommendations = recommendations(&monte_carlo, overall_risk_score);

    let assessment_date = Utc::now();
    let assessment_id = format!(
        "risk_assessment_{}",
        assessment_date.format("%Y%m%d_%H%M%S")
    );
    info!(
        %assessment_id,
        overall_risk_score,
        scenarios = scenario_analyses.len(),
        "Risk assessment complete"
    );

    Ok(RiskAssessment {
        assessment_id,
        decision_context: request.decision_context.clone(),
        risk_variables: request.risk_variables.clone(),
        monte_carlo_results: vec![monte_carlo],
        scenario_analyses,
        sensitivity_analysis,
        risk_metrics,
        overall_risk_score,
        confidence_level: ASSESSMENT_CONFIDENCE,
        recommendations,
        assessment_date,
    })
}

fn overall_risk_score(monte_carlo: &MonteCarloResult, scenarios: &[ScenarioAnalysis]) -> f64 {
    let tail_ratio = if monte_carlo.mean != 0.0 {
        monte_carlo.var_95.abs() / monte_carlo.mean.abs()
    } else {
        0.0
    };
    let worst_share = if scenarios.is_empty() {
        0.0
    } else {
        let worst = scenarios
            .iter()
            .filter(|s| s.scenario_type == ScenarioType::WorstCase)
            .count();
        worst as f64 / scenarios.len() as f64
    };
    let factors = [monte_carlo.probability_negative, tail_ratio, worst_share];
    (factors.iter().sum::<f64>() / factors.len() as f64).clamp(0.0, 1.0)
}

fn recommendations(monte_carlo: &MonteCarloResult, score: f64) -> Vec<String> {
    let mut out: Vec<String> = BASE_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect();
    if monte_carlo.probability_negative > HIGH_LOSS_PROBABILITY {
        out.push(
            "High probability of negative outcomes - consider risk reduction measures".to_string(),
        );
    }
    if score > HIGH_RISK_SCORE {
        out.push("High overall risk score - recommend conservative approach".to_string());
    }
    out
}
