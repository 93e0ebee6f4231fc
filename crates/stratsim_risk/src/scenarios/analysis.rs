//! What-if scenario analysis over a set of named assumptions.

use std::collections::BTreeMap;

use stratsim_core::AnalysisError;

/// Scenario category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ScenarioType {
    /// Optimistic case.
    BestCase,
    /// Expected case.
    #[default]
    BaseCase,
    /// Pessimistic case.
    WorstCase,
    /// Deliberately severe stress.
    StressTest,
    /// Rare, high-impact event.
    BlackSwan,
}

/// Default probability assigned to a scenario definition.
pub const DEFAULT_SCENARIO_PROBABILITY: f64 = 0.5;

/// A scenario to evaluate: overrides applied on top of the base case.
///
/// # Examples
///
/// ```rust
/// use stratsim_risk::scenarios::{ScenarioDefinition, ScenarioType};
///
/// let recession = ScenarioDefinition::new("Recession", ScenarioType::WorstCase)
///     .with_assumption("growth", -0.05)
///     .with_probability(0.2)
///     .with_risk_factor("demand_shock");
/// assert_eq!(recession.assumptions["growth"], -0.05);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioDefinition {
    /// Scenario name; surrounding whitespace is trimmed on analysis.
    pub name: String,
    /// Scenario category.
    pub scenario_type: ScenarioType,
    /// Assumptions overriding the base case.
    pub assumptions: BTreeMap<String, f64>,
    /// Scenario probability in `[0, 1]`.
    pub probability: f64,
    /// Narrative impact assessment.
    pub impact_assessment: Option<String>,
    /// Key risk factors.
    pub risk_factors: Vec<String>,
    /// Mitigation strategies.
    pub mitigation_strategies: Vec<String>,
}

impl ScenarioDefinition {
    /// Creates a definition with no overrides and the default probability.
    pub fn new(name: impl Into<String>, scenario_type: ScenarioType) -> Self {
        Self {
            name: name.into(),
            scenario_type,
            assumptions: BTreeMap::new(),
            probability: DEFAULT_SCENARIO_PROBABILITY,
            impact_assessment: None,
            risk_factors: Vec::new(),
            mitigation_strategies: Vec::new(),
        }
    }

    /// Adds one assumption override.
    pub fn with_assumption(mut self, key: impl Into<String>, value: f64) -> Self {
        self.assumptions.insert(key.into(), value);
        self
    }

    /// Sets the scenario probability.
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    /// Sets the impact assessment.
    pub fn with_impact_assessment(mut self, text: impl Into<String>) -> Self {
        self.impact_assessment = Some(text.into());
        self
    }

    /// Adds a risk factor.
    pub fn with_risk_factor(mut self, factor: impl Into<String>) -> Self {
        self.risk_factors.push(factor.into());
        self
    }

    /// Adds a mitigation strategy.
    pub fn with_mitigation(mut self, strategy: impl Into<String>) -> Self {
        self.mitigation_strategies.push(strategy.into());
        self
    }
}

/// An evaluated scenario.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioAnalysis {
    /// Trimmed scenario name.
    pub scenario_name: String,
    /// Scenario category.
    pub scenario_type: ScenarioType,
    /// Full assumption set used (base case merged with overrides).
    pub assumptions: BTreeMap<String, f64>,
    /// Outcome metrics.
    pub outcomes: BTreeMap<String, f64>,
    /// Scenario probability.
    pub probability: f64,
    /// Narrative impact assessment.
    pub impact_assessment: String,
    /// Key risk factors.
    pub risk_factors: Vec<String>,
    /// Mitigation strategies.
    pub mitigation_strategies: Vec<String>,
}

/// Evaluates each scenario definition against the base case.
///
/// For each definition the overrides are merged over `base_assumptions` and
/// `outcome_fn` is called on the merged set. Results keep definition order.
///
/// # Errors
///
/// `InvalidInput` for a blank scenario name or a probability outside
/// `[0, 1]`. All definitions are checked before any outcome is computed.
pub fn perform_scenario_analysis<F>(
    base_assumptions: &BTreeMap<String, f64>,
    definitions: &[ScenarioDefinition],
    outcome_fn: F,
) -> Result<Vec<ScenarioAnalysis>, AnalysisError>
where
    F: Fn(&BTreeMap<String, f64>) -> BTreeMap<String, f64>,
{
    for def in definitions {
        validate_definition(def)?;
    }

    Ok(definitions
        .iter()
        .map(|def| {
            let mut assumptions = base_assumptions.clone();
            assumptions.extend(def.assumptions.iter().map(|(k, v)| (k.clone(), *v)));
            let outcomes = outcome_fn(&assumptions);

            ScenarioAnalysis {
                scenario_name: def.name.trim().to_string(),
                scenario_type: def.scenario_type,
                assumptions,
                outcomes,
                probability: def.probability,
                impact_assessment: def
                    .impact_assessment
                    .clone()
                    .unwrap_or_else(|| "Impact assessment not provided".to_string()),
                risk_factors: def.risk_factors.clone(),
                mitigation_strategies: def.mitigation_strategies.clone(),
            }
        })
        .collect())
}

fn validate_definition(def: &ScenarioDefinition) -> Result<(), AnalysisError> {
    if def.name.trim().is_empty() {
        return Err(AnalysisError::invalid("Scenario name cannot be empty"));
    }
    if !(0.0..=1.0).contains(&def.probability) {
        return Err(AnalysisError::invalid(format!(
            "Scenario '{}' probability must be between 0 and 1, got {}",
            def.name.trim(),
            def.probability
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> BTreeMap<String, f64> {
        BTreeMap::from([("price".to_string(), 10.0), ("volume".to_string(), 100.0)])
    }

    fn revenue(a: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
        BTreeMap::from([("revenue".to_string(), a["price"] * a["volume"])])
    }

    #[test]
    fn test_overrides_merge_over_base() {
        let defs = vec![
            ScenarioDefinition::new("Base", ScenarioType::BaseCase),
            ScenarioDefinition::new("  Price war ", ScenarioType::WorstCase)
                .with_assumption("price", 8.0)
                .with_probability(0.25),
        ];
        let results = perform_scenario_analysis(&base(), &defs, revenue).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].outcomes["revenue"], 1000.0);
        assert_eq!(results[0].probability, DEFAULT_SCENARIO_PROBABILITY);
        assert_eq!(results[0].impact_assessment, "Impact assessment not provided");

        assert_eq!(results[1].scenario_name, "Price war");
        assert_eq!(results[1].assumptions["price"], 8.0);
        assert_eq!(results[1].assumptions["volume"], 100.0);
        assert_eq!(results[1].outcomes["revenue"], 800.0);
        assert_eq!(results[1].scenario_type, ScenarioType::WorstCase);
    }

    #[test]
    fn test_new_assumption_keys_added() {
        let defs = vec![ScenarioDefinition::new("Tax", ScenarioType::StressTest)
            .with_assumption("tax", 0.3)];
        let results = perform_scenario_analysis(&base(), &defs, revenue).unwrap();
        assert_eq!(results[0].assumptions.len(), 3);
    }

    #[test]
    fn test_blank_name_rejected() {
        let defs = vec![ScenarioDefinition::new("   ", ScenarioType::BaseCase)];
        assert!(perform_scenario_analysis(&base(), &defs, revenue)
            .unwrap_err()
            .is_invalid_input());
    }

    #[test]
    fn test_probability_range() {
        for p in [-0.1, 1.1, f64::NAN] {
            let defs = vec![ScenarioDefinition::new("x", ScenarioType::BaseCase).with_probability(p)];
            assert!(perform_scenario_analysis(&base(), &defs, revenue).is_err());
        }
    }

    #[test]
    fn test_empty_definitions() {
        assert!(perform_scenario_analysis(&base(), &[], revenue)
            .unwrap()
            .is_empty());
    }
}
