//! Quantitative decision frameworks.
//!
//! - [`expected_value_tree`]: probability-weighted payoffs per option over
//!   best, base and worst cases
//! - [`weighted_option_scores`]: weighted criteria scoring
//!
//! Both recommend the option with the highest value. Ties go to the option
//! listed first.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use stratsim_core::AnalysisError;
use tracing::debug;

/// Tolerance on the sum of an option's outcome probabilities.
pub const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

/// Outcome branch of a decision-tree option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeCase {
    /// Favourable outcome.
    BestCase,
    /// Expected outcome.
    BaseCase,
    /// Adverse outcome.
    WorstCase,
}

/// One probability-weighted payoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeBranch {
    /// Which case the branch represents.
    pub case: OutcomeCase,
    /// Probability of the case, in `[0, 1]`.
    pub probability: f64,
    /// Payoff if the case occurs.
    pub payoff: f64,
}

/// An option and its outcome branches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeOption {
    /// Option name; non-blank and unique within a tree.
    pub name: String,
    /// Outcome branches; probabilities sum to 1.
    pub outcomes: Vec<OutcomeBranch>,
}

impl TreeOption {
    /// Creates an option without outcomes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcomes: Vec::new(),
        }
    }

    /// Adds an outcome branch.
    pub fn with_outcome(mut self, case: OutcomeCase, probability: f64, payoff: f64) -> Self {
        self.outcomes.push(OutcomeBranch {
            case,
            probability,
            payoff,
        });
        self
    }

    /// Best, base and worst cases with probability 1/3 each.
    pub fn equally_likely(name: impl Into<String>, best: f64, base: f64, worst: f64) -> Self {
        let p = 1.0 / 3.0;
        Self::new(name)
            .with_outcome(OutcomeCase::BestCase, p, best)
            .with_outcome(OutcomeCase::BaseCase, p, base)
            .with_outcome(OutcomeCase::WorstCase, p, worst)
    }
}

/// Expected value of one option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionNode {
    /// Option name.
    pub name: String,
    /// Outcome branches as given.
    pub outcomes: Vec<OutcomeBranch>,
    /// `Σ probability · payoff`.
    pub expected_value: f64,
}

/// Evaluated decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    /// Decision being taken.
    pub decision_context: String,
    /// One node per option, in input order.
    pub options: Vec<OptionNode>,
    /// Option with the highest expected value.
    pub recommended_option: String,
}

/// Computes the expected value of every option and recommends the highest.
///
/// # Errors
///
/// `InvalidInput` if `options` is empty, a name is blank or repeated, an
/// option has no outcomes or repeats a case, a probability lies outside
/// `[0, 1]`, an option's probabilities do not sum to 1, or a payoff is not
/// finite.
///
/// # Examples
///
/// ```
/// use stratsim_toolkit::frameworks::{expected_value_tree, OutcomeCase, TreeOption};
///
/// let options = vec![
///     TreeOption::new("expand")
///         .with_outcome(OutcomeCase::BestCase, 0.3, 200.0)
///         .with_outcome(OutcomeCase::BaseCase, 0.5, 80.0)
///         .with_outcome(OutcomeCase::WorstCase, 0.2, -100.0),
///     TreeOption::equally_likely("hold", 30.0, 20.0, 10.0),
/// ];
/// let tree = expected_value_tree("Capacity", &options).unwrap();
///
/// assert!((tree.options[0].expected_value - 80.0).abs() < 1e-9);
/// assert_eq!(tree.recommended_option, "expand");
/// ```
pub fn expected_value_tree(
    decision_context: &str,
    options: &[TreeOption],
) -> Result<DecisionTree, AnalysisError> {
    if options.is_empty() {
        return Err(AnalysisError::invalid("Decision tree requires at least one option"));
    }
    check_names(options.iter().map(|o| o.name.as_str()))?;

    let mut nodes = Vec::with_capacity(options.len());
    for option in options {
        if option.outcomes.is_empty() {
            return Err(AnalysisError::invalid(format!(
                "Option '{}' has no outcomes",
                option.name
            )));
        }

        let mut cases = BTreeSet::new();
        let mut total_probability = 0.0;
        let mut expected_value = 0.0;
        for branch in &option.outcomes {
            if !cases.insert(branch.case) {
                return Err(AnalysisError::invalid(format!(
                    "Option '{}' repeats the {:?} outcome",
                    option.name, branch.case
                )));
            }
            if !(0.0..=1.0).contains(&branch.probability) {
                return Err(AnalysisError::invalid(format!(
                    "Option '{}' has probability {} outside [0, 1]",
                    option.name, branch.probability
                )));
            }
            if !branch.payoff.is_finite() {
                return Err(AnalysisError::invalid(format!(
                    "Option '{}' has a non-finite payoff",
                    option.name
                )));
            }
            total_probability += branch.probability;
            expected_value += branch.probability * branch.payoff;
        }
        if (total_probability - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
            return Err(AnalysisError::invalid(format!(
                "Outcome probabilities of '{}' sum to {}, expected 1",
                option.name, total_probability
            )));
        }

        nodes.push(OptionNode {
            name: option.name.clone(),
            outcomes: option.outcomes.clone(),
            expected_value,
        });
    }

    let recommended_option = best_by(&nodes, |n| n.expected_value).name.clone();
    debug!(options = nodes.len(), recommended = %recommended_option, "Decision tree evaluated");

    Ok(DecisionTree {
        decision_context: decision_context.to_string(),
        options: nodes,
        recommended_option,
    })
}

/// An option with a score per criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredOption {
    /// Option name; non-blank and unique within an evaluation.
    pub name: String,
    /// Score per criterion.
    pub scores: BTreeMap<String, f64>,
}

impl ScoredOption {
    /// Creates an option without scores.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scores: BTreeMap::new(),
        }
    }

    /// Sets the score for `criterion`.
    pub fn with_score(mut self, criterion: impl Into<String>, score: f64) -> Self {
        self.scores.insert(criterion.into(), score);
        self
    }
}

/// Weighted score of one option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionScore {
    /// Option name.
    pub name: String,
    /// Scores of the weighted criteria.
    pub criteria_scores: BTreeMap<String, f64>,
    /// `Σ score · weight`.
    pub weighted_score: f64,
}

/// Result of [`weighted_option_scores`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategicEvaluation {
    /// Criterion weights used.
    pub criteria_weights: BTreeMap<String, f64>,
    /// One entry per option, in input order.
    pub options: Vec<OptionScore>,
    /// Option with the highest weighted score.
    pub recommended_option: String,
}

/// Scores every option as `Σ score · weight` over the weighted criteria and
/// recommends the highest.
///
/// Scores for criteria without a weight are ignored.
///
/// # Errors
///
/// `InvalidInput` if `options` or `criteria_weights` is empty, a name is
/// blank or repeated, a weight is negative or not finite, or an option lacks
/// a finite score for a weighted criterion.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use stratsim_toolkit::frameworks::{weighted_option_scores, ScoredOption};
///
/// let weights = BTreeMap::from([("fit".to_string(), 0.6), ("risk".to_string(), 0.4)]);
/// let options = vec![
///     ScoredOption::new("acquire").with_score("fit", 0.9).with_score("risk", 0.3),
///     ScoredOption::new("partner").with_score("fit", 0.6).with_score("risk", 0.8),
/// ];
/// let evaluation = weighted_option_scores(&options, &weights).unwrap();
///
/// assert!((evaluation.options[0].weighted_score - 0.66).abs() < 1e-12);
/// assert_eq!(evaluation.recommended_option, "partner");
/// ```
pub fn weighted_option_scores(
    options: &[ScoredOption],
    criteria_weights: &BTreeMap<String, f64>,
) -> Result<StrategicEvaluation, AnalysisError> {
    if options.is_empty() {
        return Err(AnalysisError::invalid("Evaluation requires at least one option"));
    }
    if criteria_weights.is_empty() {
        return Err(AnalysisError::invalid("Evaluation requires at least one criterion"));
    }
    if let Some((criterion, weight)) = criteria_weights
        .iter()
        .find(|(_, w)| !(**w >= 0.0) || !w.is_finite())
    {
        return Err(AnalysisError::invalid(format!(
            "Weight of '{}' must be finite and non-negative, got {}",
            criterion, weight
        )));
    }
    check_names(options.iter().map(|o| o.name.as_str()))?;

    let mut scored = Vec::with_capacity(options.len());
    for option in options {
        let mut criteria_scores = BTreeMap::new();
        let mut weighted_score = 0.0;
        for (criterion, weight) in criteria_weights {
            let score = option
                .scores
                .get(criterion)
                .copied()
                .filter(|s| s.is_finite())
                .ok_or_else(|| {
                    AnalysisError::invalid(format!(
                        "Option '{}' has no finite score for '{}'",
                        option.name, criterion
                    ))
                })?;
            criteria_scores.insert(criterion.clone(), score);
            weighted_score += score * weight;
        }
        scored.push(OptionScore {
            name: option.name.clone(),
            criteria_scores,
            weighted_score,
        });
    }

    let recommended_option = best_by(&scored, |s| s.weighted_score).name.clone();

    Ok(StrategicEvaluation {
        criteria_weights: criteria_weights.clone(),
        options: scored,
        recommended_option,
    })
}

fn check_names<'a>(names: impl Iterator<Item = &'a str>) -> Result<(), AnalysisError> {
    let mut seen = BTreeSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(AnalysisError::invalid("Option name cannot be blank"));
        }
        if !seen.insert(name) {
            return Err(AnalysisError::invalid(format!("Duplicate option name '{}'", name)));
        }
    }
    Ok(())
}

// First maximum wins; callers guarantee a non-empty slice.
fn best_by<T>(items: &[T], value: impl Fn(&T) -> f64) -> &T {
    let mut best = &items[0];
    for item in &items[1..] {
        if value(item) > value(best) {
            best = item;
        }
    }
    best
}
