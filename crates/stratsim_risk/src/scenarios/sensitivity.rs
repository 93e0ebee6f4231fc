//! One-at-a-time sensitivity sweeps and tornado ranking.

use std::collections::BTreeMap;

use rayon::prelude::*;
use stratsim_core::AnalysisError;

/// Relative shock applied each way for tornado impacts.
pub const TORNADO_SHOCK: f64 = 0.10;

/// Number of variables reported as most sensitive.
pub const TOP_SENSITIVE: usize = 5;

/// Sweep of one input across its range, other inputs held at base.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableSweep {
    /// Variable name.
    pub variable: String,
    /// Evenly spaced input values.
    pub input_values: Vec<f64>,
    /// Objective value at each input.
    pub output_values: Vec<f64>,
    /// Max minus min of `output_values`.
    pub range: f64,
}

/// Tornado chart entry: half the output swing between a -10% and +10%
/// shock to one input.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TornadoBar {
    /// Variable name.
    pub variable: String,
    /// `(f(1.1·x) - f(0.9·x)) / 2`.
    pub impact: f64,
}

/// Result of [`calculate_sensitivity`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TornadoSensitivity {
    /// Objective at the base inputs.
    pub base_case_value: f64,
    /// Per-variable sweeps, in variable-name order.
    pub sweeps: Vec<VariableSweep>,
    /// Tornado bars sorted by descending `|impact|`.
    pub tornado: Vec<TornadoBar>,
    /// Up to five variables with the largest `|impact|`.
    pub most_sensitive_variables: Vec<String>,
    /// `(ΔY / Y_base) / 0.2` per variable, where defined.
    pub elasticities: BTreeMap<String, f64>,
}

impl TornadoSensitivity {
    /// Variable with the largest absolute tornado impact.
    pub fn highest_sensitivity_variable(&self) -> Option<&str> {
        self.tornado.first().map(|bar| bar.variable.as_str())
    }
}

/// Sweeps each variable in `ranges` and ranks them by tornado impact.
///
/// For each variable, `num_points` evenly spaced values from `min` to `max`
/// (inclusive) are evaluated with every other input at its base value.
/// Variables whose base value is zero get a sweep but no tornado bar or
/// elasticity; elasticities are skipped when the base objective is zero.
/// Variables are evaluated in parallel; the output order is deterministic.
///
/// # Errors
///
/// `InvalidInput` if `num_points == 0` or a variable in `ranges` is missing
/// from `base_inputs`.
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeMap;
/// use stratsim_risk::scenarios::calculate_sensitivity;
///
/// let base = BTreeMap::from([("price".to_string(), 10.0), ("volume".to_string(), 100.0)]);
/// let ranges = BTreeMap::from([
///     ("price".to_string(), (5.0, 15.0)),
///     ("volume".to_string(), (90.0, 110.0)),
/// ]);
/// let result = calculate_sensitivity(
///     &base,
///     &ranges,
///     |x: &BTreeMap<String, f64>| x["price"] * x["volume"] - 500.0,
///     5,
/// )
/// .unwrap();
///
/// assert_eq!(result.base_case_value, 500.0);
/// assert_eq!(result.sweeps[0].input_values, vec![5.0, 7.5, 10.0, 12.5, 15.0]);
/// ```
pub fn calculate_sensitivity<F>(
    base_inputs: &BTreeMap<String, f64>,
    ranges: &BTreeMap<String, (f64, f64)>,
    objective: F,
    num_points: usize,
) -> Result<TornadoSensitivity, AnalysisError>
where
    F: Fn(&BTreeMap<String, f64>) -> f64 + Sync,
{
    if num_points == 0 {
        return Err(AnalysisError::invalid("num_points must be at least 1"));
    }
    if let Some(missing) = ranges.keys().find(|k| !base_inputs.contains_key(*k)) {
        return Err(AnalysisError::invalid(format!(
            "Variable '{}' has a range but no base value",
            missing
        )));
    }

    let base_case_value = objective(base_inputs);

    let per_variable: Vec<(VariableSweep, Option<TornadoBar>, Option<f64>)> = ranges
        .par_iter()
        .map(|(name, &(min, max))| {
            let with_value = |value: f64| {
                let mut inputs = base_inputs.clone();
                inputs.insert(name.clone(), value);
                objective(&inputs)
            };

            let input_values = linspace(min, max, num_points);
            let output_values: Vec<f64> = input_values.iter().map(|v| with_value(*v)).collect();
            let range = spread(&output_values);
            let sweep = VariableSweep {
                variable: name.clone(),
                input_values,
                output_values,
                range,
            };

            let base_value = base_inputs[name.as_str()];
            if base_value == 0.0 {
                return (sweep, None, None);
            }
            let high = with_value(base_value * (1.0 + TORNADO_SHOCK));
            let low = with_value(base_value * (1.0 - TORNADO_SHOCK));
            let bar = TornadoBar {
                variable: name.clone(),
                impact: (high - low) / 2.0,
            };
            let elasticity = (base_case_value != 0.0)
                .then(|| ((high - low) / base_case_value) / (2.0 * TORNADO_SHOCK));
            (sweep, Some(bar), elasticity)
        })
        .collect();

    let mut sweeps = Vec::with_capacity(per_variable.len());
    let mut tornado = Vec::new();
    let mut elasticities = BTreeMap::new();
    for (sweep, bar, elasticity) in per_variable {
        if let Some(e) = elasticity {
            elasticities.insert(sweep.variable.clone(), e);
        }
        sweeps.push(sweep);
        tornado.extend(bar);
    }
    tornado.sort_by(|a, b| b.impact.abs().total_cmp(&a.impact.abs()));
    let most_sensitive_variables = tornado
        .iter()
        .take(TOP_SENSITIVE)
        .map(|bar| bar.variable.clone())
        .collect();

    Ok(TornadoSensitivity {
        base_case_value,
        sweeps,
        tornado,
        most_sensitive_variables,
        elasticities,
    })
}

fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    if num == 1 {
        return vec![start];
    }
    let step = (end - start) / (num - 1) as f64;
    (0..num)
        .map(|i| if i == num - 1 { end } else { start + step * i as f64 })
        .collect()
}

fn spread(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    max - min
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn inputs(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn profit(x: &BTreeMap<String, f64>) -> f64 {
        x["price"] * x["volume"] - x["cost"]
    }

    #[test]
    fn test_tornado_ranking() {
        let base = inputs(&[("price", 10.0), ("volume", 100.0), ("cost", 200.0)]);
        let ranges: BTreeMap<String, (f64, f64)> = [
            ("price".to_string(), (8.0, 12.0)),
            ("volume".to_string(), (50.0, 150.0)),
            ("cost".to_string(), (100.0, 300.0)),
        ]
        .into();
        let result = calculate_sensitivity(&base, &ranges, profit, 10).unwrap();

        assert_eq!(result.base_case_value, 800.0);
        assert_eq!(result.tornado.len(), 3);
        // price and volume each swing revenue by ±100; cost by ∓20
        assert_relative_eq!(result.tornado[0].impact.abs(), 100.0, epsilon = 1e-9);
        assert_eq!(result.tornado[2].variable, "cost");
        assert_relative_eq!(result.tornado[2].impact, -20.0, epsilon = 1e-9);
        assert_eq!(result.most_sensitive_variables.len(), 3);
        assert_relative_eq!(result.elasticities["price"], 200.0 / 800.0 / 0.2, epsilon = 1e-9);
    }

    #[test]
    fn test_sweeps_in_name_order() {
        let base = inputs(&[("price", 10.0), ("volume", 100.0), ("cost", 200.0)]);
        let ranges: BTreeMap<String, (f64, f64)> = [
            ("volume".to_string(), (50.0, 150.0)),
            ("cost".to_string(), (100.0, 300.0)),
        ]
        .into();
        let result = calculate_sensitivity(&base, &ranges, profit, 3).unwrap();
        assert_eq!(result.sweeps[0].variable, "cost");
        assert_eq!(result.sweeps[0].input_values, vec![100.0, 200.0, 300.0]);
        assert_eq!(result.sweeps[0].range, 200.0);
        assert_eq!(result.sweeps[1].variable, "volume");
    }

    #[test]
    fn test_zero_base_value_skips_tornado() {
        let base = inputs(&[("price", 10.0), ("volume", 100.0), ("cost", 0.0)]);
        let ranges: BTreeMap<String, (f64, f64)> = [("cost".to_string(), (0.0, 50.0))].into();
        let result = calculate_sensitivity(&base, &ranges, profit, 2).unwrap();
        assert_eq!(result.sweeps.len(), 1);
        assert!(result.tornado.is_empty());
        assert!(result.elasticities.is_empty());
        assert_eq!(result.highest_sensitivity_variable(), None);
    }

    #[test]
    fn test_top_five_limit() {
        let base: BTreeMap<String, f64> = (1..=7).map(|i| (format!("v{}", i), i as f64)).collect();
        let ranges: BTreeMap<String, (f64, f64)> =
            base.keys().map(|k| (k.clone(), (0.0, 10.0))).collect();
        let result = calculate_sensitivity(&base, &ranges, |x| x.values().sum::<f64>(), 2).unwrap();
        assert_eq!(result.most_sensitive_variables.len(), TOP_SENSITIVE);
        assert_eq!(result.highest_sensitivity_variable(), Some("v7"));
    }

    #[test]
    fn test_invalid_inputs() {
        let base = inputs(&[("price", 10.0)]);
        let ranges: BTreeMap<String, (f64, f64)> = [("missing".to_string(), (0.0, 1.0))].into();
        assert!(calculate_sensitivity(&base, &ranges, |_| 0.0, 3).is_err());
        assert!(calculate_sensitivity(&base, &BTreeMap::new(), |_| 0.0, 0).is_err());
    }

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 1.0, 1), vec![0.0]);
        assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
    }
}
