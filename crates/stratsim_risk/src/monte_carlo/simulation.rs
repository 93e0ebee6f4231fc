//! Monte Carlo driver.

use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;
use stratsim_core::AnalysisError;
use tracing::{debug, info};

use super::config::MonteCarloConfig;
use super::result::MonteCarloResult;
use crate::distribution::{DistributionSampler, RiskVariable};
use crate::rng::ScenarioRng;

/// Iterations per independently seeded chunk.
const CHUNK_SIZE: usize = 4_096;

/// Runs a Monte Carlo simulation over `variables`.
///
/// Each iteration draws one value per variable, passes the draws keyed by
/// variable name to `objective`, and records the returned outcome. The
/// outcomes are summarised with [`MonteCarloResult::from_samples`] under the
/// name `"objective_value"`.
///
/// # Errors
///
/// - `InvalidInput` if `variables` is empty, contains duplicate names, or
///   any distribution is invalid
/// - `InvalidInput` if `config` fails validation
/// - `Arithmetic` if `objective` returns a non-finite value
pub fn run_simulation<F>(
    variables: &[RiskVariable],
    objective: F,
    config: &MonteCarloConfig,
) -> Result<MonteCarloResult, AnalysisError>
where
    F: Fn(&BTreeMap<String, f64>) -> f64 + Sync,
{
    config.validate()?;
    if variables.is_empty() {
        return Err(AnalysisError::invalid(
            "At least one risk variable is required",
        ));
    }

    let mut seen = BTreeSet::new();
    let mut samplers: Vec<(&str, DistributionSampler)> = Vec::with_capacity(variables.len());
    for var in variables {
        if !seen.insert(var.name.as_str()) {
            return Err(AnalysisError::invalid(format!(
                "Duplicate risk variable name: {}",
                var.name
            )));
        }
        samplers.push((var.name.as_str(), var.distribution.sampler()?));
    }

    let iterations = config.iterations();
    let mut master = ScenarioRng::from_optional_seed(config.seed());
    info!(
        iterations,
        variables = variables.len(),
        seed = master.seed(),
        "Starting Monte Carlo simulation"
    );

    let chunks: Vec<(usize, ScenarioRng)> = (0..iterations)
        .step_by(CHUNK_SIZE)
        .map(|start| (CHUNK_SIZE.min(iterations - start), master.fork()))
        .collect();

    let outcomes: Vec<f64> = chunks
        .into_par_iter()
        .flat_map_iter(|(len, mut rng)| {
            let mut inputs: BTreeMap<String, f64> = samplers
                .iter()
                .map(|(name, _)| ((*name).to_string(), 0.0))
                .collect();
            let mut out = Vec::with_capacity(len);
            for _ in 0..len {
                for (name, sampler) in &samplers {
                    if let Some(slot) = inputs.get_mut(*name) {
                        *slot = sampler.draw(&mut rng);
                    }
                }
                out.push(objective(&inputs));
            }
            out
        })
        .collect();

    let result = MonteCarloResult::from_samples("objective_value", &outcomes)?;
    debug!(
        mean = result.mean,
        std_dev = result.std_dev,
        var_95 = result.var_95,
        probability_negative = result.probability_negative,
        "Monte Carlo simulation complete"
    );
    Ok(result)
}
