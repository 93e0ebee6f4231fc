//! Monte Carlo scenario draws around a base value.

use stratsim_core::AnalysisError;
use tracing::debug;

use crate::rng::ScenarioRng;

/// Draws `iterations` scenarios around `base_value` from OS entropy.
///
/// Repeated calls return different samples. See
/// [`generate_scenarios_with`] for the distribution.
///
/// # Errors
///
/// Same contract as [`generate_scenarios_with`].
pub fn generate_scenarios(
    base_value: f64,
    volatility: f64,
    iterations: usize,
) -> Result<Vec<f64>, AnalysisError> {
    generate_scenarios_with(
        base_value,
        volatility,
        iterations,
        &mut ScenarioRng::from_entropy(),
    )
}

/// Draws `iterations` scenarios from a fixed seed.
///
/// The same seed always produces the same sequence.
///
/// # Examples
///
/// ```rust
/// use stratsim_risk::scenarios::generate_scenarios_seeded;
///
/// let a = generate_scenarios_seeded(100_000.0, 0.2, 1000, 42).unwrap();
/// let b = generate_scenarios_seeded(100_000.0, 0.2, 1000, 42).unwrap();
/// assert_eq!(a, b);
/// assert!(a.iter().all(|x| *x >= 0.0));
/// ```
pub fn generate_scenarios_seeded(
    base_value: f64,
    volatility: f64,
    iterations: usize,
    seed: u64,
) -> Result<Vec<f64>, AnalysisError> {
    generate_scenarios_with(
        base_value,
        volatility,
        iterations,
        &mut ScenarioRng::from_seed(seed),
    )
}

/// Draws `iterations` scenarios using the caller's generator.
///
/// Draws are mean-preserving log-normal: with `s² = ln(1 + v²)` and
/// `m = ln|base| - s²/2`, each draw is `sign(base) · exp(m + s·Z)`, giving
/// expectation `base_value` and coefficient of variation `volatility`.
/// Draws share the sign of `base_value` (extreme volatilities may underflow
/// individual draws to zero). A zero base yields zeros; zero volatility
/// yields copies of the base.
///
/// # Errors
///
/// - `InvalidInput` if `iterations == 0`, `volatility < 0`, or either
///   `base_value` or `volatility` is not finite
/// - `Arithmetic` if a draw overflows
pub fn generate_scenarios_with(
    base_value: f64,
    volatility: f64,
    iterations: usize,
    rng: &mut ScenarioRng,
) -> Result<Vec<f64>, AnalysisError> {
    if iterations == 0 {
        return Err(AnalysisError::invalid("Iterations must be at least 1"));
    }
    if !base_value.is_finite() {
        return Err(AnalysisError::invalid("Base value must be finite"));
    }
    if !(volatility >= 0.0) || !volatility.is_finite() {
        return Err(AnalysisError::invalid(format!(
            "Volatility must be finite and non-negative, got {}",
            volatility
        )));
    }

    debug!(base_value, volatility, iterations, seed = rng.seed(), "Generating scenarios");

    if base_value == 0.0 || volatility == 0.0 {
        return Ok(vec![base_value; iterations]);
    }

    let sigma_sq = log_variance(volatility);
    let sigma = sigma_sq.sqrt();
    let mu = base_value.abs().ln() - 0.5 * sigma_sq;
    let sign = base_value.signum();

    let mut draws = vec![0.0; iterations];
    rng.fill_normal(&mut draws);
    for z in draws.iter_mut() {
        *z = sign * (mu + sigma * *z).exp();
    }
    if let Some(bad) = draws.iter().find(|x| !x.is_finite()) {
        return Err(AnalysisError::Arithmetic(format!(
            "Scenario draw overflowed: {}",
            bad
        )));
    }
    Ok(draws)
}

/// `ln(1 + v²)`, evaluated as `2 ln v + ln(1 + v⁻²)` above 1 so that `v²`
/// never overflows.
fn log_variance(volatility: f64) -> f64 {
    if volatility > 1.0 {
        2.0 * volatility.ln() + volatility.powi(-2).ln_1p()
    } else {
        volatility.powi(2).ln_1p()
    }
}
