//! Probability distributions for risk variables.
//!
//! [`ProbabilityDistribution`] is the declarative, serialisable description;
//! [`DistributionSampler`] is the validated, ready-to-draw form built from it
//! once per simulation.

use crate::rng::ScenarioRng;
use rand::distributions::Uniform;
use rand::Rng;
use rand_distr::{Beta, Distribution, Exp, LogNormal, Normal, Triangular};
use stratsim_core::AnalysisError;

/// Distribution families supported for risk variables.
///
/// # Examples
///
/// ```rust
/// use stratsim_risk::distribution::ProbabilityDistribution;
/// use stratsim_risk::rng::ScenarioRng;
///
/// let dist = ProbabilityDistribution::Triangular { min: 80.0, mode: 100.0, max: 130.0 };
/// let mut rng = ScenarioRng::from_seed(1);
/// let draw = dist.sample(&mut rng).unwrap();
/// assert!((80.0..=130.0).contains(&draw));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum ProbabilityDistribution {
    /// Gaussian with the given mean and standard deviation.
    Normal {
        /// Mean.
        mean: f64,
        /// Standard deviation, `>= 0`.
        std: f64,
    },
    /// Continuous uniform on `[min, max)`.
    Uniform {
        /// Lower bound.
        min: f64,
        /// Upper bound, `> min`.
        max: f64,
    },
    /// Triangular with a peak at `mode`.
    Triangular {
        /// Lower bound.
        min: f64,
        /// Most likely value, within `[min, max]`.
        mode: f64,
        /// Upper bound, `> min`.
        max: f64,
    },
    /// Beta on `[0, 1]`.
    Beta {
        /// First shape parameter, `> 0`.
        alpha: f64,
        /// Second shape parameter, `> 0`.
        beta: f64,
    },
    /// Exponential with mean `scale`.
    Exponential {
        /// Mean of the distribution (inverse rate), `> 0`.
        scale: f64,
    },
    /// Log-normal: `exp(N(mu, sigma))`.
    LogNormal {
        /// Mean of the underlying normal.
        mu: f64,
        /// Standard deviation of the underlying normal, `>= 0`.
        sigma: f64,
    },
}

impl ProbabilityDistribution {
    /// Checks the parameters without building a sampler.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        self.sampler().map(|_| ())
    }

    /// Builds a validated sampler.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for non-finite parameters or parameters outside the
    /// ranges documented on each variant.
    pub fn sampler(&self) -> Result<DistributionSampler, AnalysisError> {
        let params = self.parameters();
        if params.iter().any(|p| !p.is_finite()) {
            return Err(AnalysisError::invalid(format!(
                "{} distribution parameters must be finite",
                self.name()
            )));
        }

        let sampler = match *self {
            Self::Normal { mean, std } => {
                if std < 0.0 {
                    return Err(AnalysisError::invalid(
                        "Normal distribution requires std >= 0",
                    ));
                }
                Normal::new(mean, std).map(DistributionSampler::Normal).ok()
            }
            Self::Uniform { min, max } => {
                if !(min < max) || !(max - min).is_finite() {
                    return Err(AnalysisError::invalid(
                        "Uniform distribution requires min < max",
                    ));
                }
                Some(DistributionSampler::Uniform(Uniform::new(min, max)))
            }
            Self::Triangular { min, mode, max } => {
                if !(min < max) || !(min..=max).contains(&mode) {
                    return Err(AnalysisError::invalid(
                        "Triangular distribution requires min < max and min <= mode <= max",
                    ));
                }
                Triangular::new(min, max, mode)
                    .map(DistributionSampler::Triangular)
                    .ok()
            }
            Self::Beta { alpha, beta } => {
                if !(alpha > 0.0 && beta > 0.0) {
                    return Err(AnalysisError::invalid(
                        "Beta distribution requires alpha > 0 and beta > 0",
                    ));
                }
                Beta::new(alpha, beta).map(DistributionSampler::Beta).ok()
            }
            Self::Exponential { scale } => {
                if !(scale > 0.0) {
                    return Err(AnalysisError::invalid(
                        "Exponential distribution requires scale > 0",
                    ));
                }
                Exp::new(1.0 / scale).map(DistributionSampler::Exponential).ok()
            }
            Self::LogNormal { mu, sigma } => {
                if sigma < 0.0 {
                    return Err(AnalysisError::invalid(
                        "LogNormal distribution requires sigma >= 0",
                    ));
                }
                LogNormal::new(mu, sigma)
                    .map(DistributionSampler::LogNormal)
                    .ok()
            }
        };

        sampler.ok_or_else(|| {
            AnalysisError::invalid(format!(
                "Invalid {} distribution parameters",
                self.name()
            ))
        })
    }

    /// Draws one value. Prefer [`sampler`](Self::sampler) in loops.
    pub fn sample(&self, rng: &mut ScenarioRng) -> Result<f64, AnalysisError> {
        Ok(self.sampler()?.draw(rng))
    }

    /// Explicit support bounds, for the bounded families.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match *self {
            Self::Uniform { min, max } | Self::Triangular { min, max, .. } => Some((min, max)),
            Self::Beta { .. } => Some((0.0, 1.0)),
            _ => None,
        }
    }

    /// Lower-case family name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal { .. } => "normal",
            Self::Uniform { .. } => "uniform",
            Self::Triangular { .. } => "triangular",
            Self::Beta { .. } => "beta",
            Self::Exponential { .. } => "exponential",
            Self::LogNormal { .. } => "lognormal",
        }
    }

    fn parameters(&self) -> Vec<f64> {
        match *self {
            Self::Normal { mean, std } => vec![mean, std],
            Self::Uniform { min, max } => vec![min, max],
            Self::Triangular { min, mode, max } => vec![min, mode, max],
            Self::Beta { alpha, beta } => vec![alpha, beta],
            Self::Exponential { scale } => vec![scale],
            Self::LogNormal { mu, sigma } => vec![mu, sigma],
        }
    }
}

/// A validated distribution ready to draw from.
#[derive(Debug, Clone)]
pub enum DistributionSampler {
    /// Normal.
    Normal(Normal<f64>),
    /// Uniform.
    Uniform(Uniform<f64>),
    /// Triangular.
    Triangular(Triangular<f64>),
    /// Beta.
    Beta(Beta<f64>),
    /// Exponential.
    Exponential(Exp<f64>),
    /// Log-normal.
    LogNormal(LogNormal<f64>),
}

impl DistributionSampler {
    /// Draws one value using `rng`.
    #[inline]
    pub fn draw(&self, rng: &mut ScenarioRng) -> f64 {
        rng.sample(self)
    }
}

impl Distribution<f64> for DistributionSampler {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Self::Normal(d) => d.sample(rng),
            Self::Uniform(d) => d.sample(rng),
            Self::Triangular(d) => d.sample(rng),
            Self::Beta(d) => d.sample(rng),
            Self::Exponential(d) => d.sample(rng),
            Self::LogNormal(d) => d.sample(rng),
        }
    }
}

/// An uncertain input to a simulation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskVariable {
    /// Key under which sampled values are passed to the objective.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Sampling distribution.
    pub distribution: ProbabilityDistribution,
    /// Unit of measurement, if any.
    pub unit: Option<String>,
}

impl RiskVariable {
    /// Creates a variable with an empty description and no unit.
    pub fn new(name: impl Into<String>, distribution: ProbabilityDistribution) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            distribution,
            unit: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mean_of(dist: ProbabilityDistribution, n: usize) -> f64 {
        let sampler = dist.sampler().unwrap();
        let mut rng = ScenarioRng::from_seed(2024);
        (0..n).map(|_| sampler.draw(&mut rng)).sum::<f64>() / n as f64
    }

    #[test]
    fn test_sample_means() {
        let n = 50_000;
        assert!((mean_of(ProbabilityDistribution::Normal { mean: 10.0, std: 2.0 }, n) - 10.0).abs() < 0.1);
        assert!((mean_of(ProbabilityDistribution::Uniform { min: 0.0, max: 10.0 }, n) - 5.0).abs() < 0.1);
        assert!(
            (mean_of(ProbabilityDistribution::Triangular { min: 0.0, mode: 3.0, max: 6.0 }, n) - 3.0)
                .abs()
                < 0.1
        );
        assert!((mean_of(ProbabilityDistribution::Beta { alpha: 2.0, beta: 2.0 }, n) - 0.5).abs() < 0.02);
        assert!((mean_of(ProbabilityDistribution::Exponential { scale: 4.0 }, n) - 4.0).abs() < 0.15);
        let lognormal_mean = (0.5f64 * 0.25).exp();
        assert!(
            (mean_of(ProbabilityDistribution::LogNormal { mu: 0.0, sigma: 0.5 }, n) - lognormal_mean)
                .abs()
                < 0.03
        );
    }

    #[test]
    fn test_bounded_draws_stay_in_support() {
        let mut rng = ScenarioRng::from_seed(3);
        let dist = ProbabilityDistribution::Uniform { min: -1.0, max: 1.0 };
        let sampler = dist.sampler().unwrap();
        for _ in 0..1000 {
            let x = sampler.draw(&mut rng);
            assert!((-1.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_invalid_parameters() {
        let invalid = [
            ProbabilityDistribution::Normal { mean: 0.0, std: -1.0 },
            ProbabilityDistribution::Uniform { min: 1.0, max: 1.0 },
            ProbabilityDistribution::Triangular { min: 0.0, mode: 5.0, max: 4.0 },
            ProbabilityDistribution::Beta { alpha: 0.0, beta: 1.0 },
            ProbabilityDistribution::Exponential { scale: 0.0 },
            ProbabilityDistribution::LogNormal { mu: 0.0, sigma: -0.1 },
            ProbabilityDistribution::Normal { mean: f64::NAN, std: 1.0 },
        ];
        for dist in invalid {
            assert!(dist.validate().unwrap_err().is_invalid_input(), "{:?}", dist);
        }
    }

    #[test]
    fn test_zero_spread_is_valid() {
        let mut rng = ScenarioRng::from_seed(1);
        let dist = ProbabilityDistribution::Normal { mean: 5.0, std: 0.0 };
        assert_eq!(dist.sample(&mut rng).unwrap(), 5.0);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(
            ProbabilityDistribution::Triangular { min: 1.0, mode: 2.0, max: 3.0 }.bounds(),
            Some((1.0, 3.0))
        );
        assert_eq!(ProbabilityDistribution::Normal { mean: 0.0, std: 1.0 }.bounds(), None);
    }

    #[test]
    fn test_risk_variable_builder() {
        let var = RiskVariable::new("price", ProbabilityDistribution::Exponential { scale: 1.0 })
            .with_description("Unit price")
            .with_unit("USD");
        assert_eq!(var.name, "price");
        assert_eq!(var.unit.as_deref(), Some("USD"));
    }
}
