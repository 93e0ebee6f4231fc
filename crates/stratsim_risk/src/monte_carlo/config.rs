//! Monte Carlo simulation configuration.

use stratsim_core::AnalysisError;

/// Fewest iterations accepted for a simulation.
pub const MIN_ITERATIONS: usize = 1_000;

/// Most iterations accepted for a simulation.
pub const MAX_ITERATIONS: usize = 10_000_000;

/// Iterations used when the builder is not given a count.
pub const DEFAULT_ITERATIONS: usize = 10_000;

/// Monte Carlo simulation configuration.
///
/// Use [`MonteCarloConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use stratsim_risk::monte_carlo::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .iterations(20_000)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.iterations(), 20_000);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonteCarloConfig {
    iterations: usize,
    seed: Option<u64>,
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Number of simulation iterations.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Seed for reproducibility; `None` draws from OS entropy.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `iterations` lies outside
    /// `[MIN_ITERATIONS, MAX_ITERATIONS]`.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&self.iterations) {
            return Err(AnalysisError::invalid(format!(
                "Monte Carlo iterations must be between {} and {}, got {}",
                MIN_ITERATIONS, MAX_ITERATIONS, self.iterations
            )));
        }
        Ok(())
    }
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: None,
        }
    }
}

/// Builder for [`MonteCarloConfig`].
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    iterations: Option<usize>,
    seed: Option<u64>,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of iterations, in `[1_000, 10_000_000]`.
    #[inline]
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the seed.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the iteration count is out of range.
    pub fn build(self) -> Result<MonteCarloConfig, AnalysisError> {
        let config = MonteCarloConfig {
            iterations: self.iterations.unwrap_or(DEFAULT_ITERATIONS),
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}
