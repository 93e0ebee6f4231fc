//! Solver configuration types.

use crate::types::AnalysisError;
use num_traits::Float;

/// Converts an `f64` constant into `T`, falling back to machine epsilon for
/// types that cannot represent it.
fn constant<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::epsilon)
}

/// Configuration for root-finding algorithms.
///
/// Provides common settings shared across all solver implementations,
/// including convergence tolerance and iteration limits.
///
/// # Example
///
/// ```
/// use stratsim_core::math::solvers::SolverConfig;
///
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert!(config.tolerance < 1e-8);
/// assert_eq!(config.max_iterations, 100);
///
/// let irr = SolverConfig::<f64>::rate_search();
/// assert_eq!(irr.tolerance, 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance for root finding.
    ///
    /// The solver stops when `|f(x)| < tolerance` or the bracket has shrunk
    /// below it.
    pub tolerance: T,

    /// Maximum number of iterations before giving up.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Default values:
    /// - `tolerance`: 1e-10
    /// - `max_iterations`: 100
    fn default() -> Self {
        Self {
            tolerance: constant(1e-10),
            max_iterations: 100,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a new configuration with specified values.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`. Use
    /// [`SolverConfig::try_new`] for caller-supplied values.
    ///
    /// # Example
    ///
    /// ```
    /// use stratsim_core::math::solvers::SolverConfig;
    ///
    /// let config = SolverConfig::new(1e-12, 200);
    /// assert_eq!(config.max_iterations, 200);
    /// ```
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        assert!(tolerance > T::zero(), "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Fallible counterpart of [`SolverConfig::new`].
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` if `tolerance` is not a positive
    /// finite number or `max_iterations == 0`.
    pub fn try_new(tolerance: T, max_iterations: usize) -> Result<Self, AnalysisError> {
        if !(tolerance > T::zero()) || !tolerance.is_finite() {
            return Err(AnalysisError::invalid(
                "tolerance must be a positive finite number",
            ));
        }
        if max_iterations == 0 {
            return Err(AnalysisError::invalid("max_iterations must be > 0"));
        }
        Ok(Self {
            tolerance,
            max_iterations,
        })
    }

    /// Settings used by the internal rate of return search.
    ///
    /// Tolerance 1e-6 on NPV and 100 iterations.
    pub fn rate_search() -> Self {
        Self {
            tolerance: constant(1e-6),
            max_iterations: 100,
        }
    }

    /// Create a configuration with high precision settings.
    ///
    /// Uses tighter tolerance (1e-14) and more iterations (500).
    pub fn high_precision() -> Self {
        Self {
            tolerance: constant(1e-14),
            max_iterations: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config: SolverConfig<f64> = SolverConfig::default();
        assert!((config.tolerance - 1e-10).abs() < 1e-15);
        assert_eq!(config.max_iterations, 100);
    }

    #[test]
    fn test_new_config() {
        let config: SolverConfig<f64> = SolverConfig::new(1e-12, 200);
        assert!((config.tolerance - 1e-12).abs() < 1e-17);
        assert_eq!(config.max_iterations, 200);
    }

    #[test]
    #[should_panic(expected = "tolerance must be positive")]
    fn test_new_config_zero_tolerance_panics() {
        let _: SolverConfig<f64> = SolverConfig::new(0.0, 100);
    }

    #[test]
    #[should_panic(expected = "max_iterations must be > 0")]
    fn test_new_config_zero_iterations_panics() {
        let _: SolverConfig<f64> = SolverConfig::new(1e-10, 0);
    }

    #[test]
    fn test_try_new_rejects_bad_values() {
        assert!(SolverConfig::<f64>::try_new(0.0, 10).is_err());
        assert!(SolverConfig::<f64>::try_new(-1e-6, 10).is_err());
        assert!(SolverConfig::<f64>::try_new(f64::NAN, 10).is_err());
        assert!(SolverConfig::<f64>::try_new(f64::INFINITY, 10).is_err());
        assert!(SolverConfig::<f64>::try_new(1e-6, 0).is_err());
        assert!(SolverConfig::<f64>::try_new(1e-6, 1).is_ok());
    }

    #[test]
    fn test_rate_search_config() {
        let config: SolverConfig<f64> = SolverConfig::rate_search();
        assert_eq!(config.tolerance, 1e-6);
        assert_eq!(config.max_iterations, 100);
    }

    #[test]
    fn test_high_precision_config() {
        let config: SolverConfig<f64> = SolverConfig::high_precision();
        assert!(config.tolerance < 1e-12);
        assert!(config.max_iterations >= 500);
    }

    #[test]
    fn test_config_with_f32() {
        let config: SolverConfig<f32> = SolverConfig::default();
        assert!(config.tolerance > 0.0);
        assert_eq!(config.max_iterations, 100);
    }
}
