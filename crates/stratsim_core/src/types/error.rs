//! Error types for structured error handling.
//!
//! This module provides:
//! - `AnalysisError`: Errors surfaced to callers of the financial and risk functions
//! - `SolverError`: Errors from root-finding solvers
//!
//! A numeric search that fails to find a root is *not* an `AnalysisError`.
//! IRR reports it as `Ok(None)` so that "no root" stays distinguishable from
//! a contract violation and from a genuine zero rate.

use thiserror::Error;

/// Categorised analysis errors.
///
/// # Variants
/// - `InvalidInput`: The caller violated an argument contract (empty series,
///   non-positive divisor, missing parameter combination)
/// - `Arithmetic`: The inputs drove the computation into an undefined
///   operation such as division by zero
///
/// Both are raised at the point of the offending call and are never retried;
/// re-running a pure function on the same inputs cannot change the outcome.
///
/// # Examples
/// ```
/// use stratsim_core::types::AnalysisError;
///
/// let err = AnalysisError::InvalidInput("Cash flows cannot be empty".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Cash flows cannot be empty");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnalysisError {
    /// Invalid input data or parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Arithmetic failure provoked by the inputs
    #[error("Arithmetic error: {0}")]
    Arithmetic(String),
}

impl AnalysisError {
    /// Shorthand for building an [`AnalysisError::InvalidInput`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        AnalysisError::InvalidInput(msg.into())
    }

    /// Returns `true` for [`AnalysisError::InvalidInput`].
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, AnalysisError::InvalidInput(_))
    }
}

/// Solver error types.
///
/// Structured error handling for root-finding algorithms.
///
/// # Variants
/// - `MaxIterationsExceeded`: Failed to converge within iteration limit
/// - `DerivativeNearZero`: Newton-Raphson derivative too small
/// - `NoBracket`: Brent's method requires bracketing interval
/// - `NumericalInstability`: Numerical issues during computation
///
/// # Examples
/// ```
/// use stratsim_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// Derivative near zero (division by zero risk in Newton-Raphson).
    #[error("Derivative near zero at x = {x}")]
    DerivativeNearZero {
        /// The x value where derivative was near zero
        x: f64,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}
