//! Root-finding solvers for numerical computation.
//!
//! Used by the internal rate of return search and available to callers that
//! need to invert other monotone financial relationships (e.g. solving for
//! the price that hits a target break-even volume).
//!
//! ## Available Solvers
//!
//! - [`NewtonRaphsonSolver`]: Fast quadratic convergence using derivatives
//! - [`BrentSolver`]: Robust bracketing method without derivative requirement
//!
//! ## Configuration
//!
//! Both solvers use [`SolverConfig`] for configuring:
//! - `tolerance`: Convergence tolerance (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! ## Examples
//!
//! ```
//! use stratsim_core::math::solvers::{BrentSolver, SolverConfig};
//!
//! // Rate at which a single 1000 outlay returning 1100 breaks even
//! let f = |r: f64| -1000.0 + 1100.0 / (1.0 + r);
//!
//! let solver = BrentSolver::new(SolverConfig::default());
//! let root = solver.find_root(f, 0.0, 1.0).unwrap();
//! assert!((root - 0.1).abs() < 1e-9);
//! ```

mod brent;
mod config;
mod newton_raphson;

pub use brent::BrentSolver;
pub use config::SolverConfig;
pub use newton_raphson::NewtonRaphsonSolver;
