//! # Monte Carlo Simulation
//!
//! Samples every [`RiskVariable`](crate::distribution::RiskVariable)
//! independently, evaluates a caller-supplied objective on each draw, and
//! summarises the resulting outcome distribution.
//!
//! ## Reproducibility
//!
//! Iterations are split into fixed-size chunks, each with its own generator
//! forked sequentially from the master seed. Chunks run in parallel with
//! rayon but the chunk layout does not depend on the thread count, so a
//! seeded run returns identical results on any machine.
//!
//! ## Usage Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use stratsim_risk::distribution::{ProbabilityDistribution, RiskVariable};
//! use stratsim_risk::monte_carlo::{run_simulation, MonteCarloConfig};
//!
//! let variables = vec![
//!     RiskVariable::new("revenue", ProbabilityDistribution::Normal { mean: 120.0, std: 15.0 }),
//!     RiskVariable::new("cost", ProbabilityDistribution::Uniform { min: 80.0, max: 100.0 }),
//! ];
//! let config = MonteCarloConfig::builder().iterations(5_000).seed(7).build().unwrap();
//!
//! let result = run_simulation(
//!     &variables,
//!     |v: &BTreeMap<String, f64>| v["revenue"] - v["cost"],
//!     &config,
//! )
//! .unwrap();
//!
//! assert!((result.mean - 30.0).abs() < 1.5);
//! assert!(result.probability_negative < 0.1);
//! ```

mod config;
mod result;
mod simulation;

pub use config::{
    MonteCarloConfig, MonteCarloConfigBuilder, DEFAULT_ITERATIONS, MAX_ITERATIONS, MIN_ITERATIONS,
};
pub use result::{ConfidenceIntervals, MonteCarloResult, Percentiles};
pub use simulation::run_simulation;
