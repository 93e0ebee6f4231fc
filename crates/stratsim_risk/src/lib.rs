//! # stratsim_risk: Scenario Simulation and Risk Analysis
//!
//! ## Layer 2 Role
//!
//! Builds on `stratsim_core` to quantify uncertainty around a decision:
//! - Seeded random number generation (`rng`)
//! - Monte Carlo scenario draws around a base value (`scenarios::generate`)
//! - Distribution-driven Monte Carlo simulation of an objective (`monte_carlo`)
//! - What-if, tornado sensitivity and black-swan scenarios (`scenarios`)
//! - Historical risk metrics (`metrics`)
//! - Comprehensive assessment combining all of the above (`assessment`)
//!
//! Every stochastic entry point accepts a seed; identical seeds reproduce
//! identical results.
//!
//! ## Usage Examples
//!
//! ```rust
//! use stratsim_risk::scenarios::generate_scenarios_seeded;
//!
//! let draws = generate_scenarios_seeded(100_000.0, 0.2, 1000, 42).unwrap();
//! let mean = draws.iter().sum::<f64>() / draws.len() as f64;
//!
//! assert_eq!(draws.len(), 1000);
//! assert!(draws.iter().all(|x| *x >= 0.0));
//! assert!((90_000.0..=110_000.0).contains(&mean));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for configuration and result structures

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod assessment;
pub mod distribution;
pub mod metrics;
pub mod monte_carlo;
pub mod rng;
pub mod scenarios;

pub use assessment::{assess_risk, RiskAssessment, RiskAssessmentRequest};
pub use distribution::{ProbabilityDistribution, RiskVariable};
pub use monte_carlo::{run_simulation, MonteCarloConfig, MonteCarloResult};
pub use rng::ScenarioRng;
pub use scenarios::{generate_scenarios, generate_scenarios_seeded};
