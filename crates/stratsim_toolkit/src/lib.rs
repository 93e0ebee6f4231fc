//! # stratsim_toolkit: Configuration, Telemetry and Option Evaluation
//!
//! ## Layer 3 Role
//!
//! Wires the analysis crates into an embeddable toolkit:
//! - Configuration from TOML files and `STRATSIM_*` environment variables
//!   (`config`)
//! - Tracing subscriber installation (`telemetry`)
//! - Parallel evaluation of decision options into serialisable reports
//!   (`evaluator`)
//! - Expected-value decision trees and weighted criteria scoring
//!   (`frameworks`)
//!
//! ## Usage Example
//!
//! ```rust
//! use stratsim_toolkit::config::ToolkitConfig;
//! use stratsim_toolkit::evaluator::{rank_by_npv, DecisionOption, OptionEvaluator};
//!
//! let config = ToolkitConfig { random_seed: Some(1), ..Default::default() };
//! let evaluator = OptionEvaluator::new(config).unwrap();
//!
//! let options = vec![
//!     DecisionOption::new("build", vec![-500_000.0, 150_000.0, 200_000.0, 250_000.0]),
//!     DecisionOption::new("buy", vec![-300_000.0, 120_000.0, 120_000.0, 120_000.0]),
//! ];
//! let results = evaluator.evaluate_all(&options);
//! let ranked = rank_by_npv(&results);
//!
//! assert_eq!(ranked.len(), 2);
//! assert!(ranked[0].npv() >= ranked[1].npv());
//! ```

#![deny(missing_docs)]

pub mod config;
mod error;
pub mod evaluator;
pub mod frameworks;
pub mod telemetry;

pub use config::{build_config, ConfigError, LogLevel, ToolkitConfig};
pub use error::ToolkitError;
pub use evaluator::{rank_by_npv, DecisionOption, OptionEvaluator, OptionReport};
pub use frameworks::{
    expected_value_tree, weighted_option_scores, DecisionTree, ScoredOption, StrategicEvaluation,
    TreeOption,
};
pub use telemetry::init_tracing;

// Re-export analysis crates for integration
pub use stratsim_core;
pub use stratsim_risk;

/// Toolkit version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
