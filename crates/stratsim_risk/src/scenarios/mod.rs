//! # Scenario Analysis
//!
//! - [`generate`]: Monte Carlo draws around a single base value
//! - [`analysis`]: named what-if scenarios over a base-case assumption set
//! - [`sensitivity`]: one-at-a-time sweeps and tornado ranking
//! - [`black_swan`]: preset rare-event scenarios

pub mod analysis;
pub mod black_swan;
pub mod generate;
pub mod sensitivity;

pub use analysis::{
    perform_scenario_analysis, ScenarioAnalysis, ScenarioDefinition, ScenarioType,
    DEFAULT_SCENARIO_PROBABILITY,
};
pub use black_swan::{black_swan_scenarios, BlackSwanEvent};
pub use generate::{generate_scenarios, generate_scenarios_seeded, generate_scenarios_with};
pub use sensitivity::{calculate_sensitivity, TornadoBar, TornadoSensitivity, VariableSweep};
