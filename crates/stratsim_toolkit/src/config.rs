//! Toolkit configuration management
//!
//! Handles loading configuration from TOML files and `STRATSIM_*` environment
//! variables on top of built-in defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use stratsim_core::math::solvers::SolverConfig;
use stratsim_risk::monte_carlo::MonteCarloConfig;
use thiserror::Error;

/// Log level.
pub const ENV_LOG_LEVEL: &str = "STRATSIM_LOG_LEVEL";
/// Default discount rate.
pub const ENV_DISCOUNT_RATE: &str = "STRATSIM_DISCOUNT_RATE";
/// IRR iteration budget.
pub const ENV_IRR_MAX_ITERATIONS: &str = "STRATSIM_IRR_MAX_ITERATIONS";
/// IRR tolerance on NPV.
pub const ENV_IRR_TOLERANCE: &str = "STRATSIM_IRR_TOLERANCE";
/// Monte Carlo iteration count.
pub const ENV_MC_ITERATIONS: &str = "STRATSIM_MC_ITERATIONS";
/// Scenario volatility.
pub const ENV_SCENARIO_VOLATILITY: &str = "STRATSIM_SCENARIO_VOLATILITY";
/// Random seed.
pub const ENV_RANDOM_SEED: &str = "STRATSIM_RANDOM_SEED";
/// Confidence level.
pub const ENV_CONFIDENCE_LEVEL: &str = "STRATSIM_CONFIDENCE_LEVEL";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown log level name.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// A setting outside its accepted range.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    /// Unreadable or malformed configuration file.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Unparseable environment variable.
    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels supported by the toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Solver iterations and per-chunk simulation detail.
    Trace,
    /// Simulation sizes and intermediate results.
    Debug,
    /// Run summaries.
    #[default]
    Info,
    /// Degenerate inputs such as non-convergent IRR searches.
    Warn,
    /// Errors only.
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Numeric defaults shared by every analysis the toolkit runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Log level used when `RUST_LOG` is unset.
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Discount rate for NPV, discounted payback and PI.
    pub discount_rate: f64,
    /// Iteration budget of the IRR search.
    pub irr_max_iterations: usize,
    /// Tolerance on NPV at the IRR.
    pub irr_tolerance: f64,
    /// Number of draws for revenue scenarios and simulations.
    pub monte_carlo_iterations: usize,
    /// Coefficient of variation of revenue scenarios.
    pub scenario_volatility: f64,
    /// Base seed; `None` draws from OS entropy.
    pub random_seed: Option<u64>,
    /// Confidence level for at-risk figures.
    pub confidence_level: f64,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            discount_rate: 0.10,
            irr_max_iterations: 100,
            irr_tolerance: 1e-6,
            monte_carlo_iterations: 10_000,
            scenario_volatility: 0.20,
            random_seed: None,
            confidence_level: 0.95,
        }
    }
}

impl ToolkitConfig {
    /// Create a new ToolkitConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from `STRATSIM_*` environment variables over the
    /// defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Overrides every setting for which `lookup` returns a value.
    ///
    /// `lookup` maps an environment variable name to its value; unset names
    /// leave the current setting untouched.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(value) = lookup(ENV_DISCOUNT_RATE) {
            self.discount_rate = parse_env(ENV_DISCOUNT_RATE, &value)?;
        }
        if let Some(value) = lookup(ENV_IRR_MAX_ITERATIONS) {
            self.irr_max_iterations = parse_env(ENV_IRR_MAX_ITERATIONS, &value)?;
        }
        if let Some(value) = lookup(ENV_IRR_TOLERANCE) {
            self.irr_tolerance = parse_env(ENV_IRR_TOLERANCE, &value)?;
        }
        if let Some(value) = lookup(ENV_MC_ITERATIONS) {
            self.monte_carlo_iterations = parse_env(ENV_MC_ITERATIONS, &value)?;
        }
        if let Some(value) = lookup(ENV_SCENARIO_VOLATILITY) {
            self.scenario_volatility = parse_env(ENV_SCENARIO_VOLATILITY, &value)?;
        }
        if let Some(value) = lookup(ENV_RANDOM_SEED) {
            self.random_seed = Some(parse_env(ENV_RANDOM_SEED, &value)?);
        }
        if let Some(value) = lookup(ENV_CONFIDENCE_LEVEL) {
            self.confidence_level = parse_env(ENV_CONFIDENCE_LEVEL, &value)?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.discount_rate > -1.0) || !self.discount_rate.is_finite() {
            return Err(ConfigError::InvalidValue(format!(
                "discount_rate must be a finite number greater than -1, got {}",
                self.discount_rate
            )));
        }
        if self.irr_max_iterations == 0 {
            return Err(ConfigError::InvalidValue(
                "irr_max_iterations must be greater than 0".to_string(),
            ));
        }
        if !(self.irr_tolerance > 0.0) || !self.irr_tolerance.is_finite() {
            return Err(ConfigError::InvalidValue(format!(
                "irr_tolerance must be positive, got {}",
                self.irr_tolerance
            )));
        }
        if self.monte_carlo_iterations == 0 {
            return Err(ConfigError::InvalidValue(
                "monte_carlo_iterations must be greater than 0".to_string(),
            ));
        }
        if !(self.scenario_volatility >= 0.0) || !self.scenario_volatility.is_finite() {
            return Err(ConfigError::InvalidValue(format!(
                "scenario_volatility must be non-negative, got {}",
                self.scenario_volatility
            )));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ConfigError::InvalidValue(format!(
                "confidence_level must be in (0, 1), got {}",
                self.confidence_level
            )));
        }
        Ok(())
    }

    /// IRR search settings.
    pub fn irr_solver(&self) -> Result<SolverConfig<f64>, ConfigError> {
        SolverConfig::try_new(self.irr_tolerance, self.irr_max_iterations)
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }

    /// Monte Carlo settings for [`stratsim_risk::run_simulation`].
    ///
    /// Stricter than [`validate`](Self::validate): the simulation engine needs
    /// at least [`stratsim_risk::monte_carlo::MIN_ITERATIONS`] draws.
    pub fn monte_carlo(&self) -> Result<MonteCarloConfig, ConfigError> {
        MonteCarloConfig::builder()
            .iterations(self.monte_carlo_iterations)
            .maybe_seed(self.random_seed)
            .build()
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{} has an unparseable value '{}'", key, value)))
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. Environment variables
/// 2. Config file
/// 3. Default values
pub fn build_config(config_file: Option<&Path>) -> Result<ToolkitConfig, ConfigError> {
    build_config_with(config_file, |key| std::env::var(key).ok())
}

/// [`build_config`] with a custom variable source in place of the process
/// environment.
pub fn build_config_with<F>(config_file: Option<&Path>, lookup: F) -> Result<ToolkitConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match config_file {
        Some(path) => ToolkitConfig::from_file(path)?,
        None => ToolkitConfig::default(),
    };

    config.apply_overrides(lookup)?;

    // Final validation
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ToolkitConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.discount_rate, 0.10);
        assert_eq!(config.irr_max_iterations, 100);
        assert_eq!(config.irr_tolerance, 1e-6);
        assert_eq!(config.monte_carlo_iterations, 10_000);
        assert_eq!(config.scenario_volatility, 0.20);
        assert_eq!(config.random_seed, None);
        assert_eq!(config.confidence_level, 0.95);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(format!("{}", LogLevel::Trace), "trace");
        assert_eq!(format!("{}", LogLevel::Warn), "warn");
        assert_eq!(LogLevel::Error.as_filter_str(), "error");
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            log_level = "debug"
            discount_rate = 0.08
            irr_max_iterations = 200
            irr_tolerance = 1e-8
            monte_carlo_iterations = 5000
            scenario_volatility = 0.3
            random_seed = 42
            confidence_level = 0.99
        "#;

        let config = ToolkitConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.discount_rate, 0.08);
        assert_eq!(config.irr_max_iterations, 200);
        assert_eq!(config.irr_tolerance, 1e-8);
        assert_eq!(config.monte_carlo_iterations, 5000);
        assert_eq!(config.scenario_volatility, 0.3);
        assert_eq!(config.random_seed, Some(42));
        assert_eq!(config.confidence_level, 0.99);
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config = ToolkitConfig::from_toml_str("discount_rate = 0.12").unwrap();
        // Should use defaults for unspecified fields
        assert_eq!(config.discount_rate, 0.12);
        assert_eq!(config.monte_carlo_iterations, 10_000);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_invalid_toml_log_level() {
        let err = ToolkitConfig::from_toml_str(r#"log_level = "verbose""#).unwrap_err();
        assert!(matches!(err, ConfigError::FileError(_)));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let cases: Vec<fn(&mut ToolkitConfig)> = vec![
            |c| c.irr_tolerance = 0.0,
            |c| c.irr_max_iterations = 0,
            |c| c.monte_carlo_iterations = 0,
            |c| c.scenario_volatility = -0.1,
            |c| c.confidence_level = 1.0,
            |c| c.confidence_level = 0.0,
            |c| c.discount_rate = -1.0,
        ];
        for mutate in cases {
            let mut config = ToolkitConfig::default();
            mutate(&mut config);
            assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
        }
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ToolkitConfig::default();
        config
            .apply_overrides(env(&[
                (ENV_LOG_LEVEL, "trace"),
                (ENV_DISCOUNT_RATE, "0.07"),
                (ENV_MC_ITERATIONS, "2000"),
                (ENV_RANDOM_SEED, "7"),
            ]))
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.discount_rate, 0.07);
        assert_eq!(config.monte_carlo_iterations, 2000);
        assert_eq!(config.random_seed, Some(7));
        // untouched
        assert_eq!(config.irr_max_iterations, 100);
    }

    #[test]
    fn test_env_unparseable_value() {
        let mut config = ToolkitConfig::default();
        let err = config
            .apply_overrides(env(&[(ENV_IRR_MAX_ITERATIONS, "many")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvError(_)));
        assert!(err.to_string().contains(ENV_IRR_MAX_ITERATIONS));
    }

    #[test]
    fn test_build_config_with_defaults() {
        let config = build_config_with(None, env(&[])).unwrap();
        assert_eq!(config, ToolkitConfig::default());
    }

    #[test]
    fn test_build_config_rejects_invalid_env() {
        let result = build_config_with(None, env(&[(ENV_CONFIDENCE_LEVEL, "1.5")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = build_config_with(Some(Path::new("/nonexistent/stratsim.toml")), env(&[]));
        assert!(matches!(result, Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_derived_settings() {
        let config = ToolkitConfig {
            random_seed: Some(9),
            ..Default::default()
        };
        let irr = config.irr_solver().unwrap();
        assert_eq!(irr.max_iterations, 100);
        assert_eq!(irr.tolerance, 1e-6);

        let mc = config.monte_carlo().unwrap();
        assert_eq!(mc.iterations(), 10_000);
        assert_eq!(mc.seed(), Some(9));

        let small = ToolkitConfig {
            monte_carlo_iterations: 10,
            ..Default::default()
        };
        assert!(small.validate().is_ok());
        assert!(small.monte_carlo().is_err());
    }
}
