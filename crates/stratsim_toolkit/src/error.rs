//! Toolkit error type.

use crate::config::ConfigError;
use stratsim_core::AnalysisError;
use thiserror::Error;

/// Errors surfaced by the toolkit layer.
#[derive(Debug, Error)]
pub enum ToolkitError {
    /// Configuration could not be loaded or validated.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An analysis rejected its inputs.
    #[error("Analysis failed for '{option}': {source}")]
    Analysis {
        /// Name of the decision option being evaluated.
        option: String,
        /// Underlying analysis error.
        #[source]
        source: AnalysisError,
    },

    /// Report serialisation failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The tracing subscriber could not be installed.
    #[error("Telemetry error: {0}")]
    Telemetry(String),
}

impl ToolkitError {
    pub(crate) fn analysis(option: &str, source: AnalysisError) -> Self {
        Self::Analysis {
            option: option.to_string(),
            source,
        }
    }

    /// `true` for analysis errors caused by invalid caller input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::Analysis { source, .. } if source.is_invalid_input())
    }
}
