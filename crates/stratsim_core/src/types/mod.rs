//! Core error types shared by every stratsim crate.
//!
//! - `error`: [`AnalysisError`] for caller-facing failures and [`SolverError`]
//!   for root-finding failures

pub mod error;

pub use error::{AnalysisError, SolverError};
