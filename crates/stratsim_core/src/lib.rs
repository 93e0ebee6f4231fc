//! # stratsim_core: Deterministic Financial Metrics
//!
//! ## Layer 1 (Foundation) Role
//!
//! stratsim_core is the bottom layer of the toolkit, providing:
//! - Discounted cash-flow metrics: NPV, IRR, payback, profitability index (`finance`)
//! - Return metrics: ROI (simple and annualised), WACC, investment metrics (`finance`)
//! - Break-even and financial ratio analysis (`finance`)
//! - Root-finding solvers and descriptive statistics (`math`)
//! - Error types: `AnalysisError`, `SolverError` (`types::error`)
//!
//! Every function is pure: no I/O, no shared state, safe to call from any
//! number of threads without coordination.
//!
//! ## Usage Examples
//!
//! ```rust
//! use stratsim_core::finance::{irr, npv, roi};
//!
//! let flows = [-1000.0, 300.0, 400.0, 500.0, 600.0];
//!
//! let value = npv(&flows, 0.10).unwrap();
//! assert!(value > 0.0);
//!
//! let rate = irr(&flows).unwrap().unwrap();
//! assert!((rate - 0.1486).abs() < 1e-4);
//!
//! assert_eq!(roi(100_000.0, 150_000.0, None).unwrap(), 0.5);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for result structures

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod finance;
pub mod math;
pub mod types;

pub use types::{AnalysisError, SolverError};
