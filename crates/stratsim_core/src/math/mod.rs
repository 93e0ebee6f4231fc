//! Numerical building blocks.
//!
//! - [`solvers`]: Root-finding (Brent, Newton-Raphson)
//! - [`stats`]: Descriptive statistics over sample slices

pub mod solvers;
pub mod stats;
