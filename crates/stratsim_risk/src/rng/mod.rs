//! Random number generation for scenario sampling.
//!
//! [`ScenarioRng`] wraps a seeded `StdRng` so that every stochastic
//! operation in this crate can be replayed from a single `u64` seed.

mod prng;

pub use prng::ScenarioRng;
