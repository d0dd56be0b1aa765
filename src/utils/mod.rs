//! Small shared utilities: stable id derivation and seeded randomness.

pub mod ids;
pub mod rng;
