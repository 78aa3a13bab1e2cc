//! Benchmark support crate for the visual graph dataset tools.
//!
//! Provides parameter types and generator fixtures used by the Criterion
//! benchmarks for graph generation and mock dataset synthesis.

pub mod error;
pub mod fixtures;
pub mod params;
