//! Shared test utilities used across the visual graph dataset crates.

pub mod graph;
pub mod tracing;
