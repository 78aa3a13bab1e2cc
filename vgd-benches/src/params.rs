//! Benchmark parameter types.
//!
//! Groups related benchmark parameters into structs so that fixture
//! functions stay small and benchmark IDs read consistently.

use std::fmt;

/// Parameters for a graph generation benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct GenerationBenchParams {
    /// Number of nodes in each generated graph.
    pub num_nodes: usize,
    /// Number of additional edges on top of the spanning tree.
    pub additional_edges: usize,
    /// Number of triangle seed graphs embedded in each graph.
    pub seeds: usize,
}

impl fmt::Display for GenerationBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},extra={},seeds={}",
            self.num_nodes, self.additional_edges, self.seeds,
        )
    }
}

/// Parameters for a mock dataset benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct MockBenchParams {
    /// Number of dataset elements.
    pub elements: usize,
}

impl fmt::Display for MockBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "elements={}", self.elements)
    }
}
