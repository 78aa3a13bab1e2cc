//! Benchmark setup error type.
//!
//! Lets setup functions propagate generator failures with `?` instead of
//! using `.expect()`.

use vgd_core::GenerationError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Building or running the generator failed.
    #[error("graph generation failed: {0}")]
    Generation(#[from] GenerationError),
    /// The seed graphs need more nodes than the benchmark graph provides.
    #[error("{seeds} seed triangles do not fit into {num_nodes} nodes")]
    SeedsDoNotFit {
        /// Requested seed count.
        seeds: usize,
        /// Requested node count.
        num_nodes: usize,
    },
}
