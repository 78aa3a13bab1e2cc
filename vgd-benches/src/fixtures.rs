//! Generator fixtures shared by the benchmarks.

use vgd_core::{Graph, GraphGenerator, mock::triangle_motif};

use crate::{error::BenchSetupError, params::GenerationBenchParams};

/// Builds a seeded generator for `params`.
///
/// Each seed is a triangle motif and every seed needs one connecting edge,
/// so the additional edge budget is raised to `seeds - 1` when smaller.
///
/// # Errors
/// Returns [`BenchSetupError::SeedsDoNotFit`] when the triangles need more
/// nodes than requested, or [`BenchSetupError::Generation`] if the builder
/// rejects the configuration.
pub fn seeded_generator(
    params: GenerationBenchParams,
    rng_seed: u64,
) -> Result<GraphGenerator, BenchSetupError> {
    let seed_nodes = params.seeds.saturating_mul(3);
    if seed_nodes > params.num_nodes {
        return Err(BenchSetupError::SeedsDoNotFit {
            seeds: params.seeds,
            num_nodes: params.num_nodes,
        });
    }
    let additional_edges = params
        .additional_edges
        .max(params.seeds.saturating_sub(1));
    let seeds: Vec<Graph> = (0..params.seeds).map(|_| triangle_motif()).collect();

    let generator = GraphGenerator::builder(params.num_nodes, additional_edges)
        .with_seed_graphs(seeds)
        .with_rng_seed(rng_seed)
        .build()?;
    Ok(generator)
}

/// Resets `generator` and runs it once, as one timed benchmark iteration.
///
/// # Errors
/// Returns [`BenchSetupError::Generation`] when the run fails.
pub fn regenerate(generator: &mut GraphGenerator) -> Result<Graph, BenchSetupError> {
    generator.reset();
    Ok(generator.generate()?)
}
