//! Graph generation and mock dataset benchmarks.
//!
//! Measures a full reset and generate cycle of a reused generator across
//! graph sizes, with and without triangle seed graphs, plus end-to-end mock
//! dataset synthesis.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use vgd_benches::{
    error::BenchSetupError,
    fixtures::{regenerate, seeded_generator},
    params::{GenerationBenchParams, MockBenchParams},
};
use vgd_core::mock::{MockDatasetConfig, generate_mock_dataset};

/// Seed used for every generator in this benchmark.
const SEED: u64 = 42;

/// Graph sizes to benchmark as `(num_nodes, additional_edges)`.
const SIZES: &[(usize, usize)] = &[(100, 10), (1_000, 100), (5_000, 500)];

/// Seed graph counts to benchmark per size.
const SEED_COUNTS: &[usize] = &[0, 8];

/// Mock dataset sizes to benchmark.
const ELEMENT_COUNTS: &[usize] = &[50, 200];

fn graph_generation_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("graph_generation");
    group.sample_size(20);

    for &(num_nodes, additional_edges) in SIZES {
        for &seeds in SEED_COUNTS {
            let params = GenerationBenchParams {
                num_nodes,
                additional_edges,
                seeds,
            };
            let mut generator = seeded_generator(params, SEED)?;
            // Surface setup failures before Criterion starts timing.
            generator.generate()?;

            group.bench_with_input(
                BenchmarkId::from_parameter(&params),
                &params,
                |b, _params| {
                    b.iter(|| match regenerate(&mut generator) {
                        Ok(graph) => black_box(graph),
                        Err(err) => panic!("graph generation failed while timed: {err}"),
                    });
                },
            );
        }
    }

    group.finish();
    Ok(())
}

fn graph_generation(c: &mut Criterion) {
    if let Err(err) = graph_generation_impl(c) {
        panic!("graph_generation benchmark setup failed: {err}");
    }
}

fn mock_dataset_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("mock_dataset");
    group.sample_size(10);

    for &elements in ELEMENT_COUNTS {
        let config = MockDatasetConfig {
            elements,
            rng_seed: Some(SEED),
            ..MockDatasetConfig::default()
        };
        generate_mock_dataset(&config)?;

        let params = MockBenchParams { elements };
        group.bench_with_input(
            BenchmarkId::from_parameter(&params),
            &config,
            |b, config| {
                b.iter(|| match generate_mock_dataset(black_box(config)) {
                    Ok(dataset) => black_box(dataset),
                    Err(err) => panic!("mock dataset generation failed while timed: {err}"),
                });
            },
        );
    }

    group.finish();
    Ok(())
}

fn mock_dataset(c: &mut Criterion) {
    if let Err(err) = mock_dataset_impl(c) {
        panic!("mock_dataset benchmark setup failed: {err}");
    }
}

criterion_group!(benches, graph_generation, mock_dataset);
criterion_main!(benches);
