//! Property suite exercising the generator over random configurations.

mod common;

use common::assert_run_invariants;
use proptest::{prelude::any, prop_assert, prop_assert_eq, proptest, test_runner::Config};
use test_strategy::Arbitrary;
use vgd_core::{Graph, GraphGenerator};
use vgd_test_support::graph::{is_connected, seed_graph, triangle};

/// Shape of the seed graphs supplied to a plan.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
enum SeedShape {
    #[weight(2)]
    Triangle,
    #[weight(2)]
    Path,
    #[weight(1)]
    Single,
}

impl SeedShape {
    fn graph(self, directed: bool) -> Graph {
        match self {
            Self::Triangle => triangle(directed),
            Self::Path => seed_graph(4, &[(0, 1), (1, 2), (2, 3)], directed),
            Self::Single => seed_graph(1, &[], directed),
        }
    }
}

/// A feasible generator configuration.
#[derive(Clone, Debug, Arbitrary)]
struct GenerationPlan {
    #[strategy(0_usize..=3)]
    seeds: usize,
    shape: SeedShape,
    #[strategy(4_usize..=24)]
    grown: usize,
    #[strategy(0_usize..=3)]
    extra_edges: usize,
    directed: bool,
    prevent_edges_in_seed_graphs: bool,
    rng_seed: u64,
}

impl GenerationPlan {
    fn seed_graphs(&self) -> Vec<Graph> {
        vec![self.shape.graph(self.directed); self.seeds]
    }

    fn num_additional_edges(&self) -> usize {
        self.seeds.saturating_sub(1) + self.extra_edges
    }

    fn build(&self) -> GraphGenerator {
        let seed_graphs = self.seed_graphs();
        let seed_nodes: usize = seed_graphs.iter().map(Graph::node_count).sum();
        GraphGenerator::builder(seed_nodes + self.grown, self.num_additional_edges())
            .with_seed_graphs(seed_graphs)
            .with_directed(self.directed)
            .with_prevent_edges_in_seed_graphs(self.prevent_edges_in_seed_graphs)
            .with_rng_seed(self.rng_seed)
            .build()
            .expect("plans only describe valid configurations")
    }
}

proptest! {
    #![proptest_config(Config::with_cases(96))]

    #[test]
    fn plans_produce_connected_valid_graphs(plan in any::<GenerationPlan>()) {
        let mut generator = plan.build();
        let graph = generator.generate().expect("feasible plans always generate");
        assert_run_invariants(&generator, &graph);
        prop_assert!(is_connected(&graph));

        let step = if plan.directed { 1 } else { 2 };
        let seed_edges: usize = plan.seed_graphs().iter().map(Graph::edge_count).sum();
        let expected = if plan.seeds == 0 {
            (generator.num_nodes() - 1 + plan.num_additional_edges()) * step
        } else {
            seed_edges + (plan.grown + plan.num_additional_edges()) * step
        };
        prop_assert_eq!(graph.edge_count(), expected);
    }

    #[test]
    fn identical_plans_reproduce_identical_graphs(plan in any::<GenerationPlan>()) {
        let first = plan.build().generate().expect("feasible plans always generate");
        let second = plan.build().generate().expect("feasible plans always generate");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn reset_cycles_stay_valid(plan in any::<GenerationPlan>(), cycles in 1_usize..4) {
        let mut generator = plan.build();
        for _ in 0..cycles {
            generator.reset();
            let graph = generator.generate().expect("feasible plans always generate");
            assert_run_invariants(&generator, &graph);
        }
    }
}
