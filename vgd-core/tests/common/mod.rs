use vgd_core::{Graph, GraphGenerator};
use vgd_test_support::graph::{adjacency_matches_edges, is_symmetric, unordered_pair_counts};

/// Asserts the structural guarantees every completed run must uphold.
pub fn assert_run_invariants(generator: &GraphGenerator, graph: &Graph) {
    assert!(graph.validate().is_ok(), "generated graph must validate");
    assert_eq!(graph.node_count(), generator.num_nodes());
    assert_eq!(graph.edge_count(), generator.num_edges());
    assert_eq!(generator.current_edge_index(), generator.num_edges());

    let mut inserted = generator.node_indices_inserted().to_vec();
    inserted.sort_unstable();
    assert_eq!(inserted, (0..generator.num_nodes()).collect::<Vec<_>>());
    assert!(generator.node_indices_remaining().is_empty());

    if !generator.is_directed() {
        assert!(is_symmetric(graph), "undirected edges come in pairs");
    }
    assert!(adjacency_matches_edges(graph));

    for (position, seed) in generator.seed_graphs().iter().enumerate() {
        let members = generator
            .seed_membership_vector(position)
            .iter()
            .filter(|&&flag| flag == 1)
            .count();
        assert_eq!(members, seed.node_count(), "seed {position} membership");
        assert_eq!(
            graph.seed_membership_vector(position),
            generator.seed_membership_vector(position),
        );
    }

    let step = if generator.is_directed() { 1 } else { 2 };
    let tail = generator.num_additional_edges() * step;
    let additional = &graph.edge_indices()[graph.edge_count() - tail..];
    let counts = unordered_pair_counts(graph.edge_indices(), generator.is_directed());
    for &[i, j] in additional {
        assert_ne!(i, j, "additional edges never loop");
        assert_eq!(
            counts.get(&(i.min(j), i.max(j))),
            Some(&1),
            "pair ({i}, {j}) repeats",
        );
    }
}
