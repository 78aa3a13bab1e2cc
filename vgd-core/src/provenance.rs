//! Seed provenance indicators.
//!
//! Both indicators are purely positional: an edge counts as belonging to a
//! seed graph whenever both endpoints are direct members of it, whether the
//! edge was copied from the seed or added later.

use crate::graph::{Edge, SeedMembership};

pub(crate) fn seed_membership_vector(seed_graph_indices: &[SeedMembership], seed: usize) -> Vec<u8> {
    seed_graph_indices
        .iter()
        .map(|membership| u8::from(membership.is_seed_of(seed)))
        .collect()
}

pub(crate) fn seed_edge_membership_vector(
    seed_graph_indices: &[SeedMembership],
    edges: &[Edge],
    seed: usize,
) -> Vec<u8> {
    let owned = |node: usize| {
        seed_graph_indices
            .get(node)
            .is_some_and(|membership| membership.is_seed_of(seed))
    };
    edges
        .iter()
        .map(|&[i, j]| u8::from(owned(i) && owned(j)))
        .collect()
}
