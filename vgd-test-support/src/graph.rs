//! Graph fixtures and structural checks for generated graphs.

use std::collections::{HashMap, HashSet};

use vgd_core::{Edge, Graph};

/// Builds a seed graph with `[1.0]` attributes from logical edges.
///
/// Undirected seeds store each pair in both orientations, matching how the
/// generator materialises undirected edges.
///
/// # Examples
/// ```
/// use vgd_test_support::graph::seed_graph;
///
/// let path = seed_graph(3, &[(0, 1), (1, 2)], false);
/// assert_eq!(path.edge_count(), 4);
/// ```
#[must_use]
pub fn seed_graph(nodes: usize, pairs: &[(usize, usize)], directed: bool) -> Graph {
    let mut edges = Vec::with_capacity(pairs.len() * 2);
    for &(source, target) in pairs {
        edges.push([source, target]);
        if !directed {
            edges.push([target, source]);
        }
    }
    let attributes = vec![vec![1.0]; edges.len()];
    Graph::new(vec![vec![1.0]; nodes], edges, attributes)
}

/// The fully connected three-node motif.
#[must_use]
pub fn triangle(directed: bool) -> Graph {
    seed_graph(3, &[(0, 1), (1, 2), (2, 0)], directed)
}

/// Returns `true` when every edge `(i, j)` has a matching `(j, i)`.
#[must_use]
pub fn is_symmetric(graph: &Graph) -> bool {
    let edges: HashSet<Edge> = graph.edge_indices().iter().copied().collect();
    edges.iter().all(|&[i, j]| edges.contains(&[j, i]))
}

/// Returns `true` when the adjacency matrix marks exactly the stored edges.
#[must_use]
pub fn adjacency_matches_edges(graph: &Graph) -> bool {
    let Some(adjacency) = graph.node_adjacency() else {
        return false;
    };
    let edges: HashSet<Edge> = graph.edge_indices().iter().copied().collect();
    adjacency.iter().enumerate().all(|(i, row)| {
        row.iter()
            .enumerate()
            .all(|(j, &cell)| (cell == 1) == edges.contains(&[i, j]))
    })
}

/// Counts how often each unordered node pair occurs among `edges`, counting
/// both orientations of an undirected edge once.
#[must_use]
pub fn unordered_pair_counts(edges: &[Edge], directed: bool) -> HashMap<(usize, usize), usize> {
    let mut counts = HashMap::new();
    for &[i, j] in edges {
        if !directed && i > j {
            continue;
        }
        *counts.entry((i.min(j), i.max(j))).or_insert(0) += 1;
    }
    counts
}

/// Number of weakly connected components.
#[must_use]
pub fn component_count(graph: &Graph) -> usize {
    let mut components = DisjointSet::new(graph.node_count());
    for &[i, j] in graph.edge_indices() {
        components.union(i, j);
    }
    (0..graph.node_count())
        .filter(|&node| components.find(node) == node)
        .count()
}

/// Returns `true` when the graph forms a single weakly connected component.
#[must_use]
pub fn is_connected(graph: &Graph) -> bool {
    component_count(graph) == 1
}

struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = node;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[rb] = ra;
        }
    }
}
