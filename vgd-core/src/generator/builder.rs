//! Configuration surface for [`GraphGenerator`].
//!
//! The builder collects sizes, policy flags, seed graphs and the three
//! attribute/validity callbacks, then validates everything once in
//! [`GraphGeneratorBuilder::build`]. Sizing derived from the configuration is
//! fixed for the lifetime of the generator.

use std::{fmt, num::NonZeroUsize};

use rand::{SeedableRng, rngs::SmallRng};

use super::{GraphGenerator, state::GraphView};
use crate::{Result, error::GenerationError, graph::Graph};

/// Rejected additional-edge draws tolerated before generation gives up.
pub const DEFAULT_MAX_EDGE_ATTEMPTS: usize = 100_000;

/// Computes the attribute vector of a newly placed node.
///
/// Receives a view of the graph under construction and the index of the node
/// the new node is attached to (`0` for the lone starting node).
pub type NodeAttributesFn = Box<dyn FnMut(&GraphView<'_>, usize) -> Vec<f32> + Send>;

/// Computes the attribute vector of the directed edge `(source, target)`.
pub type EdgeAttributesFn = Box<dyn FnMut(&GraphView<'_>, usize, usize) -> Vec<f32> + Send>;

/// Decides whether an additional edge `(source, target)` may be inserted.
pub type EdgeValidFn = Box<dyn FnMut(&GraphView<'_>, usize, usize) -> bool + Send>;

pub(super) struct Callbacks {
    node_attributes: NodeAttributesFn,
    edge_attributes: EdgeAttributesFn,
    edge_valid: EdgeValidFn,
}

impl Callbacks {
    pub(super) fn node_attributes(&mut self, view: &GraphView<'_>, anchor: usize) -> Vec<f32> {
        (self.node_attributes)(view, anchor)
    }

    pub(super) fn edge_attributes(
        &mut self,
        view: &GraphView<'_>,
        source: usize,
        target: usize,
    ) -> Vec<f32> {
        (self.edge_attributes)(view, source, target)
    }

    pub(super) fn edge_valid(&mut self, view: &GraphView<'_>, source: usize, target: usize) -> bool {
        (self.edge_valid)(view, source, target)
    }
}

impl Default for Callbacks {
    fn default() -> Self {
        Self {
            node_attributes: Box::new(|_, _| vec![1.0]),
            edge_attributes: Box::new(|_, _, _| vec![1.0]),
            edge_valid: Box::new(|_, _, _| true),
        }
    }
}

/// Sizes derived from a validated configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Sizing {
    pub(super) num_nodes: usize,
    pub(super) num_additional_edges: usize,
    pub(super) seed_node_count: usize,
    pub(super) num_edges: usize,
}

impl Sizing {
    /// Undirected graphs store every logical edge as two directed edges. When
    /// no seed graph is given the lone starting node contributes no edge, so
    /// only `num_nodes - 1` nodes are grown.
    ///
    /// Expects `1 <= num_nodes` and a seed node total of at most `num_nodes`.
    fn derive(
        num_nodes: usize,
        num_additional_edges: usize,
        seed_graphs: &[Graph],
        is_directed: bool,
    ) -> Result<Self> {
        let edges_per_step: usize = if is_directed { 1 } else { 2 };
        let seed_node_count: usize = seed_graphs.iter().map(Graph::node_count).sum();
        let (fixed_edges, grown_nodes) = if seed_graphs.is_empty() {
            (0, num_nodes.saturating_sub(1))
        } else {
            let seed_edge_count: usize = seed_graphs.iter().map(Graph::edge_count).sum();
            (seed_edge_count, num_nodes.saturating_sub(seed_node_count))
        };
        let num_edges = grown_nodes
            .checked_add(num_additional_edges)
            .and_then(|logical| logical.checked_mul(edges_per_step))
            .and_then(|stepped| stepped.checked_add(fixed_edges))
            .ok_or_else(|| GenerationError::InvalidParameters {
                reason: format!(
                    "{num_nodes} nodes with {num_additional_edges} additional edges overflow the edge count"
                ),
            })?;
        Ok(Self {
            num_nodes,
            num_additional_edges,
            seed_node_count,
            num_edges,
        })
    }
}

/// Node pairs left unconnected once a spanning tree over `num_nodes` nodes is
/// in place: `n * (n - 1) / 2 - (n - 1)`, saturating for huge graphs.
fn free_node_pairs(num_nodes: usize) -> usize {
    let tree_edges = num_nodes.saturating_sub(1);
    tree_edges
        .checked_mul(num_nodes.saturating_sub(2))
        .map_or(usize::MAX, |product| product / 2)
}

/// Configures and constructs [`GraphGenerator`] instances.
///
/// # Examples
/// ```
/// use vgd_core::GraphGeneratorBuilder;
///
/// let mut generator = GraphGeneratorBuilder::new(10, 2)
///     .with_directed(true)
///     .with_rng_seed(7)
///     .build()
///     .expect("configuration is valid");
/// let graph = generator.generate().expect("generation succeeds");
/// assert_eq!(graph.node_count(), 10);
/// assert_eq!(graph.edge_count(), 11);
/// ```
pub struct GraphGeneratorBuilder {
    num_nodes: usize,
    num_additional_edges: usize,
    callbacks: Callbacks,
    seed_graphs: Vec<Graph>,
    is_directed: bool,
    prevent_edges_in_seed_graphs: bool,
    rng_seed: Option<u64>,
    max_edge_attempts: Option<NonZeroUsize>,
}

impl fmt::Debug for GraphGeneratorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphGeneratorBuilder")
            .field("num_nodes", &self.num_nodes)
            .field("num_additional_edges", &self.num_additional_edges)
            .field("seed_graphs", &self.seed_graphs.len())
            .field("is_directed", &self.is_directed)
            .field(
                "prevent_edges_in_seed_graphs",
                &self.prevent_edges_in_seed_graphs,
            )
            .field("rng_seed", &self.rng_seed)
            .field("max_edge_attempts", &self.max_edge_attempts)
            .finish_non_exhaustive()
    }
}

impl GraphGeneratorBuilder {
    /// Creates a builder for an undirected graph of `num_nodes` nodes with
    /// `num_additional_edges` edges beyond the spanning tree.
    ///
    /// Defaults: constant `[1.0]` node and edge attributes, every additional
    /// edge valid, no seed graphs, seed-internal additional edges prevented,
    /// entropy-seeded RNG, [`DEFAULT_MAX_EDGE_ATTEMPTS`].
    #[must_use]
    pub fn new(num_nodes: usize, num_additional_edges: usize) -> Self {
        Self {
            num_nodes,
            num_additional_edges,
            callbacks: Callbacks::default(),
            seed_graphs: Vec::new(),
            is_directed: false,
            prevent_edges_in_seed_graphs: true,
            rng_seed: None,
            max_edge_attempts: NonZeroUsize::new(DEFAULT_MAX_EDGE_ATTEMPTS),
        }
    }

    /// Overrides the node attribute callback.
    #[must_use]
    pub fn with_node_attributes<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&GraphView<'_>, usize) -> Vec<f32> + Send + 'static,
    {
        self.callbacks.node_attributes = Box::new(callback);
        self
    }

    /// Overrides the edge attribute callback.
    ///
    /// For undirected graphs the callback runs once per direction, so the two
    /// stored edges may carry different vectors if the callback depends on
    /// edge orientation or graph state.
    #[must_use]
    pub fn with_edge_attributes<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&GraphView<'_>, usize, usize) -> Vec<f32> + Send + 'static,
    {
        self.callbacks.edge_attributes = Box::new(callback);
        self
    }

    /// Overrides the predicate gating additional random edges.
    ///
    /// Growth edges, seed edges and the edges joining seed clusters bypass it.
    #[must_use]
    pub fn with_edge_validity<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&GraphView<'_>, usize, usize) -> bool + Send + 'static,
    {
        self.callbacks.edge_valid = Box::new(callback);
        self
    }

    /// Supplies the seed graphs inserted as disjoint clusters before growth.
    #[must_use]
    pub fn with_seed_graphs(mut self, seed_graphs: Vec<Graph>) -> Self {
        self.seed_graphs = seed_graphs;
        self
    }

    /// Chooses between directed and undirected output.
    #[must_use]
    pub fn with_directed(mut self, is_directed: bool) -> Self {
        self.is_directed = is_directed;
        self
    }

    /// Controls whether additional random edges may join two seed nodes.
    #[must_use]
    pub fn with_prevent_edges_in_seed_graphs(mut self, prevent: bool) -> Self {
        self.prevent_edges_in_seed_graphs = prevent;
        self
    }

    /// Seeds the generator's RNG so runs are reproducible.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Caps rejected additional-edge draws; `None` lets the loop run unbounded.
    #[must_use]
    pub fn with_max_edge_attempts(mut self, attempts: Option<NonZeroUsize>) -> Self {
        self.max_edge_attempts = attempts;
        self
    }

    /// Returns the configured node count.
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Returns the configured number of additional edges.
    #[must_use]
    pub fn num_additional_edges(&self) -> usize {
        self.num_additional_edges
    }

    /// Validates the configuration and constructs a ready-to-run generator.
    ///
    /// # Errors
    /// Returns [`GenerationError::InvalidParameters`] for an empty graph, for
    /// seed graphs that are all empty, when additional edges are requested for
    /// a single node or exceed the node pairs a spanning tree leaves free,
    /// [`GenerationError::InsufficientAdditionalEdges`] when fewer than
    /// `seed_graphs.len() - 1` additional edges are requested,
    /// [`GenerationError::InvalidSeedGraph`] when a seed graph is malformed,
    /// and [`GenerationError::SeedGraphsTooLarge`] when the seed graphs hold
    /// more nodes than `num_nodes`.
    ///
    /// # Examples
    /// ```
    /// use vgd_core::{GenerationError, Graph, GraphGeneratorBuilder};
    ///
    /// let seed = Graph::new(vec![vec![1.0]], Vec::new(), Vec::new());
    /// let err = GraphGeneratorBuilder::new(10, 1)
    ///     .with_seed_graphs(vec![seed.clone(), seed.clone(), seed])
    ///     .build()
    ///     .expect_err("three seeds need two connecting edges");
    /// assert!(matches!(err, GenerationError::InsufficientAdditionalEdges { .. }));
    /// ```
    pub fn build(self) -> Result<GraphGenerator> {
        if self.num_nodes == 0 {
            return Err(GenerationError::InvalidParameters {
                reason: "num_nodes must be greater than zero".into(),
            });
        }
        let required = self.seed_graphs.len().saturating_sub(1);
        if self.num_additional_edges < required {
            return Err(GenerationError::InsufficientAdditionalEdges {
                requested: self.num_additional_edges,
                required,
            });
        }
        for (index, seed) in self.seed_graphs.iter().enumerate() {
            seed.validate()
                .map_err(|error| GenerationError::InvalidSeedGraph { index, error })?;
        }
        let seed_nodes: usize = self.seed_graphs.iter().map(Graph::node_count).sum();
        if seed_nodes > self.num_nodes {
            return Err(GenerationError::SeedGraphsTooLarge {
                seed_nodes,
                num_nodes: self.num_nodes,
            });
        }
        if !self.seed_graphs.is_empty() && seed_nodes == 0 {
            return Err(GenerationError::InvalidParameters {
                reason: format!(
                    "all {} seed graphs are empty; pass no seed graphs instead",
                    self.seed_graphs.len()
                ),
            });
        }
        if self.num_nodes < 2 && self.num_additional_edges > 0 {
            return Err(GenerationError::InvalidParameters {
                reason: format!(
                    "cannot add {} additional edges to a single-node graph",
                    self.num_additional_edges
                ),
            });
        }
        let free_pairs = free_node_pairs(self.num_nodes);
        if self.num_additional_edges > free_pairs {
            return Err(GenerationError::InvalidParameters {
                reason: format!(
                    "{} nodes leave room for {free_pairs} additional edges, not {}",
                    self.num_nodes, self.num_additional_edges
                ),
            });
        }

        let sizing = Sizing::derive(
            self.num_nodes,
            self.num_additional_edges,
            &self.seed_graphs,
            self.is_directed,
        )?;
        let rng = match self.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Ok(GraphGenerator::new(
            sizing,
            self.callbacks,
            self.seed_graphs,
            self.is_directed,
            self.prevent_edges_in_seed_graphs,
            self.max_edge_attempts,
            rng,
        ))
    }
}
