//! Seeded incremental random graph generation.
//!
//! A run proceeds through four phases in strict order:
//!
//! 1. **Seeding** places either one random starting node or every seed graph
//!    as a disjoint cluster, copying seed attributes verbatim.
//! 2. **Growth** attaches each remaining node, in an order fixed by the shuffle
//!    performed at reset, to a uniformly chosen node that is already placed.
//! 3. **Additional edges** first joins consecutive seed clusters, then
//!    rejection-samples random node pairs until the budget is spent.
//! 4. **Finalization** derives the adjacency matrix and returns the [`Graph`].
//!
//! The number of edge slots is computed before the run starts, so the returned
//! graph always has exactly [`GraphGenerator::num_edges`] edges.

mod builder;
mod state;

use std::{fmt, num::NonZeroUsize};

use rand::{
    rngs::SmallRng,
    seq::{SliceRandom, index},
};
use tracing::{debug, info, instrument, warn};

pub use self::{
    builder::{
        DEFAULT_MAX_EDGE_ATTEMPTS, EdgeAttributesFn, EdgeValidFn, GraphGeneratorBuilder,
        NodeAttributesFn,
    },
    state::GraphView,
};
use self::{
    builder::{Callbacks, Sizing},
    state::GenerationState,
};
use crate::{
    Result,
    error::GenerationError,
    graph::{Graph, SeedMembership},
    provenance,
};

/// Generates random graphs grown around optional seed graphs.
///
/// A generator is configured once through [`GraphGeneratorBuilder`] and can
/// then produce any number of independent graphs by alternating
/// [`Self::reset`] and [`Self::generate`]. A freshly built generator is
/// already reset.
///
/// # Examples
/// ```
/// use vgd_core::{Graph, GraphGenerator};
///
/// let triangle = Graph::new(
///     vec![vec![1.0]; 3],
///     vec![[0, 1], [1, 0], [1, 2], [2, 1], [2, 0], [0, 2]],
///     vec![vec![1.0]; 6],
/// );
/// let mut generator = GraphGenerator::builder(12, 2)
///     .with_seed_graphs(vec![triangle])
///     .with_rng_seed(11)
///     .build()
///     .expect("configuration is valid");
///
/// let graph = generator.generate().expect("generation succeeds");
/// assert_eq!(graph.node_count(), 12);
/// assert_eq!(graph.edge_count(), generator.num_edges());
/// assert_eq!(generator.seed_membership_vector(0).iter().filter(|&&v| v == 1).count(), 3);
///
/// generator.reset();
/// let again = generator.generate().expect("reset allows another run");
/// assert_eq!(again.edge_count(), graph.edge_count());
/// ```
pub struct GraphGenerator {
    sizing: Sizing,
    callbacks: Callbacks,
    seed_graphs: Vec<Graph>,
    is_directed: bool,
    prevent_edges_in_seed_graphs: bool,
    max_edge_attempts: Option<NonZeroUsize>,
    rng: SmallRng,
    state: GenerationState,
}

impl fmt::Debug for GraphGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphGenerator")
            .field("sizing", &self.sizing)
            .field("seed_graphs", &self.seed_graphs.len())
            .field("is_directed", &self.is_directed)
            .field(
                "prevent_edges_in_seed_graphs",
                &self.prevent_edges_in_seed_graphs,
            )
            .field("max_edge_attempts", &self.max_edge_attempts)
            .field("current_edge_index", &self.current_edge_index())
            .finish_non_exhaustive()
    }
}

impl GraphGenerator {
    /// Starts configuring a generator; see [`GraphGeneratorBuilder::new`].
    #[must_use]
    pub fn builder(num_nodes: usize, num_additional_edges: usize) -> GraphGeneratorBuilder {
        GraphGeneratorBuilder::new(num_nodes, num_additional_edges)
    }

    fn new(
        sizing: Sizing,
        callbacks: Callbacks,
        seed_graphs: Vec<Graph>,
        is_directed: bool,
        prevent_edges_in_seed_graphs: bool,
        max_edge_attempts: Option<NonZeroUsize>,
        mut rng: SmallRng,
    ) -> Self {
        let state = GenerationState::new(sizing.num_nodes, sizing.num_edges, &mut rng);
        Self {
            sizing,
            callbacks,
            seed_graphs,
            is_directed,
            prevent_edges_in_seed_graphs,
            max_edge_attempts,
            rng,
            state,
        }
    }

    /// Number of nodes in every generated graph.
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.sizing.num_nodes
    }

    /// Number of directed edge slots in every generated graph.
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.sizing.num_edges
    }

    /// Additional edges inserted after growth, counted as logical edges.
    #[must_use]
    pub fn num_additional_edges(&self) -> usize {
        self.sizing.num_additional_edges
    }

    /// Combined node count of all seed graphs.
    #[must_use]
    pub fn seed_node_count(&self) -> usize {
        self.sizing.seed_node_count
    }

    /// Returns `true` when edges are stored in one direction only.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.is_directed
    }

    /// Returns `true` when additional edges may not join two seed nodes.
    #[must_use]
    pub fn prevent_edges_in_seed_graphs(&self) -> bool {
        self.prevent_edges_in_seed_graphs
    }

    /// The seed graphs in insertion order.
    #[must_use]
    pub fn seed_graphs(&self) -> &[Graph] {
        &self.seed_graphs
    }

    /// Nodes placed during the current run, in placement order.
    #[must_use]
    pub fn node_indices_inserted(&self) -> &[usize] {
        self.state.inserted()
    }

    /// Nodes still waiting to be placed, in the order growth will pop them.
    #[must_use]
    pub fn node_indices_remaining(&self) -> Vec<usize> {
        self.state.remaining().iter().copied().collect()
    }

    /// Per seed graph, the generated index of each seed-local node.
    #[must_use]
    pub fn seed_graph_index_maps(&self) -> &[Vec<usize>] {
        self.state.seed_graph_index_maps()
    }

    /// Growth-cluster id of each node.
    #[must_use]
    pub fn seed_graph_association(&self) -> &[usize] {
        self.state.association()
    }

    /// Direct seed membership of each node.
    #[must_use]
    pub fn seed_graph_indices(&self) -> &[SeedMembership] {
        self.state.seed_graph_indices()
    }

    /// Next free edge slot.
    #[must_use]
    pub fn current_edge_index(&self) -> usize {
        self.state.edge_indices().len()
    }

    /// Indicator over nodes of the current run: `1` where the node was copied
    /// from seed graph `seed`.
    #[must_use]
    pub fn seed_membership_vector(&self, seed: usize) -> Vec<u8> {
        provenance::seed_membership_vector(self.state.seed_graph_indices(), seed)
    }

    /// Indicator over the edges of the current run: `1` where both endpoints
    /// were copied from seed graph `seed`.
    #[must_use]
    pub fn seed_edge_membership_vector(&self, seed: usize) -> Vec<u8> {
        provenance::seed_edge_membership_vector(
            self.state.seed_graph_indices(),
            self.state.edge_indices(),
            seed,
        )
    }

    /// Discards the current run and reshuffles the node pool.
    pub fn reset(&mut self) {
        self.state =
            GenerationState::new(self.sizing.num_nodes, self.sizing.num_edges, &mut self.rng);
    }

    /// Runs all generation phases and returns the finished graph.
    ///
    /// # Errors
    /// Returns [`GenerationError::NotReset`] when called again without
    /// [`Self::reset`], [`GenerationError::UnsatisfiableEdges`] when the
    /// additional-edge loop exhausts its attempt budget, and
    /// [`GenerationError::EdgeCapacityExceeded`] or
    /// [`GenerationError::InvariantViolation`] if the internal bookkeeping is
    /// inconsistent.
    #[instrument(
        name = "generator.generate",
        err,
        skip(self),
        fields(
            num_nodes = self.sizing.num_nodes,
            num_edges = self.sizing.num_edges,
            seed_graphs = self.seed_graphs.len(),
            directed = self.is_directed,
        ),
    )]
    pub fn generate(&mut self) -> Result<Graph> {
        if self.state.consumed {
            return Err(GenerationError::NotReset);
        }
        self.state.consumed = true;

        if self.seed_graphs.is_empty() {
            self.insert_seed_node()?;
        } else {
            self.insert_seed_graphs()?;
        }
        debug!(
            placed = self.state.inserted().len(),
            edges = self.current_edge_index(),
            "seeding completed"
        );

        self.grow_nodes()?;
        debug!(edges = self.current_edge_index(), "growth completed");

        self.add_edges()?;
        let graph = self.finalize()?;
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "graph generated"
        );
        Ok(graph)
    }

    fn insert_seed_node(&mut self) -> Result<()> {
        let index = self
            .state
            .pop_remaining()
            .ok_or_else(|| invariant("node pool is empty"))?;
        let attributes = self
            .callbacks
            .node_attributes(&GraphView::new(&self.state), 0);
        self.state.set_node_attributes(index, attributes)?;
        self.state.mark_inserted(index);
        Ok(())
    }

    fn insert_seed_graphs(&mut self) -> Result<()> {
        for (position, seed) in self.seed_graphs.iter().enumerate() {
            let pool = self.state.remaining();
            let chosen = index::sample(&mut self.rng, pool.len(), seed.node_count())
                .iter()
                .map(|slot| pool.get(slot).copied())
                .collect::<Option<Vec<usize>>>()
                .ok_or_else(|| invariant("sampled a slot outside the node pool"))?;
            self.state.claim(&chosen);

            for (&index, attributes) in chosen.iter().zip(seed.node_attributes()) {
                self.state.set_node_attributes(index, attributes.clone())?;
                self.state.set_seed_membership(index, position)?;
            }
            for (&[i, j], attributes) in seed.edge_indices().iter().zip(seed.edge_attributes()) {
                let (Some(&source), Some(&target)) = (chosen.get(i), chosen.get(j)) else {
                    return Err(invariant("seed edge references an unmapped node"));
                };
                self.state.push_edge([source, target], attributes.clone())?;
            }
            for &index in &chosen {
                self.state.mark_inserted(index);
            }
            debug!(seed = position, nodes = chosen.len(), "seed graph inserted");
            self.state.record_seed_map(chosen);
        }
        Ok(())
    }

    fn grow_nodes(&mut self) -> Result<()> {
        while let Some(index) = self.state.pop_remaining() {
            let anchor = *self
                .state
                .inserted()
                .choose(&mut self.rng)
                .ok_or_else(|| invariant("growth started without any placed node"))?;
            let attributes = self
                .callbacks
                .node_attributes(&GraphView::new(&self.state), anchor);
            self.state.set_node_attributes(index, attributes)?;
            let cluster = self.state.cluster_of(anchor)?;
            self.state.set_cluster(index, cluster)?;
            self.insert_edge(index, anchor)?;
            self.state.mark_inserted(index);
        }
        Ok(())
    }

    fn add_edges(&mut self) -> Result<()> {
        let mut budget = self.sizing.num_additional_edges;

        if self.seed_graphs.len() > 1 {
            let clusters: Vec<usize> = self
                .seed_graphs
                .iter()
                .enumerate()
                .filter(|(_, seed)| seed.node_count() > 0)
                .map(|(position, _)| position)
                .collect();
            for pair in clusters.windows(2) {
                let &[from, to] = pair else {
                    continue;
                };
                let source = self.pick_connecting_source(from)?;
                let target = pick_cluster_member(&self.state, &mut self.rng, to, |_| true)
                    .ok_or_else(|| invariant(&format!("cluster {to} has no node")))?;
                self.insert_edge(source, target)?;
                budget = budget.saturating_sub(1);
                debug!(from, to, source, target, "seed clusters joined");
            }
        }

        let mut attempts = 0_usize;
        while budget > 0 {
            if self
                .max_edge_attempts
                .is_some_and(|limit| attempts >= limit.get())
            {
                warn!(
                    remaining = budget,
                    attempts, "additional edge budget could not be satisfied"
                );
                return Err(GenerationError::UnsatisfiableEdges {
                    remaining: budget,
                    attempts,
                });
            }
            let (source, target) = self.sample_pair()?;
            if self.accepts_additional_edge(source, target) {
                self.insert_edge(source, target)?;
                budget -= 1;
            } else {
                attempts += 1;
            }
        }
        debug!(rejected = attempts, "additional edges inserted");
        Ok(())
    }

    /// Prefers a grown node of `cluster`; clusters made only of seed nodes
    /// fall back to any member.
    fn pick_connecting_source(&mut self, cluster: usize) -> Result<usize> {
        let state = &self.state;
        if let Some(node) =
            pick_cluster_member(state, &mut self.rng, cluster, |node| !state.is_seed_node(node))
        {
            return Ok(node);
        }
        warn!(cluster, "cluster has no grown node; connecting from a seed node");
        pick_cluster_member(state, &mut self.rng, cluster, |_| true)
            .ok_or_else(|| invariant(&format!("cluster {cluster} has no node")))
    }

    fn sample_pair(&mut self) -> Result<(usize, usize)> {
        let inserted = self.state.inserted();
        if inserted.len() < 2 {
            return Err(invariant("additional edges need at least two placed nodes"));
        }
        let picks = index::sample(&mut self.rng, inserted.len(), 2);
        match (inserted.get(picks.index(0)), inserted.get(picks.index(1))) {
            (Some(&source), Some(&target)) => Ok((source, target)),
            _ => Err(invariant("sampled a node outside the inserted set")),
        }
    }

    fn accepts_additional_edge(&mut self, source: usize, target: usize) -> bool {
        if source == target || self.state.contains_undirected(source, target) {
            return false;
        }
        if self.prevent_edges_in_seed_graphs
            && self.state.is_seed_node(source)
            && self.state.is_seed_node(target)
        {
            return false;
        }
        self.callbacks
            .edge_valid(&GraphView::new(&self.state), source, target)
    }

    /// Undirected edges are stored as two directed edges; the attribute
    /// callback runs once per direction.
    fn insert_edge(&mut self, source: usize, target: usize) -> Result<()> {
        self.push_directed(source, target)?;
        if !self.is_directed {
            self.push_directed(target, source)?;
        }
        Ok(())
    }

    fn push_directed(&mut self, source: usize, target: usize) -> Result<()> {
        let attributes = self
            .callbacks
            .edge_attributes(&GraphView::new(&self.state), source, target);
        self.state.push_edge([source, target], attributes)
    }

    fn finalize(&self) -> Result<Graph> {
        if !self.state.remaining().is_empty() {
            return Err(invariant("nodes remain unplaced after growth"));
        }
        if self.current_edge_index() != self.sizing.num_edges {
            return Err(GenerationError::InvariantViolation {
                message: format!(
                    "filled {} of {} edge slots",
                    self.current_edge_index(),
                    self.sizing.num_edges
                ),
            });
        }
        let graph = Graph::new(
            self.state.completed_node_attributes()?,
            self.state.edge_indices().to_vec(),
            self.state.edge_attributes().to_vec(),
        )
        .with_seed_graph_indices(self.state.seed_graph_indices().to_vec())
        .with_derived_adjacency();
        Ok(graph)
    }
}

fn pick_cluster_member(
    state: &GenerationState,
    rng: &mut SmallRng,
    cluster: usize,
    eligible: impl Fn(usize) -> bool,
) -> Option<usize> {
    let candidates: Vec<usize> = state
        .association()
        .iter()
        .enumerate()
        .filter(|&(node, &owner)| owner == cluster && eligible(node))
        .map(|(node, _)| node)
        .collect();
    candidates.choose(rng).copied()
}

fn invariant(message: &str) -> GenerationError {
    GenerationError::InvariantViolation {
        message: message.to_owned(),
    }
}
