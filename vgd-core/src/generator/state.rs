//! Mutable state of a single generation run.
//!
//! [`GenerationState`] owns the partially built graph and the bookkeeping
//! needed to grow it: the shuffled pool of unplaced nodes, the inserted
//! nodes, seed index maps, growth-cluster association and seed membership.
//! [`GraphView`] is the read-only window callbacks receive.

use std::collections::{HashSet, VecDeque};

use rand::{Rng, seq::SliceRandom};

use crate::{
    Result,
    error::GenerationError,
    graph::{Edge, SeedMembership},
};

/// Edge slots reserved up front; larger runs grow their buffers on demand.
const PREALLOCATED_EDGE_SLOTS: usize = 1 << 16;

pub(super) struct GenerationState {
    node_attributes: Vec<Option<Vec<f32>>>,
    edge_indices: Vec<Edge>,
    edge_attributes: Vec<Vec<f32>>,
    undirected_pairs: HashSet<(usize, usize)>,
    remaining: VecDeque<usize>,
    inserted: Vec<usize>,
    seed_graph_index_maps: Vec<Vec<usize>>,
    association: Vec<usize>,
    seed_graph_indices: Vec<SeedMembership>,
    capacity: usize,
    pub(super) consumed: bool,
}

impl GenerationState {
    /// Shuffles the node pool once; growth later pops from its front.
    pub(super) fn new<R: Rng + ?Sized>(num_nodes: usize, capacity: usize, rng: &mut R) -> Self {
        let mut pool: Vec<usize> = (0..num_nodes).collect();
        pool.shuffle(rng);
        let reserved = capacity.min(PREALLOCATED_EDGE_SLOTS);
        Self {
            node_attributes: vec![None; num_nodes],
            edge_indices: Vec::with_capacity(reserved),
            edge_attributes: Vec::with_capacity(reserved),
            undirected_pairs: HashSet::with_capacity(reserved),
            remaining: pool.into(),
            inserted: Vec::with_capacity(num_nodes),
            seed_graph_index_maps: Vec::new(),
            association: vec![0; num_nodes],
            seed_graph_indices: vec![SeedMembership::NONE; num_nodes],
            capacity,
            consumed: false,
        }
    }

    pub(super) fn remaining(&self) -> &VecDeque<usize> {
        &self.remaining
    }

    pub(super) fn inserted(&self) -> &[usize] {
        &self.inserted
    }

    pub(super) fn edge_indices(&self) -> &[Edge] {
        &self.edge_indices
    }

    pub(super) fn edge_attributes(&self) -> &[Vec<f32>] {
        &self.edge_attributes
    }

    pub(super) fn seed_graph_index_maps(&self) -> &[Vec<usize>] {
        &self.seed_graph_index_maps
    }

    pub(super) fn association(&self) -> &[usize] {
        &self.association
    }

    pub(super) fn seed_graph_indices(&self) -> &[SeedMembership] {
        &self.seed_graph_indices
    }

    pub(super) fn pop_remaining(&mut self) -> Option<usize> {
        self.remaining.pop_front()
    }

    /// Removes `nodes` from the unplaced pool, preserving the order of the rest.
    pub(super) fn claim(&mut self, nodes: &[usize]) {
        let claimed: HashSet<usize> = nodes.iter().copied().collect();
        self.remaining.retain(|node| !claimed.contains(node));
    }

    pub(super) fn mark_inserted(&mut self, node: usize) {
        self.inserted.push(node);
    }

    pub(super) fn record_seed_map(&mut self, map: Vec<usize>) {
        self.seed_graph_index_maps.push(map);
    }

    pub(super) fn set_node_attributes(&mut self, node: usize, attributes: Vec<f32>) -> Result<()> {
        let slot = self
            .node_attributes
            .get_mut(node)
            .ok_or_else(|| node_out_of_range(node))?;
        *slot = Some(attributes);
        Ok(())
    }

    pub(super) fn set_seed_membership(&mut self, node: usize, seed: usize) -> Result<()> {
        let slot = self
            .seed_graph_indices
            .get_mut(node)
            .ok_or_else(|| node_out_of_range(node))?;
        *slot = SeedMembership::seed(seed);
        self.set_cluster(node, seed)
    }

    pub(super) fn set_cluster(&mut self, node: usize, cluster: usize) -> Result<()> {
        let slot = self
            .association
            .get_mut(node)
            .ok_or_else(|| node_out_of_range(node))?;
        *slot = cluster;
        Ok(())
    }

    pub(super) fn cluster_of(&self, node: usize) -> Result<usize> {
        self.association
            .get(node)
            .copied()
            .ok_or_else(|| node_out_of_range(node))
    }

    pub(super) fn is_seed_node(&self, node: usize) -> bool {
        self.seed_graph_indices
            .get(node)
            .is_some_and(|membership| membership.is_seed())
    }

    pub(super) fn contains_undirected(&self, source: usize, target: usize) -> bool {
        self.undirected_pairs
            .contains(&(source.min(target), source.max(target)))
    }

    /// Fills the next edge slot.
    ///
    /// # Errors
    /// Returns [`GenerationError::EdgeCapacityExceeded`] once every slot
    /// reserved for the run is taken.
    pub(super) fn push_edge(&mut self, edge: Edge, attributes: Vec<f32>) -> Result<()> {
        if self.edge_indices.len() >= self.capacity {
            return Err(GenerationError::EdgeCapacityExceeded {
                capacity: self.capacity,
            });
        }
        let [source, target] = edge;
        self.undirected_pairs
            .insert((source.min(target), source.max(target)));
        self.edge_indices.push(edge);
        self.edge_attributes.push(attributes);
        Ok(())
    }

    /// Collects the node attributes, failing if any node was never placed.
    pub(super) fn completed_node_attributes(&self) -> Result<Vec<Vec<f32>>> {
        self.node_attributes
            .iter()
            .enumerate()
            .map(|(node, attributes)| {
                attributes
                    .clone()
                    .ok_or_else(|| GenerationError::InvariantViolation {
                        message: format!("node {node} was never assigned attributes"),
                    })
            })
            .collect()
    }
}

fn node_out_of_range(node: usize) -> GenerationError {
    GenerationError::InvariantViolation {
        message: format!("node {node} is outside the generated graph"),
    }
}

/// Read-only view of a graph while it is being generated.
///
/// Attribute and validity callbacks receive a view so they can make decisions
/// that depend on the structure built so far.
///
/// # Examples
/// ```
/// use vgd_core::GraphGeneratorBuilder;
///
/// let mut generator = GraphGeneratorBuilder::new(6, 0)
///     .with_rng_seed(3)
///     .with_node_attributes(|view, _anchor| {
///         let placed = view.inserted_nodes().len();
///         vec![placed as f32]
///     })
///     .build()
///     .expect("configuration is valid");
/// let graph = generator.generate().expect("generation succeeds");
/// let mut placed: Vec<f32> = graph.node_attributes().iter().map(|a| a[0]).collect();
/// placed.sort_by(f32::total_cmp);
/// assert_eq!(placed, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
/// ```
#[derive(Clone, Copy)]
pub struct GraphView<'a> {
    state: &'a GenerationState,
}

impl<'a> GraphView<'a> {
    pub(super) fn new(state: &'a GenerationState) -> Self {
        Self { state }
    }

    /// Total number of nodes the finished graph will have.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.state.node_attributes.len()
    }

    /// Attributes of `node`, or `None` if it has not been placed yet.
    #[must_use]
    pub fn node_attributes(&self, node: usize) -> Option<&'a [f32]> {
        self.state
            .node_attributes
            .get(node)
            .and_then(|attributes| attributes.as_deref())
    }

    /// Nodes placed so far, in placement order.
    #[must_use]
    pub fn inserted_nodes(&self) -> &'a [usize] {
        &self.state.inserted
    }

    /// Edges inserted so far.
    #[must_use]
    pub fn edge_indices(&self) -> &'a [Edge] {
        &self.state.edge_indices
    }

    /// Attributes of the edges inserted so far.
    #[must_use]
    pub fn edge_attributes(&self) -> &'a [Vec<f32>] {
        &self.state.edge_attributes
    }

    /// Direct seed membership of `node`.
    #[must_use]
    pub fn seed_membership(&self, node: usize) -> SeedMembership {
        self.state
            .seed_graph_indices
            .get(node)
            .copied()
            .unwrap_or_default()
    }

    /// Returns `true` when `(source, target)` exists in either orientation.
    #[must_use]
    pub fn contains_edge(&self, source: usize, target: usize) -> bool {
        self.state.contains_undirected(source, target)
    }
}
