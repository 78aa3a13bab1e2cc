//! The graph interchange structure shared by generators and datasets.
//!
//! A [`Graph`] is stored as parallel arrays: node attributes indexed by node,
//! `[source, target]` edge pairs with attributes indexed by edge slot, and two
//! optional derived arrays (`node_adjacency` and `seed_graph_indices`) that
//! generated graphs always carry. The serde representation uses the same
//! snake_case keys as the JSON metadata files of a visual graph dataset.

mod validate;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};

use crate::provenance;

pub use validate::{REQUIRED_GRAPH_KEYS, validate_graph_value};

/// A directed edge stored as `[source, target]`.
pub type Edge = [usize; 2];

/// Records whether a node was copied verbatim from a seed graph.
///
/// Serialises to the seed graph position, or to `-1` for nodes that were not
/// contributed by any seed graph.
///
/// # Examples
/// ```
/// use vgd_core::SeedMembership;
///
/// let member = SeedMembership::seed(2);
/// assert_eq!(member.get(), Some(2));
/// assert!(!SeedMembership::NONE.is_seed());
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct SeedMembership(Option<usize>);

impl SeedMembership {
    /// Marker for nodes that do not belong to any seed graph.
    pub const NONE: Self = Self(None);

    /// Wire value used for [`Self::NONE`].
    pub const SENTINEL: i64 = -1;

    /// Membership in the seed graph at position `index`.
    #[must_use]
    pub const fn seed(index: usize) -> Self {
        Self(Some(index))
    }

    /// Returns the seed graph position, if any.
    #[must_use]
    pub const fn get(self) -> Option<usize> {
        self.0
    }

    /// Returns `true` when the node was copied from a seed graph.
    #[must_use]
    pub const fn is_seed(self) -> bool {
        self.0.is_some()
    }

    /// Returns `true` when the node belongs to the seed graph at `index`.
    #[must_use]
    pub fn is_seed_of(self, index: usize) -> bool {
        self.0 == Some(index)
    }
}

impl Serialize for SeedMembership {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(index) => {
                let value = i64::try_from(index).map_err(ser::Error::custom)?;
                serializer.serialize_i64(value)
            }
            None => serializer.serialize_i64(Self::SENTINEL),
        }
    }
}

impl<'de> Deserialize<'de> for SeedMembership {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        if raw == Self::SENTINEL {
            return Ok(Self::NONE);
        }
        usize::try_from(raw)
            .map(Self::seed)
            .map_err(|_| de::Error::custom(format!("invalid seed graph index {raw}")))
    }
}

/// A graph in the visual graph dataset interchange format.
///
/// # Examples
/// ```
/// use vgd_core::Graph;
///
/// let graph = Graph::new(
///     vec![vec![1.0], vec![0.5]],
///     vec![[0, 1], [1, 0]],
///     vec![vec![1.0], vec![1.0]],
/// );
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.node_indices(), &[0, 1]);
/// assert!(graph.validate().is_ok());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    node_indices: Vec<usize>,
    node_attributes: Vec<Vec<f32>>,
    edge_indices: Vec<Edge>,
    edge_attributes: Vec<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    node_adjacency: Option<Vec<Vec<u8>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seed_graph_indices: Option<Vec<SeedMembership>>,
}

impl Graph {
    /// Builds a graph whose node indices are `0..node_attributes.len()`.
    #[must_use]
    pub fn new(
        node_attributes: Vec<Vec<f32>>,
        edge_indices: Vec<Edge>,
        edge_attributes: Vec<Vec<f32>>,
    ) -> Self {
        Self {
            node_indices: (0..node_attributes.len()).collect(),
            node_attributes,
            edge_indices,
            edge_attributes,
            node_adjacency: None,
            seed_graph_indices: None,
        }
    }

    /// Attaches the per-node seed membership recorded during generation.
    #[must_use]
    pub fn with_seed_graph_indices(mut self, seed_graph_indices: Vec<SeedMembership>) -> Self {
        self.seed_graph_indices = Some(seed_graph_indices);
        self
    }

    /// Derives and attaches `node_adjacency` from the current edges.
    #[must_use]
    pub fn with_derived_adjacency(mut self) -> Self {
        self.node_adjacency = Some(node_adjacency_from_edge_indices(
            self.node_count(),
            &self.edge_indices,
        ));
        self
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_indices.len()
    }

    /// Number of directed edge slots.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_indices.len()
    }

    /// Node indices, always `0..n` for valid graphs.
    #[must_use]
    pub fn node_indices(&self) -> &[usize] {
        &self.node_indices
    }

    /// Per-node feature vectors.
    #[must_use]
    pub fn node_attributes(&self) -> &[Vec<f32>] {
        &self.node_attributes
    }

    /// Directed edges in slot order.
    #[must_use]
    pub fn edge_indices(&self) -> &[Edge] {
        &self.edge_indices
    }

    /// Per-edge feature vectors, parallel to [`Self::edge_indices`].
    #[must_use]
    pub fn edge_attributes(&self) -> &[Vec<f32>] {
        &self.edge_attributes
    }

    /// The 0/1 adjacency matrix, when present.
    #[must_use]
    pub fn node_adjacency(&self) -> Option<&[Vec<u8>]> {
        self.node_adjacency.as_deref()
    }

    /// Per-node seed membership, when present.
    #[must_use]
    pub fn seed_graph_indices(&self) -> Option<&[SeedMembership]> {
        self.seed_graph_indices.as_deref()
    }

    /// Indicator over nodes: `1` where the node was copied from seed graph `seed`.
    ///
    /// Graphs without recorded seed membership yield all zeros.
    #[must_use]
    pub fn seed_membership_vector(&self, seed: usize) -> Vec<u8> {
        match &self.seed_graph_indices {
            Some(indices) => provenance::seed_membership_vector(indices, seed),
            None => vec![0; self.node_count()],
        }
    }

    /// Indicator over edge slots: `1` where both endpoints belong to seed graph `seed`.
    #[must_use]
    pub fn seed_edge_membership_vector(&self, seed: usize) -> Vec<u8> {
        match &self.seed_graph_indices {
            Some(indices) => {
                provenance::seed_edge_membership_vector(indices, &self.edge_indices, seed)
            }
            None => vec![0; self.edge_count()],
        }
    }
}

/// Builds the `node_count × node_count` adjacency matrix for `edges`.
///
/// Each directed edge `(i, j)` sets `adjacency[i][j] = 1`. Undirected graphs
/// already store both orientations, so no symmetrisation happens here.
/// Endpoints outside `0..node_count` are ignored.
///
/// # Examples
/// ```
/// use vgd_core::node_adjacency_from_edge_indices;
///
/// let adjacency = node_adjacency_from_edge_indices(3, &[[0, 1], [2, 0]]);
/// assert_eq!(adjacency, vec![vec![0, 1, 0], vec![0, 0, 0], vec![1, 0, 0]]);
/// ```
#[must_use]
pub fn node_adjacency_from_edge_indices(node_count: usize, edges: &[Edge]) -> Vec<Vec<u8>> {
    let mut adjacency = vec![vec![0_u8; node_count]; node_count];
    for &[i, j] in edges {
        if let Some(cell) = adjacency.get_mut(i).and_then(|row| row.get_mut(j)) {
            *cell = 1;
        }
    }
    adjacency
}

#[cfg(test)]
mod tests;
