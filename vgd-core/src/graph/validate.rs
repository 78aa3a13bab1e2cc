//! Structural validation for [`Graph`] values.

use serde_json::Value;

use super::Graph;
use crate::error::GraphError;

/// Keys every serialised graph must carry, each holding an array.
pub const REQUIRED_GRAPH_KEYS: [&str; 4] = [
    "node_indices",
    "node_attributes",
    "edge_indices",
    "edge_attributes",
];

/// Checks that `value` looks like a serialised graph.
///
/// This is the acceptance test applied by downstream consumers: the value
/// must be an object holding every key in [`REQUIRED_GRAPH_KEYS`] as an array.
/// Array contents are not inspected; use [`Graph::validate`] for that.
///
/// # Errors
/// Returns [`GraphError::NotAnObject`], [`GraphError::MissingKey`] or
/// [`GraphError::NotAnArray`].
///
/// # Examples
/// ```
/// use serde_json::json;
/// use vgd_core::{GraphError, validate_graph_value};
///
/// let value = json!({
///     "node_indices": [0],
///     "node_attributes": [[1.0]],
///     "edge_indices": [],
///     "edge_attributes": [],
/// });
/// assert!(validate_graph_value(&value).is_ok());
///
/// let err = validate_graph_value(&json!({ "node_indices": [] }))
///     .expect_err("incomplete graphs are rejected");
/// assert_eq!(err, GraphError::MissingKey { key: "node_attributes" });
/// ```
pub fn validate_graph_value(value: &Value) -> Result<(), GraphError> {
    let object = value.as_object().ok_or(GraphError::NotAnObject)?;
    for key in REQUIRED_GRAPH_KEYS {
        let entry = object.get(key).ok_or(GraphError::MissingKey { key })?;
        if !entry.is_array() {
            return Err(GraphError::NotAnArray { key });
        }
    }
    Ok(())
}

impl Graph {
    /// Checks the internal consistency of the parallel arrays.
    ///
    /// # Errors
    /// Returns the first [`GraphError`] found: non-contiguous node indices,
    /// attribute counts that do not match the node or edge counts, attribute
    /// vectors of differing dimension, edges referencing unknown nodes, a
    /// mis-shaped adjacency matrix, or a seed index array of the wrong length.
    pub fn validate(&self) -> Result<(), GraphError> {
        let node_count = self.node_count();
        if let Some((position, &found)) = self
            .node_indices
            .iter()
            .enumerate()
            .find(|&(position, &index)| position != index)
        {
            return Err(GraphError::NonContiguousNodeIndices { position, found });
        }
        if self.node_attributes.len() != node_count {
            return Err(GraphError::NodeAttributeCount {
                expected: node_count,
                found: self.node_attributes.len(),
            });
        }
        if self.edge_attributes.len() != self.edge_count() {
            return Err(GraphError::EdgeAttributeCount {
                expected: self.edge_count(),
                found: self.edge_attributes.len(),
            });
        }
        if let Some((node, expected, found)) = first_dimension_mismatch(&self.node_attributes) {
            return Err(GraphError::NodeDimensionMismatch {
                node,
                expected,
                found,
            });
        }
        if let Some((edge, expected, found)) = first_dimension_mismatch(&self.edge_attributes) {
            return Err(GraphError::EdgeDimensionMismatch {
                edge,
                expected,
                found,
            });
        }
        for (edge, pair) in self.edge_indices.iter().enumerate() {
            if let Some(&node) = pair.iter().find(|&&node| node >= node_count) {
                return Err(GraphError::EdgeOutOfRange {
                    edge,
                    node,
                    node_count,
                });
            }
        }
        if let Some(adjacency) = &self.node_adjacency {
            if adjacency.len() != node_count || adjacency.iter().any(|row| row.len() != node_count)
            {
                return Err(GraphError::AdjacencyShape { node_count });
            }
        }
        if let Some(seeds) = &self.seed_graph_indices {
            if seeds.len() != node_count {
                return Err(GraphError::SeedIndexCount {
                    expected: node_count,
                    found: seeds.len(),
                });
            }
        }
        Ok(())
    }
}

fn first_dimension_mismatch(vectors: &[Vec<f32>]) -> Option<(usize, usize, usize)> {
    let expected = vectors.first()?.len();
    vectors
        .iter()
        .enumerate()
        .find(|(_, vector)| vector.len() != expected)
        .map(|(index, vector)| (index, expected, vector.len()))
}
