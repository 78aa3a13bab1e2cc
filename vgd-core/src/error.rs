//! Error types for the visual graph dataset core library.
//!
//! Defines the error enums exposed by the public API together with stable,
//! machine-readable codes for each variant.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// A structural problem found while validating a [`crate::Graph`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// The value handed to [`crate::validate_graph_value`] was not a JSON object.
    #[error("graph value must be a JSON object")]
    NotAnObject,
    /// A required graph key was absent.
    #[error("graph is missing the required key `{key}`")]
    MissingKey {
        /// Name of the missing key.
        key: &'static str,
    },
    /// A required graph key did not hold an array.
    #[error("graph key `{key}` must hold an array")]
    NotAnArray {
        /// Name of the offending key.
        key: &'static str,
    },
    /// `node_indices` was not the contiguous range `0..n`.
    #[error("node_indices must enumerate 0..n, found {found} at position {position}")]
    NonContiguousNodeIndices {
        /// Position inside `node_indices`.
        position: usize,
        /// Value stored at that position.
        found: usize,
    },
    /// `node_attributes` did not provide one vector per node.
    #[error("expected {expected} node attribute vectors, found {found}")]
    NodeAttributeCount {
        /// Number of nodes in the graph.
        expected: usize,
        /// Number of node attribute vectors supplied.
        found: usize,
    },
    /// `edge_attributes` did not provide one vector per edge.
    #[error("expected {expected} edge attribute vectors, found {found}")]
    EdgeAttributeCount {
        /// Number of edges in the graph.
        expected: usize,
        /// Number of edge attribute vectors supplied.
        found: usize,
    },
    /// Node attribute vectors disagree on their dimension.
    #[error("node {node} has {found} attributes but the first node has {expected}")]
    NodeDimensionMismatch {
        /// Offending node.
        node: usize,
        /// Dimension of the first node.
        expected: usize,
        /// Dimension of the offending node.
        found: usize,
    },
    /// Edge attribute vectors disagree on their dimension.
    #[error("edge {edge} has {found} attributes but the first edge has {expected}")]
    EdgeDimensionMismatch {
        /// Offending edge slot.
        edge: usize,
        /// Dimension of the first edge.
        expected: usize,
        /// Dimension of the offending edge.
        found: usize,
    },
    /// An edge referenced a node outside the graph.
    #[error("edge {edge} references node {node} but the graph has {node_count} nodes")]
    EdgeOutOfRange {
        /// Offending edge slot.
        edge: usize,
        /// Node index referenced by the edge.
        node: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// The adjacency matrix was not `n × n`.
    #[error("node_adjacency must be {node_count}x{node_count}")]
    AdjacencyShape {
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// `seed_graph_indices` did not provide one entry per node.
    #[error("expected {expected} seed graph indices, found {found}")]
    SeedIndexCount {
        /// Number of nodes in the graph.
        expected: usize,
        /// Number of entries supplied.
        found: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// The value was not a JSON object.
        NotAnObject => NotAnObject => "GRAPH_NOT_AN_OBJECT",
        /// A required key was absent.
        MissingKey => MissingKey { .. } => "GRAPH_MISSING_KEY",
        /// A required key did not hold an array.
        NotAnArray => NotAnArray { .. } => "GRAPH_NOT_AN_ARRAY",
        /// `node_indices` was not `0..n`.
        NonContiguousNodeIndices => NonContiguousNodeIndices { .. } => "GRAPH_NON_CONTIGUOUS_NODE_INDICES",
        /// Node attribute count mismatch.
        NodeAttributeCount => NodeAttributeCount { .. } => "GRAPH_NODE_ATTRIBUTE_COUNT",
        /// Edge attribute count mismatch.
        EdgeAttributeCount => EdgeAttributeCount { .. } => "GRAPH_EDGE_ATTRIBUTE_COUNT",
        /// Node attribute dimension mismatch.
        NodeDimensionMismatch => NodeDimensionMismatch { .. } => "GRAPH_NODE_DIMENSION_MISMATCH",
        /// Edge attribute dimension mismatch.
        EdgeDimensionMismatch => EdgeDimensionMismatch { .. } => "GRAPH_EDGE_DIMENSION_MISMATCH",
        /// Edge endpoint out of range.
        EdgeOutOfRange => EdgeOutOfRange { .. } => "GRAPH_EDGE_OUT_OF_RANGE",
        /// Adjacency matrix shape mismatch.
        AdjacencyShape => AdjacencyShape { .. } => "GRAPH_ADJACENCY_SHAPE",
        /// Seed index count mismatch.
        SeedIndexCount => SeedIndexCount { .. } => "GRAPH_SEED_INDEX_COUNT",
    }
}

/// Error type produced when configuring or running a [`crate::GraphGenerator`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GenerationError {
    /// Too few additional edges were requested to join every seed cluster.
    #[error(
        "num_additional_edges ({requested}) must be at least the number of seed graphs - 1 ({required}) to keep the graph connected"
    )]
    InsufficientAdditionalEdges {
        /// Additional edges requested by the caller.
        requested: usize,
        /// Minimum required by the supplied seed graphs.
        required: usize,
    },
    /// Parameters were invalid for the current configuration.
    #[error("invalid generator parameter: {reason}")]
    InvalidParameters {
        /// Human-readable explanation.
        reason: String,
    },
    /// The seed graphs need more nodes than the generated graph provides.
    #[error("seed graphs contain {seed_nodes} nodes but num_nodes is {num_nodes}")]
    SeedGraphsTooLarge {
        /// Combined node count of all seed graphs.
        seed_nodes: usize,
        /// Requested node count of the generated graph.
        num_nodes: usize,
    },
    /// A seed graph failed shape validation.
    #[error("seed graph {index} is malformed: {error}")]
    InvalidSeedGraph {
        /// Position of the seed graph in the supplied list.
        index: usize,
        #[source]
        /// Underlying validation failure.
        error: GraphError,
    },
    /// `generate` was called again without an intervening `reset`.
    #[error("generate() must be preceded by reset() once a graph has been produced")]
    NotReset,
    /// The additional-edge loop exhausted its attempt budget.
    #[error(
        "gave up inserting additional edges after {attempts} rejected attempts with {remaining} edges still missing"
    )]
    UnsatisfiableEdges {
        /// Additional edges that could not be placed.
        remaining: usize,
        /// Rejected draws before giving up.
        attempts: usize,
    },
    /// An insertion would have exceeded the precomputed edge capacity.
    #[error("edge capacity of {capacity} slots exceeded")]
    EdgeCapacityExceeded {
        /// Number of edge slots reserved for the run.
        capacity: usize,
    },
    /// Internal generator state became inconsistent.
    #[error("generator invariant violated: {message}")]
    InvariantViolation {
        /// Description of the broken invariant.
        message: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`GenerationError`] variants.
    enum GenerationErrorCode for GenerationError {
        /// Too few additional edges for the seed graphs.
        InsufficientAdditionalEdges => InsufficientAdditionalEdges { .. } => "GENERATION_INSUFFICIENT_ADDITIONAL_EDGES",
        /// Invalid parameters.
        InvalidParameters => InvalidParameters { .. } => "GENERATION_INVALID_PARAMETERS",
        /// Seed graphs exceed the node budget.
        SeedGraphsTooLarge => SeedGraphsTooLarge { .. } => "GENERATION_SEED_GRAPHS_TOO_LARGE",
        /// Malformed seed graph.
        InvalidSeedGraph => InvalidSeedGraph { .. } => "GENERATION_INVALID_SEED_GRAPH",
        /// `generate` without `reset`.
        NotReset => NotReset => "GENERATION_NOT_RESET",
        /// Attempt budget exhausted.
        UnsatisfiableEdges => UnsatisfiableEdges { .. } => "GENERATION_UNSATISFIABLE_EDGES",
        /// Edge capacity exceeded.
        EdgeCapacityExceeded => EdgeCapacityExceeded { .. } => "GENERATION_EDGE_CAPACITY_EXCEEDED",
        /// Internal invariant violated.
        InvariantViolation => InvariantViolation { .. } => "GENERATION_INVARIANT_VIOLATION",
    }
}

impl GenerationError {
    /// Retrieve the inner [`GraphErrorCode`] when a seed graph failed validation.
    #[must_use]
    pub const fn graph_code(&self) -> Option<GraphErrorCode> {
        match self {
            Self::InvalidSeedGraph { error, .. } => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the generator API.
pub type Result<T> = core::result::Result<T, GenerationError>;
