//! Visual graph dataset core library.
//!
//! Provides the [`Graph`] interchange type, the seeded incremental
//! [`GraphGenerator`], seed provenance queries and the [`mock`] dataset
//! synthesiser built on top of them.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod generator;
mod graph;
pub mod mock;
mod provenance;

pub use crate::{
    error::{GenerationError, GenerationErrorCode, GraphError, GraphErrorCode, Result},
    generator::{
        DEFAULT_MAX_EDGE_ATTEMPTS, EdgeAttributesFn, EdgeValidFn, GraphGenerator,
        GraphGeneratorBuilder, GraphView, NodeAttributesFn,
    },
    graph::{
        Edge, Graph, REQUIRED_GRAPH_KEYS, SeedMembership, node_adjacency_from_edge_indices,
        validate_graph_value,
    },
};
