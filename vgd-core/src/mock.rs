//! Mock visual graph dataset synthesis.
//!
//! Produces small undirected graphs in which roughly half of the elements
//! embed a triangle motif. The motif is the ground-truth explanation of the
//! second class, so every element carries labels and two-channel node and edge
//! importances alongside its train/test split metadata. Rendering is left to
//! downstream tooling; only the JSON metadata is produced here.

use std::{collections::HashSet, ops::RangeInclusive};

use rand::{Rng, SeedableRng, rngs::SmallRng, seq::index};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{GenerationError, Graph, GraphGenerator, Result};

/// Settings for [`generate_mock_dataset`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockDatasetConfig {
    /// Number of dataset elements to produce.
    pub elements: usize,
    /// Inclusive range the node count of each graph is drawn from.
    pub num_nodes: RangeInclusive<usize>,
    /// Inclusive range the additional edge count of each graph is drawn from.
    pub additional_edges: RangeInclusive<usize>,
    /// Percentage of elements assigned to the train split.
    pub train_percent: u8,
    /// Seed for reproducible datasets; `None` draws from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for MockDatasetConfig {
    fn default() -> Self {
        Self {
            elements: 100,
            num_nodes: 10..=20,
            additional_edges: 1..=3,
            train_percent: 80,
            rng_seed: None,
        }
    }
}

impl MockDatasetConfig {
    /// Checks that every element can be generated.
    ///
    /// # Errors
    /// Returns [`GenerationError::InvalidParameters`] when a range is empty,
    /// `train_percent` exceeds 100, graphs are too small to hold the motif, or
    /// the smallest graph cannot fit the largest additional edge budget.
    pub fn validate(&self) -> Result<()> {
        if self.num_nodes.is_empty() || self.additional_edges.is_empty() {
            return Err(invalid("node and additional edge ranges must not be empty"));
        }
        if self.train_percent > 100 {
            return Err(invalid(format!(
                "train_percent must be at most 100, got {}",
                self.train_percent
            )));
        }
        let smallest = *self.num_nodes.start();
        let motif_nodes = triangle_motif().node_count();
        if smallest < motif_nodes {
            return Err(invalid(format!(
                "graphs need at least {motif_nodes} nodes to embed the motif, got {smallest}"
            )));
        }
        // Node pairs left once the motif and the spanning tree are placed.
        let spare = smallest * (smallest - 1) / 2 - smallest;
        let largest_budget = *self.additional_edges.end();
        if largest_budget > spare {
            return Err(invalid(format!(
                "a {smallest}-node graph has room for {spare} additional edges, not {largest_budget}"
            )));
        }
        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> GenerationError {
    GenerationError::InvalidParameters {
        reason: reason.into(),
    }
}

/// The explanatory motif: three fully connected nodes stored undirected.
///
/// # Examples
/// ```
/// use vgd_core::mock::triangle_motif;
///
/// let motif = triangle_motif();
/// assert_eq!(motif.node_count(), 3);
/// assert_eq!(motif.edge_count(), 6);
/// assert!(motif.validate().is_ok());
/// ```
#[must_use]
pub fn triangle_motif() -> Graph {
    Graph::new(
        vec![vec![1.0]; 3],
        vec![[0, 1], [1, 0], [1, 2], [2, 1], [2, 0], [0, 2]],
        vec![vec![1.0]; 6],
    )
}

/// Class label of elements without the motif.
pub const LABEL_WITHOUT_MOTIF: [u8; 2] = [1, 0];

/// Class label of elements embedding the motif.
pub const LABEL_WITH_MOTIF: [u8; 2] = [0, 1];

/// Dataset split an element belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    /// Training split.
    Train,
    /// Held-out test split.
    Test,
}

/// A generated graph annotated with its label and ground-truth importances.
///
/// Importances have one row per node (or edge) and one column per class;
/// column 0 is always zero and column 1 marks the motif.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MockGraph {
    /// The generated graph.
    #[serde(flatten)]
    pub graph: Graph,
    /// One-hot class label.
    pub graph_labels: [u8; 2],
    /// Per-node importance for each class.
    pub node_importances_2: Vec<[u8; 2]>,
    /// Per-edge importance for each class.
    pub edge_importances_2: Vec<[u8; 2]>,
}

impl MockGraph {
    /// Returns `true` when the motif was embedded.
    #[must_use]
    pub fn has_motif(&self) -> bool {
        self.graph_labels == LABEL_WITH_MOTIF
    }
}

/// Metadata of one dataset element, written as `<index>.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MockElement {
    /// Position of the element in the dataset.
    pub index: usize,
    /// Split the element belongs to.
    pub split: Split,
    /// `[1]` for train elements, empty otherwise.
    pub train_split: Vec<u8>,
    /// `[1]` for test elements, empty otherwise.
    pub test_split: Vec<u8>,
    /// Regression/classification target; equals the graph label.
    pub target: [u8; 2],
    /// The annotated graph.
    pub graph: MockGraph,
}

/// Generates a full mock dataset in memory.
///
/// # Errors
/// Returns the error of [`MockDatasetConfig::validate`] or of the underlying
/// [`GraphGenerator`].
///
/// # Examples
/// ```
/// use vgd_core::mock::{MockDatasetConfig, Split, generate_mock_dataset};
///
/// let config = MockDatasetConfig {
///     elements: 10,
///     rng_seed: Some(5),
///     ..MockDatasetConfig::default()
/// };
/// let dataset = generate_mock_dataset(&config).expect("defaults are valid");
/// assert_eq!(dataset.len(), 10);
/// assert_eq!(dataset.iter().filter(|e| e.split == Split::Train).count(), 8);
/// ```
#[instrument(
    name = "mock.generate",
    err,
    skip(config),
    fields(elements = config.elements, train_percent = config.train_percent),
)]
pub fn generate_mock_dataset(config: &MockDatasetConfig) -> Result<Vec<MockElement>> {
    config.validate()?;
    let mut rng = match config.rng_seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let mut graphs = Vec::with_capacity(config.elements);
    for index in 0..config.elements {
        let graph = generate_mock_graph(config, &mut rng)?;
        debug!(
            index,
            nodes = graph.graph.node_count(),
            edges = graph.graph.edge_count(),
            motif = graph.has_motif(),
            "mock graph generated"
        );
        graphs.push(graph);
    }

    let train_count = config.elements * usize::from(config.train_percent) / 100;
    let train: HashSet<usize> = index::sample(&mut rng, config.elements, train_count)
        .into_iter()
        .collect();
    info!(
        elements = graphs.len(),
        train = train.len(),
        test = graphs.len() - train.len(),
        "mock dataset generated"
    );

    Ok(graphs
        .into_iter()
        .enumerate()
        .map(|(index, graph)| {
            let in_train = train.contains(&index);
            MockElement {
                index,
                split: if in_train { Split::Train } else { Split::Test },
                train_split: if in_train { vec![1] } else { Vec::new() },
                test_split: if in_train { Vec::new() } else { vec![1] },
                target: graph.graph_labels,
                graph,
            }
        })
        .collect())
}

fn generate_mock_graph(config: &MockDatasetConfig, rng: &mut SmallRng) -> Result<MockGraph> {
    let num_nodes = rng.gen_range(config.num_nodes.clone());
    let additional_edges = rng.gen_range(config.additional_edges.clone());
    let embed = rng.gen_bool(0.5);
    let (seed_graphs, graph_labels) = if embed {
        (vec![triangle_motif()], LABEL_WITH_MOTIF)
    } else {
        (Vec::new(), LABEL_WITHOUT_MOTIF)
    };

    let mut attribute_rng = SmallRng::seed_from_u64(rng.r#gen());
    let mut generator = GraphGenerator::builder(num_nodes, additional_edges)
        .with_node_attributes(move |_, _| vec![attribute_rng.r#gen::<f32>()])
        .with_seed_graphs(seed_graphs)
        .with_prevent_edges_in_seed_graphs(true)
        .with_rng_seed(rng.r#gen())
        .build()?;
    let graph = generator.generate()?;

    let node_importances_2 = importance_columns(generator.seed_membership_vector(0));
    let edge_importances_2 = importance_columns(generator.seed_edge_membership_vector(0));
    Ok(MockGraph {
        graph,
        graph_labels,
        node_importances_2,
        edge_importances_2,
    })
}

fn importance_columns(membership: Vec<u8>) -> Vec<[u8; 2]> {
    membership.into_iter().map(|flag| [0, flag]).collect()
}
