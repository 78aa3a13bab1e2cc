use super::*;

use rstest::rstest;
use serde_json::json;

use crate::error::GraphError;

fn path_graph() -> Graph {
    Graph::new(
        vec![vec![0.1, 0.2]; 3],
        vec![[0, 1], [1, 0], [1, 2], [2, 1]],
        vec![vec![1.0]; 4],
    )
}

#[test]
fn seed_sentinel_survives_json_round_trip() {
    let graph = path_graph()
        .with_seed_graph_indices(vec![
            SeedMembership::seed(0),
            SeedMembership::NONE,
            SeedMembership::seed(1),
        ])
        .with_derived_adjacency();

    let value = serde_json::to_value(&graph).expect("graph serialises");
    assert_eq!(value["seed_graph_indices"], json!([0, -1, 1]));

    let restored: Graph = serde_json::from_value(value).expect("graph deserialises");
    assert_eq!(restored, graph);
}

#[test]
fn optional_fields_are_omitted_when_absent() {
    let value = serde_json::to_value(path_graph()).expect("graph serialises");
    let object = value.as_object().expect("graphs serialise to objects");
    assert!(!object.contains_key("node_adjacency"));
    assert!(!object.contains_key("seed_graph_indices"));
    assert!(validate_graph_value(&value).is_ok());
}

#[test]
fn negative_seed_indices_other_than_sentinel_are_rejected() {
    let value = json!({
        "node_indices": [0],
        "node_attributes": [[1.0]],
        "edge_indices": [],
        "edge_attributes": [],
        "seed_graph_indices": [-2],
    });
    assert!(serde_json::from_value::<Graph>(value).is_err());
}

#[rstest]
#[case::not_object(json!([1, 2]), GraphError::NotAnObject)]
#[case::missing(
    json!({ "node_indices": [], "node_attributes": [], "edge_indices": [] }),
    GraphError::MissingKey { key: "edge_attributes" },
)]
#[case::not_array(
    json!({
        "node_indices": [],
        "node_attributes": {},
        "edge_indices": [],
        "edge_attributes": [],
    }),
    GraphError::NotAnArray { key: "node_attributes" },
)]
fn value_check_reports_first_problem(#[case] value: serde_json::Value, #[case] expected: GraphError) {
    assert_eq!(validate_graph_value(&value), Err(expected));
}

#[rstest]
#[case::node_attribute_count(
    Graph::new(vec![vec![1.0]; 2], Vec::new(), Vec::new()),
    |g: &mut Graph| { g.node_attributes.pop(); },
    GraphError::NodeAttributeCount { expected: 2, found: 1 },
)]
#[case::edge_attribute_count(
    Graph::new(vec![vec![1.0]; 2], vec![[0, 1]], vec![vec![1.0]]),
    |g: &mut Graph| { g.edge_attributes.push(vec![1.0]); },
    GraphError::EdgeAttributeCount { expected: 1, found: 2 },
)]
#[case::non_contiguous(
    Graph::new(vec![vec![1.0]; 3], Vec::new(), Vec::new()),
    |g: &mut Graph| { g.node_indices[1] = 5; },
    GraphError::NonContiguousNodeIndices { position: 1, found: 5 },
)]
#[case::node_dimension(
    Graph::new(vec![vec![1.0], vec![1.0, 2.0]], Vec::new(), Vec::new()),
    |_: &mut Graph| {},
    GraphError::NodeDimensionMismatch { node: 1, expected: 1, found: 2 },
)]
#[case::edge_dimension(
    Graph::new(vec![vec![1.0]; 2], vec![[0, 1], [1, 0]], vec![vec![1.0], Vec::new()]),
    |_: &mut Graph| {},
    GraphError::EdgeDimensionMismatch { edge: 1, expected: 1, found: 0 },
)]
#[case::edge_range(
    Graph::new(vec![vec![1.0]; 2], vec![[0, 1], [1, 2]], vec![vec![1.0]; 2]),
    |_: &mut Graph| {},
    GraphError::EdgeOutOfRange { edge: 1, node: 2, node_count: 2 },
)]
#[case::adjacency(
    Graph::new(vec![vec![1.0]; 2], Vec::new(), Vec::new()),
    |g: &mut Graph| { g.node_adjacency = Some(vec![vec![0, 0]]); },
    GraphError::AdjacencyShape { node_count: 2 },
)]
#[case::seed_indices(
    Graph::new(vec![vec![1.0]; 2], Vec::new(), Vec::new()),
    |g: &mut Graph| { g.seed_graph_indices = Some(vec![SeedMembership::NONE]); },
    GraphError::SeedIndexCount { expected: 2, found: 1 },
)]
fn validate_reports_structural_problems(
    #[case] mut graph: Graph,
    #[case] corrupt: fn(&mut Graph),
    #[case] expected: GraphError,
) {
    corrupt(&mut graph);
    assert_eq!(graph.validate(), Err(expected));
}

#[test]
fn derived_adjacency_matches_edges() {
    let graph = path_graph().with_derived_adjacency();
    let adjacency = graph.node_adjacency().expect("adjacency was derived");
    assert_eq!(adjacency, &[vec![0, 1, 0], vec![1, 0, 1], vec![0, 1, 0]]);
    assert!(graph.validate().is_ok());
}

#[test]
fn adjacency_ignores_out_of_range_endpoints() {
    let adjacency = node_adjacency_from_edge_indices(2, &[[0, 1], [1, 7]]);
    assert_eq!(adjacency, vec![vec![0, 1], vec![0, 0]]);
}

#[test]
fn membership_vectors_default_to_zero_without_seeds() {
    let graph = path_graph();
    assert_eq!(graph.seed_membership_vector(0), vec![0, 0, 0]);
    assert_eq!(graph.seed_edge_membership_vector(0), vec![0, 0, 0, 0]);
}

#[test]
fn membership_vectors_follow_seed_indices() {
    let graph = path_graph().with_seed_graph_indices(vec![
        SeedMembership::seed(0),
        SeedMembership::seed(0),
        SeedMembership::NONE,
    ]);
    assert_eq!(graph.seed_membership_vector(0), vec![1, 1, 0]);
    assert_eq!(graph.seed_edge_membership_vector(0), vec![1, 1, 0, 0]);
}
