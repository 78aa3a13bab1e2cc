//! Unit tests for the CLI commands and seed graph loading.

use super::commands::{element_path, load_seed_graph, run_generate};
use super::test_helpers::{
    TRIANGLE_JSON, generate_command, run_generate_expecting_error, temp_dir, write_file,
};
use super::{Cli, CliError, Command, ExecutionSummary, MockCommand, render_summary, run_cli};

use std::fs;

use clap::Parser;
use rstest::rstest;
use tracing_subscriber::layer::SubscriberExt;
use vgd_core::{GenerationError, GraphError, GraphErrorCode, SeedMembership, mock::MockElement};
use vgd_test_support::{graph::is_connected, tracing::CaptureLayer};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn generated(summary: ExecutionSummary) -> Vec<vgd_core::Graph> {
    match summary {
        ExecutionSummary::Generated { graphs } => graphs,
        other => panic!("expected generated graphs, got {other:?}"),
    }
}

#[rstest]
#[case(1, false)]
#[case(4, false)]
#[case(3, true)]
fn generate_produces_requested_graphs(#[case] count: usize, #[case] directed: bool) -> TestResult {
    let mut command = generate_command(12, 2);
    command.count = count;
    command.directed = directed;
    let graphs = generated(run_generate(command)?);

    assert_eq!(graphs.len(), count);
    let step = if directed { 1 } else { 2 };
    for graph in &graphs {
        assert_eq!(graph.node_count(), 12);
        assert_eq!(graph.edge_count(), (11 + 2) * step);
        assert!(is_connected(graph));
    }
    Ok(())
}

#[test]
fn generate_is_reproducible_with_a_seed() -> TestResult {
    let mut command = generate_command(20, 3);
    command.count = 3;
    let first = generated(run_generate(command.clone())?);
    let second = generated(run_generate(command)?);
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn generate_embeds_seed_graph_files() -> TestResult {
    let dir = temp_dir();
    let path = write_file(&dir, "triangle.json", TRIANGLE_JSON)?;
    let mut command = generate_command(10, 1);
    command.seed_graphs = vec![path];
    let graphs = generated(run_generate(command)?);

    let memberships = graphs[0]
        .seed_graph_indices()
        .ok_or("generated graphs record seed membership")?;
    let members = memberships
        .iter()
        .filter(|&&membership| membership == SeedMembership::seed(0))
        .count();
    assert_eq!(members, 3);
    Ok(())
}

#[test]
fn load_seed_graph_reports_missing_files() {
    let dir = temp_dir();
    let missing = dir.path().join("absent.json");
    let err = load_seed_graph(&missing).expect_err("missing file must fail");
    assert!(matches!(err, CliError::Io { ref path, .. } if path == &missing));
    assert_eq!(err.code(), "CLI_IO");
}

#[test]
fn load_seed_graph_reports_malformed_json() -> TestResult {
    let dir = temp_dir();
    let path = write_file(&dir, "broken.json", "{ not json")?;
    let err = load_seed_graph(&path).expect_err("malformed JSON must fail");
    assert!(matches!(err, CliError::Json { .. }));
    Ok(())
}

#[test]
fn load_seed_graph_rejects_incomplete_graphs() -> TestResult {
    let dir = temp_dir();
    let path = write_file(&dir, "partial.json", r#"{"node_indices": [0]}"#)?;
    let err = load_seed_graph(&path).expect_err("incomplete graph must fail");
    assert!(matches!(
        err,
        CliError::Graph {
            source: GraphError::MissingKey { key: "node_attributes" },
            ..
        }
    ));
    assert_eq!(err.code(), "CLI_INVALID_GRAPH");
    assert_eq!(err.graph_code(), Some(GraphErrorCode::MissingKey));
    Ok(())
}

#[test]
fn generate_rejects_malformed_seed_structure() -> TestResult {
    let dir = temp_dir();
    let body = r#"{
        "node_indices": [0, 1],
        "node_attributes": [[1.0], [1.0]],
        "edge_indices": [[0, 4]],
        "edge_attributes": [[1.0]]
    }"#;
    let path = write_file(&dir, "dangling.json", body)?;
    let mut command = generate_command(10, 0);
    command.seed_graphs = vec![path];
    let err = run_generate_expecting_error(command, "dangling edge must fail");
    assert!(matches!(
        err,
        CliError::Generation(GenerationError::InvalidSeedGraph { index: 0, .. })
    ));
    assert_eq!(err.graph_code(), Some(GraphErrorCode::EdgeOutOfRange));
    Ok(())
}

#[test]
fn generate_enforces_connecting_edge_budget() -> TestResult {
    let dir = temp_dir();
    let path = write_file(&dir, "triangle.json", TRIANGLE_JSON)?;
    let mut command = generate_command(20, 1);
    command.seed_graphs = vec![path.clone(), path.clone(), path];
    let err = run_generate_expecting_error(command, "three seeds need two edges");
    assert_eq!(err.code(), "GENERATION_INSUFFICIENT_ADDITIONAL_EDGES");
    Ok(())
}

#[rstest]
#[case::overflowing(usize::MAX / 2)]
#[case::beyond_free_pairs(1_000_000_000_000)]
fn generate_rejects_oversized_edge_budgets(#[case] additional: usize) {
    let err = run_generate_expecting_error(
        generate_command(5, additional),
        "five nodes cannot hold the budget",
    );
    assert!(matches!(
        err,
        CliError::Generation(GenerationError::InvalidParameters { .. })
    ));
    assert_eq!(err.code(), "GENERATION_INVALID_PARAMETERS");
}

#[rstest]
#[case::defaults(&["vgd", "generate", "--num-nodes", "5"], true)]
#[case::unbounded(&["vgd", "generate", "--num-nodes", "5", "--unbounded-attempts"], true)]
#[case::conflict(
    &["vgd", "generate", "--num-nodes", "5", "--unbounded-attempts", "--max-edge-attempts", "9"],
    false,
)]
#[case::zero_attempts(&["vgd", "generate", "--num-nodes", "5", "--max-edge-attempts", "0"], false)]
#[case::missing_nodes(&["vgd", "generate"], false)]
#[case::mock(&["vgd", "mock", "--output", "out", "--train-percent", "70"], true)]
#[case::mock_percent(&["vgd", "mock", "--output", "out", "--train-percent", "101"], false)]
fn clap_validates_arguments(#[case] args: &[&str], #[case] accepted: bool) {
    assert_eq!(Cli::try_parse_from(args).is_ok(), accepted, "{args:?}");
}

#[test]
fn clap_collects_repeated_seed_graphs() -> TestResult {
    let cli = Cli::try_parse_from([
        "vgd",
        "generate",
        "--num-nodes",
        "30",
        "--seed-graph",
        "a.json",
        "--seed-graph",
        "b.json",
        "--allow-seed-edges",
    ])?;
    let Command::Generate(command) = cli.command else {
        panic!("expected the generate command");
    };
    assert_eq!(command.seed_graphs.len(), 2);
    assert!(command.allow_seed_edges);
    assert_eq!(command.max_edge_attempts.get(), vgd_core::DEFAULT_MAX_EDGE_ATTEMPTS);
    Ok(())
}

#[test]
fn mock_writes_one_metadata_file_per_element() -> TestResult {
    let dir = temp_dir();
    let output = dir.path().join("mock");
    let cli = Cli {
        command: Command::Mock(MockCommand {
            output: output.clone(),
            elements: 12,
            train_percent: 75,
            rng_seed: Some(4),
        }),
    };
    let summary = run_cli(cli)?;
    let ExecutionSummary::Mock {
        elements, train, ..
    } = summary
    else {
        panic!("expected a mock summary");
    };
    assert_eq!((elements, train), (12, 9));

    for index in 0..12 {
        let raw = fs::read_to_string(element_path(&output, index))?;
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        assert!(vgd_core::validate_graph_value(&value["graph"]).is_ok());
        let element: MockElement = serde_json::from_value(value)?;
        assert_eq!(element.index, index);
        assert_eq!(element.target, element.graph.graph_labels);
    }
    Ok(())
}

#[test]
fn render_summary_writes_json_lines() -> TestResult {
    let mut command = generate_command(6, 1);
    command.count = 2;
    let summary = run_generate(command)?;
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;

    let text = String::from_utf8(buffer)?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let value: serde_json::Value = serde_json::from_str(line)?;
        assert!(vgd_core::validate_graph_value(&value).is_ok());
        assert!(value["node_adjacency"].is_array());
        assert!(value["seed_graph_indices"].is_array());
    }
    Ok(())
}

#[test]
fn render_summary_reports_mock_counts() -> TestResult {
    let summary = ExecutionSummary::Mock {
        output: "data/mock".into(),
        elements: 10,
        train: 8,
        with_motif: 6,
    };
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    assert_eq!(
        String::from_utf8(buffer)?,
        "output: data/mock\nelements: 10\ntrain: 8\ntest: 2\nwith motif: 6\n",
    );
    Ok(())
}

#[test]
fn run_cli_records_command_spans() -> TestResult {
    let layer = CaptureLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let cli = Cli {
        command: Command::Generate(generate_command(9, 2)),
    };
    tracing::subscriber::with_default(subscriber, || run_cli(cli))?;

    let run = layer.span_named("cli.run").ok_or("cli.run span missing")?;
    assert_eq!(run.fields.get("command").map(String::as_str), Some("generate"));
    let generate = layer
        .span_named("cli.generate")
        .ok_or("cli.generate span missing")?;
    assert_eq!(generate.fields.get("num_nodes").map(String::as_str), Some("9"));
    assert!(layer.span_named("generator.generate").is_some());
    assert!(layer.event_with_message("generation completed").is_some());
    Ok(())
}

#[test]
fn load_seed_graph_records_path_on_error() {
    let layer = CaptureLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let dir = temp_dir();
    let missing = dir.path().join("gone.json");
    let result = tracing::subscriber::with_default(subscriber, || load_seed_graph(&missing));
    assert!(result.is_err());

    let span = layer
        .span_named("cli.load_seed_graph")
        .expect("load span must be recorded");
    assert_eq!(
        span.fields.get("path").map(String::as_str),
        Some(missing.display().to_string().as_str()),
    );
    assert_eq!(layer.events_at(tracing::Level::ERROR).len(), 1);
}
