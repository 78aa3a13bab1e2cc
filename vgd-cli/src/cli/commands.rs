//! Command implementations and argument parsing for the `vgd` CLI.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::{Span, field, info, instrument};
use vgd_core::{
    DEFAULT_MAX_EDGE_ATTEMPTS, GenerationError, Graph, GraphError, GraphErrorCode, GraphGenerator,
    mock::{MockDatasetConfig, MockElement, Split, generate_mock_dataset},
    validate_graph_value,
};

const DEFAULT_ATTEMPTS: NonZeroUsize =
    NonZeroUsize::MIN.saturating_add(DEFAULT_MAX_EDGE_ATTEMPTS - 1);

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "vgd", about = "Generate graphs and mock visual graph datasets.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate random graphs and print them as JSON lines.
    Generate(GenerateCommand),
    /// Write a mock dataset of labelled graphs to a directory.
    Mock(MockCommand),
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Number of nodes in every generated graph.
    #[arg(long)]
    pub num_nodes: usize,

    /// Edges inserted after growth, beyond the spanning tree.
    #[arg(long, default_value_t = 0)]
    pub additional_edges: usize,

    /// JSON file holding a seed graph; repeat to embed several.
    #[arg(long = "seed-graph")]
    pub seed_graphs: Vec<PathBuf>,

    /// Store every edge in one direction only.
    #[arg(long)]
    pub directed: bool,

    /// Allow additional edges between two seed nodes.
    #[arg(long)]
    pub allow_seed_edges: bool,

    /// Number of graphs to generate.
    #[arg(long, default_value_t = 1)]
    pub count: usize,

    /// Seed for reproducible output.
    #[arg(long)]
    pub rng_seed: Option<u64>,

    /// Rejected additional-edge draws tolerated per graph.
    #[arg(long, default_value_t = DEFAULT_ATTEMPTS)]
    pub max_edge_attempts: NonZeroUsize,

    /// Retry additional edges without any limit.
    #[arg(long, conflicts_with = "max_edge_attempts")]
    pub unbounded_attempts: bool,
}

/// Options accepted by the `mock` command.
#[derive(Debug, Args, Clone)]
pub struct MockCommand {
    /// Directory receiving one `<index>.json` file per element.
    #[arg(long)]
    pub output: PathBuf,

    /// Number of dataset elements.
    #[arg(long, default_value_t = 100)]
    pub elements: usize,

    /// Percentage of elements assigned to the train split.
    #[arg(
        long,
        default_value_t = 80,
        value_parser = clap::value_parser!(u8).range(0..=100),
    )]
    pub train_percent: u8,

    /// Seed for a reproducible dataset.
    #[arg(long)]
    pub rng_seed: Option<u64>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while reading seeds or writing the dataset.
    #[error("failed to access `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A file did not contain the expected JSON.
    #[error("invalid JSON in `{path}`: {source}")]
    Json {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying decode or encode failure.
        #[source]
        source: serde_json::Error,
    },
    /// A seed graph file was not a graph.
    #[error("`{path}` is not a graph: {source}")]
    Graph {
        /// Path of the rejected seed graph.
        path: PathBuf,
        /// Validation failure.
        #[source]
        source: GraphError,
    },
    /// Generation failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl CliError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "CLI_IO",
            Self::Json { .. } => "CLI_JSON",
            Self::Graph { .. } => "CLI_INVALID_GRAPH",
            Self::Generation(error) => error.code().as_str(),
        }
    }

    /// Code of the underlying graph validation failure, if any.
    #[must_use]
    pub const fn graph_code(&self) -> Option<GraphErrorCode> {
        match self {
            Self::Graph { source, .. } => Some(source.code()),
            Self::Generation(error) => error.graph_code(),
            Self::Io { .. } | Self::Json { .. } => None,
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub enum ExecutionSummary {
    /// Graphs produced by `generate`.
    Generated {
        /// Graphs in generation order.
        graphs: Vec<Graph>,
    },
    /// Dataset written by `mock`.
    Mock {
        /// Directory holding the metadata files.
        output: PathBuf,
        /// Number of elements written.
        elements: usize,
        /// Elements in the train split.
        train: usize,
        /// Elements embedding the motif.
        with_motif: usize,
    },
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading inputs, generation or writing fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use vgd_cli::cli::{Cli, Command, ExecutionSummary, GenerateCommand, run_cli};
/// # use vgd_core::DEFAULT_MAX_EDGE_ATTEMPTS;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli {
///     command: Command::Generate(GenerateCommand {
///         num_nodes: 8,
///         additional_edges: 2,
///         seed_graphs: Vec::new(),
///         directed: false,
///         allow_seed_edges: false,
///         count: 2,
///         rng_seed: Some(1),
///         max_edge_attempts: DEFAULT_MAX_EDGE_ATTEMPTS.try_into()?,
///         unbounded_attempts: false,
///     }),
/// };
/// let ExecutionSummary::Generated { graphs } = run_cli(cli)? else {
///     unreachable!("generate yields graphs");
/// };
/// assert_eq!(graphs.len(), 2);
/// assert_eq!(graphs[0].edge_count(), (7 + 2) * 2);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Generate(command) => {
            Span::current().record("command", field::display("generate"));
            run_generate(command)
        }
        Command::Mock(command) => {
            Span::current().record("command", field::display("mock"));
            run_mock(&command)
        }
    }
}

#[instrument(
    name = "cli.generate",
    err,
    skip(command),
    fields(
        num_nodes = command.num_nodes,
        additional_edges = command.additional_edges,
        seed_graphs = command.seed_graphs.len(),
        count = command.count,
    ),
)]
pub(super) fn run_generate(command: GenerateCommand) -> Result<ExecutionSummary, CliError> {
    let seed_graphs = command
        .seed_graphs
        .iter()
        .map(|path| load_seed_graph(path))
        .collect::<Result<Vec<_>, _>>()?;

    let max_edge_attempts = (!command.unbounded_attempts).then_some(command.max_edge_attempts);
    let mut builder = GraphGenerator::builder(command.num_nodes, command.additional_edges)
        .with_seed_graphs(seed_graphs)
        .with_directed(command.directed)
        .with_prevent_edges_in_seed_graphs(!command.allow_seed_edges)
        .with_max_edge_attempts(max_edge_attempts);
    if let Some(seed) = command.rng_seed {
        builder = builder.with_rng_seed(seed);
    }
    let mut generator = builder.build()?;

    let mut graphs = Vec::with_capacity(command.count);
    for _ in 0..command.count {
        generator.reset();
        graphs.push(generator.generate()?);
    }
    info!(
        graphs = graphs.len(),
        edges_per_graph = generator.num_edges(),
        "generation completed"
    );
    Ok(ExecutionSummary::Generated { graphs })
}

#[instrument(name = "cli.load_seed_graph", err, fields(path = field::Empty))]
pub(super) fn load_seed_graph(path: &Path) -> Result<Graph, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: serde_json::Value =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    validate_graph_value(&value).map_err(|source| CliError::Graph {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_value(value).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[instrument(
    name = "cli.mock",
    err,
    skip(command),
    fields(output = field::Empty, elements = command.elements),
)]
pub(super) fn run_mock(command: &MockCommand) -> Result<ExecutionSummary, CliError> {
    Span::current().record("output", field::display(command.output.display()));
    let config = MockDatasetConfig {
        elements: command.elements,
        train_percent: command.train_percent,
        rng_seed: command.rng_seed,
        ..MockDatasetConfig::default()
    };
    let dataset = generate_mock_dataset(&config)?;

    fs::create_dir_all(&command.output).map_err(|source| CliError::Io {
        path: command.output.clone(),
        source,
    })?;
    for element in &dataset {
        write_element(&command.output, element)?;
    }

    let train = dataset
        .iter()
        .filter(|element| element.split == Split::Train)
        .count();
    let with_motif = dataset
        .iter()
        .filter(|element| element.graph.has_motif())
        .count();
    info!(
        elements = dataset.len(),
        train, with_motif, "mock dataset written"
    );
    Ok(ExecutionSummary::Mock {
        output: command.output.clone(),
        elements: dataset.len(),
        train,
        with_motif,
    })
}

pub(super) fn element_path(output: &Path, index: usize) -> PathBuf {
    output.join(format!("{index}.json"))
}

fn write_element(output: &Path, element: &MockElement) -> Result<(), CliError> {
    let path = element_path(output, element.index);
    let io_error = |source| CliError::Io {
        path: path.clone(),
        source,
    };
    let file = File::create(&path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, element).map_err(|source| CliError::Json {
        path: path.clone(),
        source,
    })?;
    writer.flush().map_err(io_error)
}

/// Renders `summary` to `writer`.
///
/// Generated graphs become one JSON object per line; a mock dataset becomes a
/// short human-readable report.
///
/// # Errors
/// Returns [`io::Error`] if writing or encoding fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use vgd_cli::cli::{ExecutionSummary, render_summary};
/// # use vgd_core::Graph;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary::Generated {
///     graphs: vec![Graph::new(vec![vec![1.0]], Vec::new(), Vec::new())],
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "{\"node_indices\":[0],\"node_attributes\":[[1.0]],\"edge_indices\":[],\"edge_attributes\":[]}\n",
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Generated { graphs } => {
            for graph in graphs {
                serde_json::to_writer(&mut writer, graph)?;
                writeln!(writer)?;
            }
        }
        ExecutionSummary::Mock {
            output,
            elements,
            train,
            with_motif,
        } => {
            writeln!(writer, "output: {}", output.display())?;
            writeln!(writer, "elements: {elements}")?;
            writeln!(writer, "train: {train}")?;
            writeln!(writer, "test: {}", elements - train)?;
            writeln!(writer, "with motif: {with_motif}")?;
        }
    }
    Ok(())
}
