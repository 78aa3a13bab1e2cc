//! Small helpers shared across CLI tests.
//!
//! The CLI unit tests write seed graphs to temporary files and assert error
//! handling behaviour. These helpers keep the test cases concise.

use std::fs;
use std::io;
use std::path::PathBuf;

use tempfile::TempDir;
use vgd_core::DEFAULT_MAX_EDGE_ATTEMPTS;

use super::{Cli, CliError, Command, GenerateCommand, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn write_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

pub(super) const TRIANGLE_JSON: &str = r#"{
    "node_indices": [0, 1, 2],
    "node_attributes": [[1.0], [1.0], [1.0]],
    "edge_indices": [[0, 1], [1, 0], [1, 2], [2, 1], [2, 0], [0, 2]],
    "edge_attributes": [[1.0], [1.0], [1.0], [1.0], [1.0], [1.0]]
}"#;

pub(super) fn generate_command(num_nodes: usize, additional_edges: usize) -> GenerateCommand {
    GenerateCommand {
        num_nodes,
        additional_edges,
        seed_graphs: Vec::new(),
        directed: false,
        allow_seed_edges: false,
        count: 1,
        rng_seed: Some(17),
        max_edge_attempts: match DEFAULT_MAX_EDGE_ATTEMPTS.try_into() {
            Ok(attempts) => attempts,
            Err(err) => panic!("default attempt cap must be non-zero: {err}"),
        },
        unbounded_attempts: false,
    }
}

pub(super) fn run_generate_expecting_error(command: GenerateCommand, panic_msg: &str) -> CliError {
    match run_cli(Cli {
        command: Command::Generate(command),
    }) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
