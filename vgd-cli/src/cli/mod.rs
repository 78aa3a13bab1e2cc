//! Command-line interface orchestration for the visual graph dataset tools.
//!
//! `generate` grows random graphs around optional seed graphs loaded from JSON
//! files and streams them as JSON lines; `mock` writes a labelled mock dataset
//! as one metadata file per element.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, GenerateCommand, MockCommand, render_summary,
    run_cli,
};

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;
